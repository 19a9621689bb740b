use core::hint::black_box;
use std::collections::HashSet;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use stockade::{AtomicSequence, IdAllocator, IdEngine, SystemClock, ThreadRandom};

// Number of ids produced per benchmark iteration.
const TOTAL_IDS: usize = 4096;

const MIXED_FORMAT: &str = "INV-{YEAR}-{RANDOM6}-{SEQ:4}";

fn bench_expand(c: &mut Criterion) {
    let engine = IdEngine::new(SystemClock, ThreadRandom, AtomicSequence::new());

    let mut group = c.benchmark_group("engine/expand");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));
    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            for _ in 0..TOTAL_IDS {
                black_box(engine.expand(black_box(MIXED_FORMAT)));
            }
        })
    });
    group.finish();
}

fn bench_allocate(c: &mut Criterion) {
    let allocator = IdAllocator::new(IdEngine::new(
        SystemClock,
        ThreadRandom,
        AtomicSequence::new(),
    ));
    let existing = HashSet::new();

    let mut group = c.benchmark_group("allocator/allocate");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));
    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            for _ in 0..TOTAL_IDS {
                let id = allocator
                    .allocate(black_box(MIXED_FORMAT), &existing)
                    .expect("allocation against an empty set succeeds");
                black_box(id);
            }
        })
    });
    group.finish();
}

criterion_group!(benches, bench_expand, bench_allocate);
criterion_main!(benches);
