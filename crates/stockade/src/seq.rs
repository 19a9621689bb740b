use std::{collections::HashMap, sync::Arc};

use parking_lot::Mutex;
use portable_atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// A trait for sequence sources consumed by the `SEQ` token family.
///
/// Sequence numbers are scoped per inventory: the collaborator wires one
/// source per inventory (see [`SequenceRegistry`]) and the engine draws at
/// most one value per expansion, shared by every `SEQ` token in the format.
pub trait SequenceSource {
    /// Returns the next sequence value.
    fn next_seq(&self) -> u64;
}

impl<S: SequenceSource + ?Sized> SequenceSource for Arc<S> {
    fn next_seq(&self) -> u64 {
        (**self).next_seq()
    }
}

/// A monotonically increasing in-memory counter.
///
/// Starts at 1 so the first generated id carries sequence `001`. Thread-safe;
/// concurrent drawers each observe a distinct value.
#[derive(Debug)]
pub struct AtomicSequence {
    counter: AtomicU64,
}

impl AtomicSequence {
    /// Creates a counter whose first drawn value is 1.
    pub const fn new() -> Self {
        Self::starting_at(1)
    }

    /// Creates a counter whose first drawn value is `start`.
    ///
    /// Useful when resuming from a persisted high-water mark.
    pub const fn starting_at(start: u64) -> Self {
        Self {
            counter: AtomicU64::new(start),
        }
    }
}

impl Default for AtomicSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceSource for AtomicSequence {
    fn next_seq(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::Relaxed)
    }
}

/// A [`SequenceSource`] that always yields the same value.
///
/// Reproduces the constant-sequence behavior of legacy deployments, where
/// `{SEQ}` always expanded to `001`. Also handy in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedSequence(u64);

impl FixedSequence {
    /// Creates a source that always yields `value`.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }
}

impl SequenceSource for FixedSequence {
    fn next_seq(&self) -> u64 {
        self.0
    }
}

/// Shared per-inventory counters for collaborators that keep sequence state
/// in memory.
///
/// The first request for an inventory creates its counter at 1; later
/// requests return the same counter, so ids allocated through different
/// engine instances still draw from one sequence.
#[derive(Debug, Default)]
pub struct SequenceRegistry {
    counters: Mutex<HashMap<Uuid, Arc<AtomicSequence>>>,
}

impl SequenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the counter for `inventory`, creating it on first use.
    pub fn counter(&self, inventory: Uuid) -> Arc<AtomicSequence> {
        Arc::clone(
            self.counters
                .lock()
                .entry(inventory)
                .or_insert_with(|| Arc::new(AtomicSequence::new())),
        )
    }
}
