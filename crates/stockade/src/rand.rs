use rand::{Rng, rng};

/// A trait for random sources consumed by the template engine.
///
/// All `RANDOM*` and `GUID*` tokens draw their entropy from this trait, so a
/// scripted implementation makes expansion fully deterministic in tests.
pub trait RandSource {
    /// Returns 64 random bits.
    fn rand(&self) -> u64;
}

/// A [`RandSource`] that uses the thread-local RNG.
///
/// This RNG is fast, cryptographically secure (ChaCha-based), and
/// automatically reseeded periodically.
///
/// Each OS thread has its own RNG instance, so calls from multiple threads
/// are contention-free. This type does **not** store the RNG itself; it
/// simply accesses the thread-local generator on each call.
#[derive(Default, Clone, Debug)]
pub struct ThreadRandom;

impl RandSource for ThreadRandom {
    fn rand(&self) -> u64 {
        rng().random()
    }
}
