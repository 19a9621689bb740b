use std::collections::HashSet;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    engine::IdEngine, error::Error, error::Result, rand::RandSource, seq::SequenceSource,
    time::TimeSource,
};

/// Total expansion attempts before `allocate` gives up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Outer write attempts before `commit` surfaces a conflict.
pub const DEFAULT_COMMIT_ATTEMPTS: u32 = 3;

/// Wraps an [`IdEngine`] with the per-inventory uniqueness retry protocol.
///
/// The allocator is optimistic: it checks candidates against a snapshot of
/// the ids already taken and leaves authoritative enforcement to the storage
/// layer's `(inventory, custom_id)` uniqueness constraint. The check and the
/// insert can race, which is what [`commit`](Self::commit) is for.
///
/// # Example
///
/// ```
/// use std::collections::HashSet;
/// use stockade::{IdAllocator, IdEngine};
///
/// let allocator = IdAllocator::new(IdEngine::default());
/// let existing = HashSet::new();
/// let id = allocator.allocate("ITEM-{RANDOM6}", &existing).unwrap();
/// assert!(id.starts_with("ITEM-"));
/// ```
pub struct IdAllocator<T, R, S> {
    engine: IdEngine<T, R, S>,
    max_attempts: u32,
    commit_attempts: u32,
}

impl<T, R, S> IdAllocator<T, R, S>
where
    T: TimeSource,
    R: RandSource,
    S: SequenceSource,
{
    /// Creates an allocator with the default attempt bounds.
    pub const fn new(engine: IdEngine<T, R, S>) -> Self {
        Self {
            engine,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            commit_attempts: DEFAULT_COMMIT_ATTEMPTS,
        }
    }

    /// Overrides the total number of expansion attempts.
    pub const fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Overrides the outer write attempt bound used by [`commit`](Self::commit).
    pub const fn with_commit_attempts(mut self, attempts: u32) -> Self {
        self.commit_attempts = attempts;
        self
    }

    /// The wrapped engine, for `validate`/`preview` calls on the same wiring.
    pub const fn engine(&self) -> &IdEngine<T, R, S> {
        &self.engine
    }

    /// Produces an id for `format` that is absent from `existing`.
    ///
    /// Expands up to `max_attempts` candidates and returns the first one not
    /// present in the snapshot. Comparison is case-sensitive string equality.
    ///
    /// # Errors
    ///
    /// [`Error::Exhausted`] when every attempt collided. This is a
    /// recoverable, user-facing condition: retry, or pick a format with more
    /// entropy.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self, existing)))]
    pub fn allocate(&self, format: &str, existing: &HashSet<String>) -> Result<String> {
        for _ in 0..self.max_attempts {
            let candidate = self.engine.expand(format);
            if !existing.contains(&candidate) {
                return Ok(candidate);
            }
        }
        Err(Error::Exhausted {
            attempts: self.max_attempts,
        })
    }

    /// Allocates and persists an id, retrying the check-then-insert race.
    ///
    /// `snapshot` fetches the ids currently taken in the inventory; `write`
    /// persists a candidate and reports a write-time uniqueness violation as
    /// [`Error::ConcurrentConflict`]. On conflict the snapshot is refreshed
    /// and allocation runs again, up to the commit attempt bound; the last
    /// conflict is surfaced once the bound is hit. Any other error from
    /// either closure propagates unchanged.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip_all))]
    pub fn commit(
        &self,
        format: &str,
        mut snapshot: impl FnMut() -> HashSet<String>,
        mut write: impl FnMut(&str) -> Result<()>,
    ) -> Result<String> {
        let mut last_conflict = None;
        for _ in 0..self.commit_attempts {
            let id = self.allocate(format, &snapshot())?;
            match write(&id) {
                Ok(()) => return Ok(id),
                Err(Error::ConcurrentConflict { id }) => {
                    last_conflict = Some(Error::ConcurrentConflict { id });
                }
                Err(other) => return Err(other),
            }
        }
        Err(last_conflict.unwrap_or(Error::Exhausted {
            attempts: self.commit_attempts,
        }))
    }
}
