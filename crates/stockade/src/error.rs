use thiserror::Error;

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Unified error type for custom id allocation.
///
/// Template expansion itself never fails: unrecognized tokens and malformed
/// `DATE:` patterns pass through verbatim. Errors only surface from the
/// allocator, where candidate ids are checked against the ids already taken
/// in the owning inventory.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Every expansion attempt collided with an id that is already in use.
    ///
    /// Recoverable: the caller can retry with a different format or run the
    /// allocation again.
    #[error("failed to generate a unique id after {attempts} attempts")]
    Exhausted { attempts: u32 },

    /// The storage layer rejected a write because another allocation claimed
    /// the same id between the uniqueness check and the insert.
    ///
    /// [`IdAllocator::commit`] retries this with a refreshed id snapshot, up
    /// to its outer attempt bound.
    ///
    /// [`IdAllocator::commit`]: crate::IdAllocator::commit
    #[error("id `{id}` was claimed concurrently")]
    ConcurrentConflict { id: String },
}
