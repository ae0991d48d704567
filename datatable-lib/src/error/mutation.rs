//! Optimistic mutation errors

use thiserror::Error;

/// Outcome of a failed optimistic mutation.
///
/// The cache has already been rolled back to its snapshot when this error is
/// returned.
#[derive(Debug, Error)]
pub enum MutationError<E> {
    /// The remote write was rejected; carries the caller's error.
    #[error("mutation rejected, cache rolled back: {0}")]
    Rejected(E),
}

impl<E> MutationError<E> {
    /// Returns the caller's error.
    pub fn into_inner(self) -> E {
        match self {
            MutationError::Rejected(e) => e,
        }
    }
}
