//! Error types for color selection.

use thiserror::Error;

use crate::host::HostError;

/// Result type for selection operations.
pub type SelectResult<T> = Result<T, SelectError>;

/// Errors that can occur while matching or reconciling a selection.
///
/// Only [`SelectError::HostQueryFailure`] aborts an event. The other variants
/// describe why an operation declined to act; the controller reports them as
/// informational messages and hands them back inside
/// [`EventOutcome::Declined`](crate::EventOutcome::Declined).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SelectError {
    /// A face or vertex has no color assigned.
    #[error("no color data")]
    NoColorData,

    /// The operation needs a selection and there is none.
    #[error("nothing is selected")]
    EmptySelection,

    /// Matching produced no faces.
    #[error("no matching faces found")]
    NoMatchFound,

    /// The host failed to answer a query or apply a change.
    #[error(transparent)]
    HostQueryFailure(#[from] HostError),
}

impl SelectError {
    /// Whether this error aborts the current event.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::HostQueryFailure(_))
    }
}
