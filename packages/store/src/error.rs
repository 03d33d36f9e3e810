//! # Error taxonomy
//!
//! [`BackendError`] is what every collaborator trait in [`crate::backend`] returns.
//! [`NotesError`] is what the resolvers, the service and the view models return;
//! a backend failure converts into [`NotesError::BackendUnavailable`] through `?`.
//!
//! None of these are retried. The view models render them with `Display` and
//! keep the screen usable.

use thiserror::Error;

/// A failure reported by a backend collaborator (store, auth, blob storage).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The backend could not be reached or failed while serving the request.
    #[error("{0}")]
    Unavailable(String),
    /// The backend refused the request under its own access rules.
    #[error("rejected by backend: {0}")]
    Rejected(String),
}

impl BackendError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}

/// Errors surfaced by note, category, sharing and profile operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NotesError {
    #[error("No user signed in. Please log in.")]
    Unauthenticated,

    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Missing required field: {0}")]
    ValidationFailed(&'static str),

    #[error("{0} has already been added")]
    AlreadyShared(String),

    #[error("A note cannot be shared with its owner")]
    CannotShareWithOwner,

    #[error("More than one user is named {0}")]
    AmbiguousUsername(String),

    #[error("Only the owner may change this {0}")]
    PermissionDenied(&'static str),

    #[error("Invalid {entity} document: {reason}")]
    InvalidDocument { entity: &'static str, reason: String },

    #[error("Backend unavailable: {0}")]
    BackendUnavailable(#[from] BackendError),
}

impl NotesError {
    pub(crate) fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            key: key.into(),
        }
    }

    /// True when the failure came from the backend rather than from local rules.
    pub fn is_backend(&self) -> bool {
        matches!(self, Self::BackendUnavailable(_))
    }
}
