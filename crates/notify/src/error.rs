//! Engine error types.
//!
//! External collaborators (store, account directory, dispatcher) are
//! behind trait seams and surface their failures as boxed errors;
//! [`NotifyError`] records which seam failed.

/// Error surfaced by an external collaborator call.
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync>;

/// Failures inside one artefact's notification unit of work.
///
/// Nothing here is fatal to the service: the processing loop logs the
/// error and the unit of work ends. Per-item conditions (missing
/// email, unknown partner, inactive third-party account) never reach
/// this type — they are logged and skipped where they occur.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// A subscription store query failed.
    #[error("subscription store query failed: {0}")]
    Store(#[source] CollaboratorError),

    /// An account directory lookup failed.
    #[error("account lookup failed: {0}")]
    Account(#[source] CollaboratorError),

    /// A downstream dispatch call failed.
    #[error("dispatch failed: {0}")]
    Dispatch(#[source] CollaboratorError),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
