use thiserror::Error;

/// Failure categories for a synchronization run.
///
/// None of these are retried internally. Whichever occurs first aborts the
/// run at the point of failure and is surfaced to the operator, annotated
/// with the orchestrator stage it happened in (see [`crate::sync::StageError`]).
#[derive(Debug, Error)]
pub enum SyncError {
    /// A listing call returned a non-success status, a network failure, or
    /// malformed pagination (an empty page while more items were expected).
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// Creating the target playlist failed.
    #[error("playlist creation failed: {0}")]
    Create(String),

    /// A batch-write chunk failed. Remaining chunks are never attempted.
    #[error("batch write failed: {0}")]
    Write(String),

    /// Malformed source reference or a missing/empty required setting.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Token could not be loaded, refreshed, or exchanged.
    #[error("authentication error: {0}")]
    Auth(String),
}
