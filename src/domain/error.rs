//! Error types for the inline diff engine.
//!
//! Timeouts and malformed streamed lines are recovered locally and only
//! logged; the errors here are the conditions the caller must handle.

use thiserror::Error;

/// Errors surfaced by the inline diff handler.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The host document refused the batch edit, e.g. because the anchor
    /// went stale under a concurrent external modification. The session
    /// is left as-is: no retry, no rollback of the accumulator.
    #[error("host document rejected the edit batch for generation {generation_id}")]
    ApplyRejected { generation_id: String },

    #[error("inline diff operation failed: {0}")]
    OperationFailed(#[from] anyhow::Error),
}
