//! # Workflow Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CollaboratorError (transport: request failed, bad response)            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  WorkflowError (session level) ← adds the workflow-rule failures       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Host application translates to a user-facing message                  │
//! │                                                                         │
//! │  Not every collaborator failure becomes a WorkflowError: settings      │
//! │  fetch and publish notification are non-fatal and only logged.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Collaborator Error
// =============================================================================

/// Transport-level failure from a remote collaborator.
#[derive(Debug, Clone, Error)]
pub enum CollaboratorError {
    /// The request never completed (network, timeout, 5xx).
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The collaborator answered with something unusable.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

// =============================================================================
// Workflow Error
// =============================================================================

/// Session-level failures from save / publish / unpublish.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Publish was requested for a quote whose total is not positive.
    ///
    /// This is the editing surface's rule: the calculator itself accepts
    /// any input, but a zero-value quote must not reach the client.
    #[error("Quote total must be greater than zero to publish")]
    NothingToPublish,

    /// The store acknowledged the request but refused the update.
    #[error("Store rejected the update for ticket {0}")]
    UpdateRejected(String),

    /// The store call itself failed.
    #[error("Store error: {0}")]
    Store(#[from] CollaboratorError),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with WorkflowError.
pub type WorkflowResult<T> = Result<T, WorkflowError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            WorkflowError::NothingToPublish.to_string(),
            "Quote total must be greater than zero to publish"
        );
        assert_eq!(
            WorkflowError::UpdateRejected("TCK-104".to_string()).to_string(),
            "Store rejected the update for ticket TCK-104"
        );
    }

    #[test]
    fn test_collaborator_error_wraps_into_workflow_error() {
        let err: WorkflowError =
            CollaboratorError::RequestFailed("connection reset".to_string()).into();
        assert!(matches!(err, WorkflowError::Store(_)));
        assert_eq!(err.to_string(), "Store error: Request failed: connection reset");
    }
}
