//! OSCAL document errors.

use thiserror::Error;

/// Errors raised when an OSCAL document does not have the shape an
/// operation needs.
#[derive(Debug, Error)]
pub enum OscalError {
    /// The root `system-security-plan` object is missing.
    #[error("document has no system-security-plan object")]
    MissingPlan,

    /// A container the operation writes into is not a JSON object.
    #[error("{path} must be an object")]
    NotAnObject { path: &'static str },

    /// A container the operation writes into is not a JSON array.
    #[error("{path} must be an array")]
    NotAnArray { path: &'static str },

    /// The document could not be deserialized into the read model.
    #[error("malformed OSCAL document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for OSCAL operations.
pub type OscalResult<T> = Result<T, OscalError>;
