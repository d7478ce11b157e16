//! Contract error types for entitlement service
//!
//! These errors are transport-agnostic and used for inter-module communication.
//! The REST layer decides which HTTP status each variant maps to.

use thiserror::Error;

/// Entitlement service domain errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntitlementError {
    /// Required input missing or malformed
    #[error("{message}")]
    BadRequest { message: String },

    /// No record for the given identifier
    #[error("Entitlement with ID {id} not found")]
    NotFound {
        /// Identifier as supplied by the caller
        id: String,
    },

    /// Reserved for authentication
    #[error("{message}")]
    Unauthorized { message: String },

    /// Reserved for authorization
    #[error("{message}")]
    Forbidden { message: String },

    /// Reserved for uniqueness constraints
    #[error("{message}")]
    Conflict { message: String },

    /// Storage failure (constraint violation, connection loss, ...)
    #[error("{message}")]
    Storage { message: String },
}

impl EntitlementError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn not_found(id: impl ToString) -> Self {
        Self::NotFound { id: id.to_string() }
    }

    /// Wrap a repository failure, keeping the full cause chain as the message
    pub fn storage(error: &anyhow::Error) -> Self {
        Self::Storage {
            message: format!("{error:#}"),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
