// Copyright 2025 Cowboy AI, LLC.

//! Error types for domain operations

use thiserror::Error;

use crate::validation::DomainValidationError;

/// Errors that can occur in domain operations
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    /// Entity not found
    #[error("Entity not found: {entity_type} with id {id}")]
    EntityNotFound {
        /// Type of entity that wasn't found
        entity_type: String,
        /// ID that was searched for
        id: String,
    },

    /// A record failed its validation pass
    #[error(transparent)]
    Validation(#[from] DomainValidationError),

    /// Invalid operation
    #[error("Invalid operation: {reason}")]
    InvalidOperation {
        /// Reason why the operation is invalid
        reason: String,
    },

    /// Identifier could not be parsed
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}

impl From<uuid::Error> for DomainError {
    fn from(err: uuid::Error) -> Self {
        DomainError::InvalidIdentifier(err.to_string())
    }
}

impl DomainError {
    /// Shorthand for [`DomainError::EntityNotFound`]
    pub fn not_found(entity_type: impl Into<String>, id: impl ToString) -> Self {
        DomainError::EntityNotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Check if this is a not found error (maps to a 404-class response)
    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::EntityNotFound { .. })
    }

    /// Check if this is a validation error (maps to a 400-class response)
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            DomainError::Validation(_) | DomainError::InvalidIdentifier(_)
        )
    }

    /// The issue list carried by a validation failure, if any
    pub fn validation_issues(&self) -> Option<&[crate::validation::ValidationIssue]> {
        match self {
            DomainError::Validation(err) => Some(err.issues()),
            _ => None,
        }
    }
}
