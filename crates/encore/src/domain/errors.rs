//! Domain Errors
//!
//! Error types for domain operations.

use thiserror::Error;
use uuid::Uuid;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Upstream text generation failed; carries the upstream message
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// Catalog search failed for a single query
    #[error("Catalog search failed: {0}")]
    CatalogSearchFailed(String),

    #[error("Persistence failure: {0}")]
    PersistenceFailure(String),
}

impl DomainError {
    pub fn not_found<T: AsRef<str>>(entity_type: T, id: Uuid) -> Self {
        Self::NotFound {
            entity_type: entity_type.as_ref().to_string(),
            id: id.to_string(),
        }
    }

    pub fn not_found_str<T: AsRef<str>>(entity_type: T, id: &str) -> Self {
        Self::NotFound {
            entity_type: entity_type.as_ref().to_string(),
            id: id.to_string(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Wrap any storage-layer error
    pub fn persistence(err: impl std::fmt::Display) -> Self {
        Self::PersistenceFailure(err.to_string())
    }
}
