//! HTTP error mapping
//!
//! Every failure leaves the server as JSON `{ "error": "<message>" }`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use encore::DomainError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Malformed path, query or body
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Domain(err) => match err {
                DomainError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
                DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
                DomainError::Conflict(_) => StatusCode::CONFLICT,
                DomainError::CatalogSearchFailed(_) => StatusCode::BAD_GATEWAY,
                DomainError::GenerationFailed(_) | DomainError::PersistenceFailure(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Domain(DomainError::InvalidArgument(msg))
            | ApiError::Domain(DomainError::Conflict(msg)) => msg.clone(),
            ApiError::Domain(DomainError::NotFound { entity_type, .. }) => {
                format!("{} not found", entity_type)
            }
            ApiError::Domain(DomainError::GenerationFailed(msg)) => {
                tracing::error!(error = %msg, "Recommendation generation failed");
                "Failed to generate recommendations".to_string()
            }
            ApiError::Domain(DomainError::PersistenceFailure(msg)) => {
                tracing::error!(error = %msg, "Persistence failure");
                "An internal error occurred".to_string()
            }
            ApiError::Domain(DomainError::CatalogSearchFailed(msg)) => {
                tracing::error!(error = %msg, "Catalog search failed");
                "Catalog search failed".to_string()
            }
            ApiError::BadRequest(msg) | ApiError::Unauthorized(msg) => msg.clone(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
