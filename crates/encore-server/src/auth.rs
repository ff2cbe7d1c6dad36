//! JWT Bearer Authentication
//!
//! Tokens are HS256-signed by the login flow and carry `{ userId, exp }`.
//! The middleware verifies them and hands the caller identity to handlers
//! through request extensions.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::AppState;

/// JWT claims issued by the login flow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    /// Expiration time (UTC Unix timestamp)
    pub exp: i64,
}

/// The authenticated caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
}

/// Verifies access tokens against the shared secret
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            // HS256, validates exp
            validation: Validation::default(),
        }
    }

    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(token, &self.key, &self.validation).map(|data| data.claims)
    }
}

/// Authentication middleware
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => match header.strip_prefix("Bearer ") {
            Some(token) => token,
            None => {
                tracing::warn!("Invalid Authorization header format");
                return Err(ApiError::Unauthorized(
                    "Invalid Authorization format. Expected: Bearer <token>".to_string(),
                ));
            }
        },
        None => {
            tracing::warn!("Missing Authorization header");
            return Err(ApiError::Unauthorized(
                "Access token is required".to_string(),
            ));
        }
    };

    let claims = state.jwt.verify(token).map_err(|e| {
        tracing::warn!(error = %e, "Rejected access token");
        ApiError::Unauthorized("Invalid or expired token".to_string())
    })?;

    request.extensions_mut().insert(AuthUser {
        user_id: claims.user_id,
    });

    Ok(next.run(request).await)
}
