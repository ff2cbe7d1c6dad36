//! PostgreSQL implementation of CredentialProvider
//!
//! Reads the catalog access tokens stored by the login flow.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use encore::{CredentialProvider, DomainError};

use super::map_sqlx_error;

pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialProvider for PgCredentialStore {
    async fn access_token(&self, owner: Uuid) -> Result<String, DomainError> {
        sqlx::query_scalar::<_, String>(
            "SELECT access_token FROM user_credentials WHERE user_id = $1",
        )
        .bind(owner)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .ok_or_else(|| DomainError::not_found("Credentials", owner))
    }
}
