//! Credential Provider Port

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainError;

/// Resolves the upstream catalog access token of a user.
///
/// Tokens are written by the login flow; this side only reads them.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Fails with `NotFound` when the user never linked a catalog account
    async fn access_token(&self, owner: Uuid) -> Result<String, DomainError>;
}
