//! Favorite Repository Port

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, Favorite, FavoriteDigest, Page, PageRequest};

#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Insert a favorite. Fails with `Conflict` when the user already
    /// saved the same catalog track.
    async fn create(&self, favorite: &Favorite) -> Result<Favorite, DomainError>;

    async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> Result<Option<Favorite>, DomainError>;

    async fn find_by_track(
        &self,
        user_id: Uuid,
        catalog_track_id: &str,
    ) -> Result<Option<Favorite>, DomainError>;

    /// Newest first
    async fn list(&self, user_id: Uuid, page: PageRequest) -> Result<Page<Favorite>, DomainError>;

    /// Newest-first favorites restricted to `ids`
    async fn list_by_ids(
        &self,
        user_id: Uuid,
        ids: &[Uuid],
        page: PageRequest,
    ) -> Result<Page<Favorite>, DomainError>;

    /// Delete by catalog track id, including category memberships and comments.
    /// Returns false when nothing was deleted.
    async fn delete_by_track(
        &self,
        user_id: Uuid,
        catalog_track_id: &str,
    ) -> Result<bool, DomainError>;

    /// Up to `limit` most recently created favorites, reduced to digests
    async fn recent_digest(
        &self,
        user_id: Uuid,
        limit: u32,
    ) -> Result<Vec<FavoriteDigest>, DomainError>;
}
