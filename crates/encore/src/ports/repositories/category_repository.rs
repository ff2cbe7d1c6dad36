//! Category Repository Port

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, Category, Page, PageRequest};

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Insert a category. Fails with `Conflict` on a duplicate name.
    async fn create(&self, category: &Category) -> Result<Category, DomainError>;

    async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> Result<Option<Category>, DomainError>;

    /// Find a category by exact name
    async fn find_by_name(&self, user_id: Uuid, name: &str)
        -> Result<Option<Category>, DomainError>;

    /// Newest first
    async fn list(&self, user_id: Uuid, page: PageRequest) -> Result<Page<Category>, DomainError>;

    /// Rename; returns None when no owned category matched
    async fn rename(
        &self,
        user_id: Uuid,
        id: Uuid,
        name: &str,
    ) -> Result<Option<Category>, DomainError>;

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, DomainError>;

    /// Append a favorite to the category membership list
    async fn add_favorite(&self, category_id: Uuid, favorite_id: Uuid) -> Result<(), DomainError>;

    /// Returns false when the favorite was not a member
    async fn remove_favorite(
        &self,
        category_id: Uuid,
        favorite_id: Uuid,
    ) -> Result<bool, DomainError>;
}
