//! Comment Repository Port

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, Comment, Page, PageRequest};

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create(&self, comment: &Comment) -> Result<Comment, DomainError>;

    /// Newest-first comments of one favorite
    async fn list_for_favorite(
        &self,
        favorite_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Comment>, DomainError>;

    /// Replace the text; returns None when no owned comment matched
    async fn update_text(
        &self,
        user_id: Uuid,
        id: Uuid,
        text: &str,
    ) -> Result<Option<Comment>, DomainError>;

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, DomainError>;
}
