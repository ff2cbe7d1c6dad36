//! Curation Application Service (Use Case)
//!
//! Favorites, categories and comments of a single user.

use std::sync::Arc;
use uuid::Uuid;

use encore::{
    Category, CategoryRepository, Comment, CommentRepository, DomainError, Favorite,
    FavoriteRepository, NewFavorite, Page, PageRequest,
};

pub struct CurationService {
    favorites: Arc<dyn FavoriteRepository>,
    categories: Arc<dyn CategoryRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl CurationService {
    pub fn new(
        favorites: Arc<dyn FavoriteRepository>,
        categories: Arc<dyn CategoryRepository>,
        comments: Arc<dyn CommentRepository>,
    ) -> Self {
        Self {
            favorites,
            categories,
            comments,
        }
    }

    // ============================================
    // Favorites
    // ============================================

    pub async fn add_favorite(
        &self,
        user_id: Uuid,
        input: NewFavorite,
    ) -> Result<Favorite, DomainError> {
        let favorite = Favorite::new(user_id, input)?;

        if self
            .favorites
            .find_by_track(user_id, &favorite.catalog_track_id)
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict(
                "Track is already in favorites".to_string(),
            ));
        }

        let saved = self.favorites.create(&favorite).await?;
        tracing::info!("Added favorite {} for user {}", saved.catalog_track_id, user_id);
        Ok(saved)
    }

    pub async fn list_favorites(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Favorite>, DomainError> {
        self.favorites.list(user_id, page).await
    }

    pub async fn check_favorite(
        &self,
        user_id: Uuid,
        catalog_track_id: &str,
    ) -> Result<Option<Favorite>, DomainError> {
        self.favorites.find_by_track(user_id, catalog_track_id).await
    }

    /// Also drops the favorite's category memberships and comments
    pub async fn remove_favorite(
        &self,
        user_id: Uuid,
        catalog_track_id: &str,
    ) -> Result<(), DomainError> {
        if !self
            .favorites
            .delete_by_track(user_id, catalog_track_id)
            .await?
        {
            return Err(DomainError::not_found_str("Favorite", catalog_track_id));
        }

        tracing::info!("Removed favorite {} for user {}", catalog_track_id, user_id);
        Ok(())
    }

    // ============================================
    // Categories
    // ============================================

    pub async fn create_category(&self, user_id: Uuid, name: &str) -> Result<Category, DomainError> {
        let category = Category::new(user_id, name)?;
        self.ensure_name_free(user_id, &category.name, None).await?;

        let saved = self.categories.create(&category).await?;
        tracing::info!("Created category {} ({})", saved.name, saved.id);
        Ok(saved)
    }

    pub async fn list_categories(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Category>, DomainError> {
        self.categories.list(user_id, page).await
    }

    pub async fn rename_category(
        &self,
        user_id: Uuid,
        id: Uuid,
        name: &str,
    ) -> Result<Category, DomainError> {
        let name = Category::validate_name(name)?;
        self.ensure_name_free(user_id, &name, Some(id)).await?;

        self.categories
            .rename(user_id, id, &name)
            .await?
            .ok_or_else(|| DomainError::not_found("Category", id))
    }

    pub async fn delete_category(&self, user_id: Uuid, id: Uuid) -> Result<(), DomainError> {
        if !self.categories.delete(user_id, id).await? {
            return Err(DomainError::not_found("Category", id));
        }
        tracing::info!("Deleted category {}", id);
        Ok(())
    }

    pub async fn add_to_category(
        &self,
        user_id: Uuid,
        category_id: Uuid,
        favorite_id: Uuid,
    ) -> Result<Category, DomainError> {
        let mut category = self.owned_category(user_id, category_id).await?;
        self.owned_favorite(user_id, favorite_id).await?;

        if category.contains(favorite_id) {
            return Err(DomainError::Conflict(
                "Favorite is already in this category".to_string(),
            ));
        }

        self.categories
            .add_favorite(category_id, favorite_id)
            .await?;
        category.favorite_ids.push(favorite_id);
        Ok(category)
    }

    pub async fn remove_from_category(
        &self,
        user_id: Uuid,
        category_id: Uuid,
        favorite_id: Uuid,
    ) -> Result<(), DomainError> {
        self.owned_category(user_id, category_id).await?;

        if !self
            .categories
            .remove_favorite(category_id, favorite_id)
            .await?
        {
            return Err(DomainError::not_found("Favorite", favorite_id));
        }
        Ok(())
    }

    pub async fn category_favorites(
        &self,
        user_id: Uuid,
        category_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Favorite>, DomainError> {
        let category = self.owned_category(user_id, category_id).await?;
        self.favorites
            .list_by_ids(user_id, &category.favorite_ids, page)
            .await
    }

    // ============================================
    // Comments
    // ============================================

    pub async fn add_comment(
        &self,
        user_id: Uuid,
        favorite_id: Uuid,
        text: &str,
    ) -> Result<Comment, DomainError> {
        let comment = Comment::new(user_id, favorite_id, text)?;
        self.owned_favorite(user_id, favorite_id).await?;
        self.comments.create(&comment).await
    }

    pub async fn list_comments(
        &self,
        user_id: Uuid,
        favorite_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Comment>, DomainError> {
        self.owned_favorite(user_id, favorite_id).await?;
        self.comments.list_for_favorite(favorite_id, page).await
    }

    pub async fn update_comment(
        &self,
        user_id: Uuid,
        id: Uuid,
        text: &str,
    ) -> Result<Comment, DomainError> {
        let text = Comment::validate_text(text)?;
        self.comments
            .update_text(user_id, id, &text)
            .await?
            .ok_or_else(|| DomainError::not_found("Comment", id))
    }

    pub async fn delete_comment(&self, user_id: Uuid, id: Uuid) -> Result<(), DomainError> {
        if !self.comments.delete(user_id, id).await? {
            return Err(DomainError::not_found("Comment", id));
        }
        Ok(())
    }

    // ============================================
    // Helpers
    // ============================================

    async fn owned_category(&self, user_id: Uuid, id: Uuid) -> Result<Category, DomainError> {
        self.categories
            .find_by_id(user_id, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Category", id))
    }

    async fn owned_favorite(&self, user_id: Uuid, id: Uuid) -> Result<Favorite, DomainError> {
        self.favorites
            .find_by_id(user_id, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Favorite", id))
    }

    async fn ensure_name_free(
        &self,
        user_id: Uuid,
        name: &str,
        except: Option<Uuid>,
    ) -> Result<(), DomainError> {
        match self.categories.find_by_name(user_id, name).await? {
            Some(existing) if Some(existing.id) != except => Err(DomainError::Conflict(format!(
                "A category named \"{}\" already exists",
                name
            ))),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeCatalog, FakeLlm, TestHarness};

    fn harness() -> TestHarness {
        TestHarness::new(FakeLlm::replying(""), FakeCatalog::default())
    }

    fn new_favorite(track_id: &str) -> NewFavorite {
        NewFavorite {
            catalog_track_id: track_id.to_string(),
            track_name: Some(format!("Track {}", track_id)),
            artist_name: Some("Someone".to_string()),
            album_image_url: None,
        }
    }

    #[tokio::test]
    async fn test_duplicate_favorite_conflicts() {
        let h = harness();
        let user = Uuid::new_v4();

        h.curation.add_favorite(user, new_favorite("t1")).await.unwrap();
        let err = h
            .curation
            .add_favorite(user, new_favorite("t1"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        // another user may save the same track
        h.curation
            .add_favorite(Uuid::new_v4(), new_favorite("t1"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_favorites_paginate_newest_first() {
        let h = harness();
        let user = Uuid::new_v4();
        for id in ["a", "b", "c"] {
            h.curation.add_favorite(user, new_favorite(id)).await.unwrap();
        }

        let page = h
            .curation
            .list_favorites(user, PageRequest::new(Some(1), Some(2)))
            .await
            .unwrap();

        let ids: Vec<&str> = page.items.iter().map(|f| f.catalog_track_id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b"]);
        assert_eq!(page.total, 3);
        assert_eq!(page.pages(), 2);
        assert!(page.has_next());
    }

    #[tokio::test]
    async fn test_remove_favorite_cleans_up() {
        let h = harness();
        let user = Uuid::new_v4();
        let fav = h.curation.add_favorite(user, new_favorite("t1")).await.unwrap();
        let category = h.curation.create_category(user, "Chill").await.unwrap();
        h.curation
            .add_to_category(user, category.id, fav.id)
            .await
            .unwrap();
        h.curation.add_comment(user, fav.id, "great bassline").await.unwrap();

        h.curation.remove_favorite(user, "t1").await.unwrap();

        assert!(h.curation.check_favorite(user, "t1").await.unwrap().is_none());
        let members = h
            .curation
            .category_favorites(user, category.id, PageRequest::default())
            .await
            .unwrap();
        assert_eq!(members.total, 0);

        let err = h.curation.remove_favorite(user, "t1").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_category_names_unique_per_user() {
        let h = harness();
        let user = Uuid::new_v4();
        let chill = h.curation.create_category(user, "Chill").await.unwrap();
        let gym = h.curation.create_category(user, "Gym").await.unwrap();

        let err = h.curation.create_category(user, " Chill ").await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let err = h
            .curation
            .rename_category(user, gym.id, "Chill")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        // renaming to its own name is fine
        let renamed = h
            .curation
            .rename_category(user, chill.id, "Chill")
            .await
            .unwrap();
        assert_eq!(renamed.name, "Chill");

        h.curation
            .create_category(Uuid::new_v4(), "Chill")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_category_membership() {
        let h = harness();
        let user = Uuid::new_v4();
        let fav = h.curation.add_favorite(user, new_favorite("t1")).await.unwrap();
        let category = h.curation.create_category(user, "Road trip").await.unwrap();

        let updated = h
            .curation
            .add_to_category(user, category.id, fav.id)
            .await
            .unwrap();
        assert!(updated.contains(fav.id));

        let err = h
            .curation
            .add_to_category(user, category.id, fav.id)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let err = h
            .curation
            .add_to_category(user, category.id, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));

        h.curation
            .remove_from_category(user, category.id, fav.id)
            .await
            .unwrap();
        let err = h
            .curation
            .remove_from_category(user, category.id, fav.id)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_foreign_category_is_not_found() {
        let h = harness();
        let owner = Uuid::new_v4();
        let category = h.curation.create_category(owner, "Mine").await.unwrap();

        let intruder = Uuid::new_v4();
        let err = h
            .curation
            .delete_category(intruder, category.id)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_comment_lifecycle() {
        let h = harness();
        let user = Uuid::new_v4();
        let fav = h.curation.add_favorite(user, new_favorite("t1")).await.unwrap();

        let err = h.curation.add_comment(user, fav.id, "  ").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));

        let err = h
            .curation
            .add_comment(user, Uuid::new_v4(), "hello")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));

        let comment = h.curation.add_comment(user, fav.id, " first ").await.unwrap();
        assert_eq!(comment.text, "first");

        let updated = h
            .curation
            .update_comment(user, comment.id, "edited")
            .await
            .unwrap();
        assert_eq!(updated.text, "edited");

        let page = h
            .curation
            .list_comments(user, fav.id, PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);

        let err = h
            .curation
            .delete_comment(Uuid::new_v4(), comment.id)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));

        h.curation.delete_comment(user, comment.id).await.unwrap();
    }
}
