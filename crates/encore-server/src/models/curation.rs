//! Curation - favorites, categories and comments

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use encore::{Category, Comment, Favorite, NewFavorite, Page, PageRequest};

/// Paging query; unparseable values fall back to the defaults
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl PageQuery {
    pub fn to_request(&self) -> PageRequest {
        let parse = |raw: &Option<String>| raw.as_deref().and_then(|s| s.trim().parse::<u32>().ok());
        PageRequest::new(parse(&self.page), parse(&self.limit))
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> From<&Page<T>> for Pagination {
    fn from(page: &Page<T>) -> Self {
        Self {
            page: page.page,
            limit: page.limit,
            total: page.total,
            pages: page.pages(),
            has_next: page.has_next(),
            has_prev: page.has_prev(),
        }
    }
}

// ============================================
// Favorites
// ============================================

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddFavoriteRequest {
    pub catalog_track_id: String,
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
    pub album_image_url: Option<String>,
}

impl From<AddFavoriteRequest> for NewFavorite {
    fn from(req: AddFavoriteRequest) -> Self {
        Self {
            catalog_track_id: req.catalog_track_id,
            track_name: req.track_name,
            artist_name: req.artist_name,
            album_image_url: req.album_image_url,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteResponse {
    pub id: Uuid,
    pub catalog_track_id: String,
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
    pub album_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Favorite> for FavoriteResponse {
    fn from(fav: Favorite) -> Self {
        Self {
            id: fav.id,
            catalog_track_id: fav.catalog_track_id,
            track_name: fav.track_name,
            artist_name: fav.artist_name,
            album_image_url: fav.album_image_url,
            created_at: fav.created_at,
            updated_at: fav.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FavoritesPage {
    pub favorites: Vec<FavoriteResponse>,
    pub pagination: Pagination,
}

impl From<Page<Favorite>> for FavoritesPage {
    fn from(page: Page<Favorite>) -> Self {
        let pagination = Pagination::from(&page);
        Self {
            favorites: page.items.into_iter().map(Into::into).collect(),
            pagination,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckFavoriteResponse {
    pub is_favorite: bool,
    pub favorite: Option<FavoriteResponse>,
}

// ============================================
// Categories
// ============================================

#[derive(Debug, Deserialize, ToSchema)]
pub struct CategoryRequest {
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub favorite_ids: Vec<Uuid>,
    pub favorites_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            favorites_count: category.favorite_ids.len(),
            favorite_ids: category.favorite_ids,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoriesPage {
    pub categories: Vec<CategoryResponse>,
    pub pagination: Pagination,
}

impl From<Page<Category>> for CategoriesPage {
    fn from(page: Page<Category>) -> Self {
        let pagination = Pagination::from(&page);
        Self {
            categories: page.items.into_iter().map(Into::into).collect(),
            pagination,
        }
    }
}

// ============================================
// Comments
// ============================================

#[derive(Debug, Deserialize, ToSchema)]
pub struct CommentRequest {
    pub text: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Uuid,
    pub favorite_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            favorite_id: comment.favorite_id,
            text: comment.text,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CommentsPage {
    pub comments: Vec<CommentResponse>,
    pub pagination: Pagination,
}

impl From<Page<Comment>> for CommentsPage {
    fn from(page: Page<Comment>) -> Self {
        let pagination = Pagination::from(&page);
        Self {
            comments: page.items.into_iter().map(Into::into).collect(),
            pagination,
        }
    }
}
