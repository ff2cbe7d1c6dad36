//! Curation Routes - favorites, categories and comments
//!
//! HTTP handlers that delegate to CurationService.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};

use super::{json_body, parse_id};
use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::models::{
    AddFavoriteRequest, CategoriesPage, CategoryRequest, CategoryResponse, CheckFavoriteResponse,
    CommentRequest, CommentResponse, CommentsPage, FavoriteResponse, FavoritesPage,
    MessageResponse, PageQuery,
};
use crate::AppState;

// ============================================
// Favorites
// ============================================

/// Save a track as favorite
#[utoipa::path(
    post,
    path = "/api/curation/favorites",
    request_body = AddFavoriteRequest,
    responses(
        (status = 201, description = "Favorite saved", body = FavoriteResponse),
        (status = 400, description = "Missing catalogTrackId"),
        (status = 409, description = "Already a favorite")
    ),
    security(("bearer_auth" = [])),
    tag = "Favorites"
)]
pub async fn add_favorite(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<AddFavoriteRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<FavoriteResponse>)> {
    let request = json_body(payload)?;
    let favorite = state
        .curation
        .add_favorite(user.user_id, request.into())
        .await?;

    Ok((StatusCode::CREATED, Json(favorite.into())))
}

/// List favorites, newest first
#[utoipa::path(
    get,
    path = "/api/curation/favorites",
    params(
        ("page" = Option<u32>, Query, description = "Page number (default 1)"),
        ("limit" = Option<u32>, Query, description = "Page size (default 20, max 100)")
    ),
    responses(
        (status = 200, description = "Favorites", body = FavoritesPage)
    ),
    security(("bearer_auth" = [])),
    tag = "Favorites"
)]
pub async fn list_favorites(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<FavoritesPage>> {
    let page = state
        .curation
        .list_favorites(user.user_id, query.to_request())
        .await?;

    Ok(Json(page.into()))
}

/// Check whether a catalog track is a favorite
#[utoipa::path(
    get,
    path = "/api/curation/favorites/check/{id}",
    params(
        ("id" = String, Path, description = "Catalog track ID")
    ),
    responses(
        (status = 200, description = "Favorite status", body = CheckFavoriteResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Favorites"
)]
pub async fn check_favorite(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(track_id): Path<String>,
) -> ApiResult<Json<CheckFavoriteResponse>> {
    let favorite = state
        .curation
        .check_favorite(user.user_id, &track_id)
        .await?;

    Ok(Json(CheckFavoriteResponse {
        is_favorite: favorite.is_some(),
        favorite: favorite.map(Into::into),
    }))
}

/// Remove a favorite by catalog track ID
#[utoipa::path(
    delete,
    path = "/api/curation/favorites/{id}",
    params(
        ("id" = String, Path, description = "Catalog track ID")
    ),
    responses(
        (status = 200, description = "Favorite removed", body = MessageResponse),
        (status = 404, description = "Not a favorite")
    ),
    security(("bearer_auth" = [])),
    tag = "Favorites"
)]
pub async fn remove_favorite(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(track_id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .curation
        .remove_favorite(user.user_id, &track_id)
        .await?;

    Ok(Json(MessageResponse::new("Favorite removed")))
}

// ============================================
// Comments
// ============================================

/// Comment on a favorite
#[utoipa::path(
    post,
    path = "/api/curation/favorites/{id}/comments",
    params(
        ("id" = String, Path, description = "Favorite ID (UUID)")
    ),
    request_body = CommentRequest,
    responses(
        (status = 201, description = "Comment added", body = CommentResponse),
        (status = 400, description = "Blank or too long text"),
        (status = 404, description = "Favorite not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Comments"
)]
pub async fn add_comment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(favorite_id): Path<String>,
    payload: Result<Json<CommentRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CommentResponse>)> {
    let favorite_id = parse_id(&favorite_id, "favorite")?;
    let request = json_body(payload)?;

    let comment = state
        .curation
        .add_comment(user.user_id, favorite_id, &request.text)
        .await?;

    Ok((StatusCode::CREATED, Json(comment.into())))
}

/// List comments of a favorite, newest first
#[utoipa::path(
    get,
    path = "/api/curation/favorites/{id}/comments",
    params(
        ("id" = String, Path, description = "Favorite ID (UUID)"),
        ("page" = Option<u32>, Query, description = "Page number (default 1)"),
        ("limit" = Option<u32>, Query, description = "Page size (default 20, max 100)")
    ),
    responses(
        (status = 200, description = "Comments", body = CommentsPage),
        (status = 404, description = "Favorite not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Comments"
)]
pub async fn list_comments(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(favorite_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<CommentsPage>> {
    let favorite_id = parse_id(&favorite_id, "favorite")?;
    let page = state
        .curation
        .list_comments(user.user_id, favorite_id, query.to_request())
        .await?;

    Ok(Json(page.into()))
}

/// Edit a comment
#[utoipa::path(
    put,
    path = "/api/curation/comments/{id}",
    params(
        ("id" = String, Path, description = "Comment ID (UUID)")
    ),
    request_body = CommentRequest,
    responses(
        (status = 200, description = "Comment updated", body = CommentResponse),
        (status = 400, description = "Blank or too long text"),
        (status = 404, description = "Comment not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Comments"
)]
pub async fn update_comment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    payload: Result<Json<CommentRequest>, JsonRejection>,
) -> ApiResult<Json<CommentResponse>> {
    let id = parse_id(&id, "comment")?;
    let request = json_body(payload)?;

    let comment = state
        .curation
        .update_comment(user.user_id, id, &request.text)
        .await?;

    Ok(Json(comment.into()))
}

/// Delete a comment
#[utoipa::path(
    delete,
    path = "/api/curation/comments/{id}",
    params(
        ("id" = String, Path, description = "Comment ID (UUID)")
    ),
    responses(
        (status = 200, description = "Comment deleted", body = MessageResponse),
        (status = 404, description = "Comment not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Comments"
)]
pub async fn delete_comment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_id(&id, "comment")?;
    state.curation.delete_comment(user.user_id, id).await?;

    Ok(Json(MessageResponse::new("Comment deleted")))
}

// ============================================
// Categories
// ============================================

/// Create a category
#[utoipa::path(
    post,
    path = "/api/curation/categories",
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Blank or too long name"),
        (status = 409, description = "Name already used")
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
pub async fn create_category(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<CategoryRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CategoryResponse>)> {
    let request = json_body(payload)?;
    let category = state
        .curation
        .create_category(user.user_id, &request.name)
        .await?;

    Ok((StatusCode::CREATED, Json(category.into())))
}

/// List categories, newest first
#[utoipa::path(
    get,
    path = "/api/curation/categories",
    params(
        ("page" = Option<u32>, Query, description = "Page number (default 1)"),
        ("limit" = Option<u32>, Query, description = "Page size (default 20, max 100)")
    ),
    responses(
        (status = 200, description = "Categories", body = CategoriesPage)
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
pub async fn list_categories(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<CategoriesPage>> {
    let page = state
        .curation
        .list_categories(user.user_id, query.to_request())
        .await?;

    Ok(Json(page.into()))
}

/// Rename a category
#[utoipa::path(
    put,
    path = "/api/curation/categories/{id}",
    params(
        ("id" = String, Path, description = "Category ID (UUID)")
    ),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Category renamed", body = CategoryResponse),
        (status = 400, description = "Blank or too long name"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Name already used")
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
pub async fn rename_category(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    payload: Result<Json<CategoryRequest>, JsonRejection>,
) -> ApiResult<Json<CategoryResponse>> {
    let id = parse_id(&id, "category")?;
    let request = json_body(payload)?;

    let category = state
        .curation
        .rename_category(user.user_id, id, &request.name)
        .await?;

    Ok(Json(category.into()))
}

/// Delete a category (its favorites are kept)
#[utoipa::path(
    delete,
    path = "/api/curation/categories/{id}",
    params(
        ("id" = String, Path, description = "Category ID (UUID)")
    ),
    responses(
        (status = 200, description = "Category deleted", body = MessageResponse),
        (status = 404, description = "Category not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
pub async fn delete_category(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_id(&id, "category")?;
    state.curation.delete_category(user.user_id, id).await?;

    Ok(Json(MessageResponse::new("Category deleted")))
}

/// List the favorites of a category, newest first
#[utoipa::path(
    get,
    path = "/api/curation/categories/{id}/favorites",
    params(
        ("id" = String, Path, description = "Category ID (UUID)"),
        ("page" = Option<u32>, Query, description = "Page number (default 1)"),
        ("limit" = Option<u32>, Query, description = "Page size (default 20, max 100)")
    ),
    responses(
        (status = 200, description = "Favorites in the category", body = FavoritesPage),
        (status = 404, description = "Category not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
pub async fn category_favorites(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<FavoritesPage>> {
    let id = parse_id(&id, "category")?;
    let page = state
        .curation
        .category_favorites(user.user_id, id, query.to_request())
        .await?;

    Ok(Json(page.into()))
}

/// Add a favorite to a category
#[utoipa::path(
    post,
    path = "/api/curation/categories/{id}/favorites/{favorite_id}",
    params(
        ("id" = String, Path, description = "Category ID (UUID)"),
        ("favorite_id" = String, Path, description = "Favorite ID (UUID)")
    ),
    responses(
        (status = 200, description = "Favorite added", body = CategoryResponse),
        (status = 404, description = "Category or favorite not found"),
        (status = 409, description = "Already in the category")
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
pub async fn add_to_category(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((id, favorite_id)): Path<(String, String)>,
) -> ApiResult<Json<CategoryResponse>> {
    let id = parse_id(&id, "category")?;
    let favorite_id = parse_id(&favorite_id, "favorite")?;

    let category = state
        .curation
        .add_to_category(user.user_id, id, favorite_id)
        .await?;

    Ok(Json(category.into()))
}

/// Remove a favorite from a category
#[utoipa::path(
    delete,
    path = "/api/curation/categories/{id}/favorites/{favorite_id}",
    params(
        ("id" = String, Path, description = "Category ID (UUID)"),
        ("favorite_id" = String, Path, description = "Favorite ID (UUID)")
    ),
    responses(
        (status = 200, description = "Favorite removed from category", body = MessageResponse),
        (status = 404, description = "Category not found or favorite not a member")
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
pub async fn remove_from_category(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((id, favorite_id)): Path<(String, String)>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_id(&id, "category")?;
    let favorite_id = parse_id(&favorite_id, "favorite")?;

    state
        .curation
        .remove_from_category(user.user_id, id, favorite_id)
        .await?;

    Ok(Json(MessageResponse::new("Favorite removed from category")))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/curation/favorites",
            get(list_favorites).post(add_favorite),
        )
        .route("/api/curation/favorites/check/:id", get(check_favorite))
        .route("/api/curation/favorites/:id", delete(remove_favorite))
        .route(
            "/api/curation/favorites/:id/comments",
            get(list_comments).post(add_comment),
        )
        .route(
            "/api/curation/comments/:id",
            put(update_comment).delete(delete_comment),
        )
        .route(
            "/api/curation/categories",
            get(list_categories).post(create_category),
        )
        .route(
            "/api/curation/categories/:id",
            put(rename_category).delete(delete_category),
        )
        .route(
            "/api/curation/categories/:id/favorites",
            get(category_favorites),
        )
        .route(
            "/api/curation/categories/:id/favorites/:favorite_id",
            post(add_to_category).delete(remove_from_category),
        )
}
