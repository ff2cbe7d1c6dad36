//! Catalog Routes - track search

use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::models::{TrackResponse, TrackSearchQuery};
use crate::AppState;

/// Search catalog tracks
#[utoipa::path(
    get,
    path = "/api/tracks/search",
    params(
        ("q" = String, Query, description = "Free-text search query"),
        ("limit" = Option<u32>, Query, description = "Results to return (default 20, max 50)")
    ),
    responses(
        (status = 200, description = "Matching tracks in catalog order", body = Vec<TrackResponse>),
        (status = 400, description = "Empty query"),
        (status = 502, description = "Catalog unavailable")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn search_tracks(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<TrackSearchQuery>,
) -> ApiResult<Json<Vec<TrackResponse>>> {
    let q = query.q.as_deref().map(str::trim).unwrap_or_default();
    if q.is_empty() {
        return Err(ApiError::bad_request("Search query is required"));
    }

    let tracks = state
        .catalog
        .search_tracks(user.user_id, q, query.limit())
        .await?;

    Ok(Json(tracks.into_iter().map(Into::into).collect()))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/tracks/search", get(search_tracks))
}
