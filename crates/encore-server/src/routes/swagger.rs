//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::models::{
    // Curation models
    AddFavoriteRequest,
    CategoriesPage,
    CategoryRequest,
    CategoryResponse,
    CheckFavoriteResponse,
    CommentRequest,
    CommentResponse,
    CommentsPage,
    FavoriteResponse,
    FavoritesPage,
    // Discovery models
    GenerateRequest,
    GenerateResponse,
    MessageResponse,
    Pagination,
    RateRequest,
    RecommendationResponse,
    RecommendationSummaryResponse,
    RecommendedTrack,
    // Catalog models
    TrackResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Discovery endpoints
        super::discovery::generate,
        super::discovery::history,
        super::discovery::get_recommendation,
        super::discovery::rate_recommendation,
        // Catalog endpoints
        super::catalog::search_tracks,
        // Favorite endpoints
        super::curation::add_favorite,
        super::curation::list_favorites,
        super::curation::check_favorite,
        super::curation::remove_favorite,
        // Category endpoints
        super::curation::create_category,
        super::curation::list_categories,
        super::curation::rename_category,
        super::curation::delete_category,
        super::curation::category_favorites,
        super::curation::add_to_category,
        super::curation::remove_from_category,
        // Comment endpoints
        super::curation::add_comment,
        super::curation::list_comments,
        super::curation::update_comment,
        super::curation::delete_comment,
    ),
    info(
        title = "Encore API",
        version = "0.1.0",
        description = "AI music discovery - describe a mood, get playable tracks.\n\nRecommendations are generated by an LLM and resolved against the streaming catalog.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Discovery", description = "Discovery - LLM recommendations and their history"),
        (name = "Catalog", description = "Catalog - Track search"),
        (name = "Favorites", description = "Favorites - Saved tracks"),
        (name = "Categories", description = "Categories - User-defined favorite groups"),
        (name = "Comments", description = "Comments - Notes on favorites"),
    ),
    components(
        schemas(
            // Discovery
            GenerateRequest,
            GenerateResponse,
            RecommendedTrack,
            RecommendationResponse,
            RecommendationSummaryResponse,
            RateRequest,
            MessageResponse,
            // Catalog
            TrackResponse,
            // Curation
            Pagination,
            AddFavoriteRequest,
            FavoriteResponse,
            FavoritesPage,
            CheckFavoriteResponse,
            CategoryRequest,
            CategoryResponse,
            CategoriesPage,
            CommentRequest,
            CommentResponse,
            CommentsPage,
        )
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` scheme referenced by protected paths
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
