use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod adapters;
mod application;
mod auth;
mod config;
mod error;
mod models;
mod routes;
#[cfg(test)]
mod test_support;

use adapters::{
    GeminiProvider, PgCategoryRepository, PgCommentRepository, PgCredentialStore,
    PgFavoriteRepository, PgRecommendationRepository, SpotifyCatalog,
};
use application::{
    CurationService, DiscoveryService, RecommendationGenerator, RecommendationResolver,
};
use auth::JwtVerifier;
use config::ServerConfig;
use encore::{CatalogSearch, LabeledBlockParser};

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub discovery: Arc<DiscoveryService>,
    pub curation: Arc<CurationService>,
    pub catalog: Arc<dyn CatalogSearch>,
    pub jwt: Arc<JwtVerifier>,
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "Encore API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Full HTTP surface. Everything except health and docs requires a bearer token.
pub fn build_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .merge(routes::discovery::router())
        .merge(routes::catalog::router())
        .merge(routes::curation::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    let openapi = routes::swagger::ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[shuttle_runtime::main]
async fn main(
    #[shuttle_shared_db::Postgres] pool: PgPool,
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    tracing::info!("🎵 Encore API initializing...");

    let config = ServerConfig::from_secrets(&secrets).map_err(anyhow::Error::new)?;

    sqlx::migrate!()
        .run(&pool)
        .await
        .map_err(anyhow::Error::new)?;

    tracing::info!("✅ Database migrations completed");

    // Repositories
    let recommendations = Arc::new(PgRecommendationRepository::new(pool.clone()));
    let favorites = Arc::new(PgFavoriteRepository::new(pool.clone()));
    let categories = Arc::new(PgCategoryRepository::new(pool.clone()));
    let comments = Arc::new(PgCommentRepository::new(pool.clone()));
    let credentials = Arc::new(PgCredentialStore::new(pool));

    // External services
    let llm = Arc::new(
        GeminiProvider::new(
            config.gemini_api_key.clone(),
            config.gemini_model.clone(),
            config.http_timeout,
        )
        .map_err(anyhow::Error::new)?,
    );
    tracing::info!("🤖 LLM provider initialized (Gemini {})", config.gemini_model);

    let catalog: Arc<dyn CatalogSearch> = Arc::new(
        SpotifyCatalog::new(
            config.spotify_api_base.clone(),
            config.spotify_market.clone(),
            credentials,
            config.http_timeout,
        )
        .map_err(anyhow::Error::new)?,
    );
    tracing::info!(
        "🔍 Catalog search initialized ({}, market {})",
        config.spotify_api_base,
        config.spotify_market
    );

    // Application services
    let discovery = DiscoveryService::new(
        RecommendationGenerator::new(llm),
        Arc::new(LabeledBlockParser),
        RecommendationResolver::new(catalog.clone(), config.resolver_concurrency),
        recommendations,
        favorites.clone(),
    );
    let curation = CurationService::new(favorites, categories, comments);

    let state = AppState {
        discovery: Arc::new(discovery),
        curation: Arc::new(curation),
        catalog,
        jwt: Arc::new(JwtVerifier::new(&config.jwt_secret)),
    };

    let router = build_router(state);

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ Encore API ready");

    Ok(router.into())
}
