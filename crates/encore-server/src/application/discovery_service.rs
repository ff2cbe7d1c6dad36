//! Discovery Application Service (Use Case)
//!
//! Generate, list, read and rate AI music recommendations.

use std::sync::Arc;
use uuid::Uuid;

use encore::{
    DomainError, FavoriteRepository, Rating, Recommendation, RecommendationParser,
    RecommendationRepository, RecommendationSummary, UserInput,
};

use super::{RecommendationGenerator, RecommendationResolver};

/// Most recent favorites fed into the prompt
pub const FAVORITES_DIGEST_LIMIT: u32 = 10;
pub const DEFAULT_HISTORY_LIMIT: u32 = 10;
pub const MAX_HISTORY_LIMIT: u32 = 50;

/// History page size: absent or < 1 falls back to the default, > 50 is rejected
pub fn history_limit(requested: Option<i64>) -> Result<u32, DomainError> {
    match requested {
        Some(n) if n > MAX_HISTORY_LIMIT as i64 => Err(DomainError::invalid(format!(
            "limit must be at most {}",
            MAX_HISTORY_LIMIT
        ))),
        Some(n) if n >= 1 => Ok(n as u32),
        _ => Ok(DEFAULT_HISTORY_LIMIT),
    }
}

pub struct DiscoveryService {
    generator: RecommendationGenerator,
    parser: Arc<dyn RecommendationParser>,
    resolver: RecommendationResolver,
    recommendations: Arc<dyn RecommendationRepository>,
    favorites: Arc<dyn FavoriteRepository>,
}

impl DiscoveryService {
    pub fn new(
        generator: RecommendationGenerator,
        parser: Arc<dyn RecommendationParser>,
        resolver: RecommendationResolver,
        recommendations: Arc<dyn RecommendationRepository>,
        favorites: Arc<dyn FavoriteRepository>,
    ) -> Self {
        Self {
            generator,
            parser,
            resolver,
            recommendations,
            favorites,
        }
    }

    /// Run the full pipeline and persist the exchange.
    ///
    /// The insert is the last step, so a failed generation stores nothing.
    pub async fn generate(
        &self,
        user_id: Uuid,
        user_input: &str,
    ) -> Result<Recommendation, DomainError> {
        let user_input = UserInput::parse(user_input)?;

        let digest = self
            .favorites
            .recent_digest(user_id, FAVORITES_DIGEST_LIMIT)
            .await?;

        let generated = self.generator.generate(user_input.as_str(), &digest).await?;
        let candidates = self.parser.parse(&generated.raw_response_text);
        let resolved = self.resolver.resolve(user_id, &candidates).await;

        let recommendation = Recommendation::new(
            user_id,
            user_input.into_inner(),
            digest,
            generated.prompt_text,
            generated.raw_response_text,
            resolved,
        );
        let saved = self.recommendations.create(&recommendation).await?;

        tracing::info!(
            "Created recommendation {} for user {} ({} tracks)",
            saved.id,
            user_id,
            saved.resolved_tracks.len()
        );

        Ok(saved)
    }

    /// Newest first
    pub async fn history(
        &self,
        user_id: Uuid,
        limit: Option<i64>,
    ) -> Result<Vec<RecommendationSummary>, DomainError> {
        let limit = history_limit(limit)?;
        self.recommendations.list_by_user(user_id, limit).await
    }

    /// Records owned by other users are reported as not found
    pub async fn get(&self, user_id: Uuid, id: Uuid) -> Result<Recommendation, DomainError> {
        self.recommendations
            .find_by_id(user_id, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Recommendation", id))
    }

    /// Overwrite the satisfaction rating (last write wins)
    pub async fn rate(&self, user_id: Uuid, id: Uuid, rating: i64) -> Result<Rating, DomainError> {
        let rating = Rating::new(rating)?;

        if !self.recommendations.set_rating(user_id, id, rating).await? {
            return Err(DomainError::not_found("Recommendation", id));
        }

        tracing::info!("Rated recommendation {} with {}", id, rating);
        Ok(rating)
    }
}
