//! Recommendation Repository Port

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, Rating, Recommendation, RecommendationSummary};

/// Repository interface for Recommendation aggregates
#[async_trait]
pub trait RecommendationRepository: Send + Sync {
    /// Insert a new recommendation (always an insert, never an upsert)
    async fn create(&self, recommendation: &Recommendation) -> Result<Recommendation, DomainError>;

    /// Find a recommendation owned by `user_id`
    async fn find_by_id(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Recommendation>, DomainError>;

    /// Newest-first summaries, at most `limit`
    async fn list_by_user(
        &self,
        user_id: Uuid,
        limit: u32,
    ) -> Result<Vec<RecommendationSummary>, DomainError>;

    /// Overwrite the rating; returns false when no owned record matched
    async fn set_rating(&self, user_id: Uuid, id: Uuid, rating: Rating)
        -> Result<bool, DomainError>;
}
