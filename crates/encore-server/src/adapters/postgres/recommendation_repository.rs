//! PostgreSQL implementation of RecommendationRepository

use async_trait::async_trait;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use encore::{
    DomainError, FavoriteDigest, Rating, Recommendation, RecommendationRepository,
    RecommendationSummary, ResolvedRecommendation,
};

use super::map_sqlx_error;

pub struct PgRecommendationRepository {
    pool: PgPool,
}

impl PgRecommendationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct RecommendationRow {
    id: Uuid,
    user_id: Uuid,
    user_input: String,
    favorites_digest: Json<Vec<FavoriteDigest>>,
    prompt_text: String,
    raw_response_text: String,
    resolved_tracks: Json<Vec<ResolvedRecommendation>>,
    satisfaction_rating: Option<i16>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<RecommendationRow> for Recommendation {
    type Error = DomainError;

    fn try_from(row: RecommendationRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            user_input: row.user_input,
            favorites_digest: row.favorites_digest.0,
            prompt_text: row.prompt_text,
            raw_response_text: row.raw_response_text,
            resolved_tracks: row.resolved_tracks.0,
            satisfaction_rating: to_rating(row.satisfaction_rating)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SummaryRow {
    id: Uuid,
    user_input: String,
    recommendations_count: i32,
    satisfaction_rating: Option<i16>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<SummaryRow> for RecommendationSummary {
    type Error = DomainError;

    fn try_from(row: SummaryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            user_input: row.user_input,
            recommendations_count: row.recommendations_count.max(0) as usize,
            satisfaction_rating: to_rating(row.satisfaction_rating)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn to_rating(value: Option<i16>) -> Result<Option<Rating>, DomainError> {
    value
        .map(|v| Rating::new(v as i64))
        .transpose()
        .map_err(|e| DomainError::persistence(format!("corrupt rating: {}", e)))
}

#[async_trait]
impl RecommendationRepository for PgRecommendationRepository {
    async fn create(&self, recommendation: &Recommendation) -> Result<Recommendation, DomainError> {
        let row = sqlx::query_as::<_, RecommendationRow>(
            r#"
            INSERT INTO recommendations
                (id, user_id, user_input, favorites_digest, prompt_text, raw_response_text,
                 resolved_tracks, satisfaction_rating, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(recommendation.id)
        .bind(recommendation.user_id)
        .bind(&recommendation.user_input)
        .bind(Json(&recommendation.favorites_digest))
        .bind(&recommendation.prompt_text)
        .bind(&recommendation.raw_response_text)
        .bind(Json(&recommendation.resolved_tracks))
        .bind(recommendation.satisfaction_rating.map(|r| r.value() as i16))
        .bind(recommendation.created_at)
        .bind(recommendation.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Recommendation::try_from(row)
    }

    async fn find_by_id(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Recommendation>, DomainError> {
        let row = sqlx::query_as::<_, RecommendationRow>(
            "SELECT * FROM recommendations WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(Recommendation::try_from).transpose()
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        limit: u32,
    ) -> Result<Vec<RecommendationSummary>, DomainError> {
        let rows = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT id, user_input,
                   jsonb_array_length(resolved_tracks) AS recommendations_count,
                   satisfaction_rating, created_at, updated_at
            FROM recommendations
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.into_iter()
            .map(RecommendationSummary::try_from)
            .collect()
    }

    async fn set_rating(
        &self,
        user_id: Uuid,
        id: Uuid,
        rating: Rating,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE recommendations
            SET satisfaction_rating = $3, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(rating.value() as i16)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}
