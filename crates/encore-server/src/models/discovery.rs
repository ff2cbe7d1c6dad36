//! Discovery - AI recommendation requests

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use encore::{Recommendation, RecommendationSummary, ResolvedRecommendation};

/// Generate recommendations request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Mood or request, 1-500 characters
    pub user_input: String,
}

/// Rate a recommendation
#[derive(Debug, Deserialize, ToSchema)]
pub struct RateRequest {
    /// Integer from 1 to 5
    pub rating: i64,
}

/// History query; `limit` is kept raw so non-numeric values fall back to the default
#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<String>,
}

/// A recommended track resolved against the catalog
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedTrack {
    pub catalog_track_id: String,
    pub track_name: String,
    pub artist_name: String,
    pub album_name: Option<String>,
    pub album_image_url: Option<String>,
    pub preview_url: Option<String>,
    pub catalog_url: Option<String>,
    pub duration_ms: Option<u64>,
    pub popularity: Option<u32>,
    pub explicit: Option<bool>,
    pub explanation: Option<String>,
}

impl From<ResolvedRecommendation> for RecommendedTrack {
    fn from(track: ResolvedRecommendation) -> Self {
        Self {
            catalog_track_id: track.catalog_track_id,
            track_name: track.track_name,
            artist_name: track.artist_name,
            album_name: track.album_name,
            album_image_url: track.album_image_url,
            preview_url: track.preview_url,
            catalog_url: track.catalog_url,
            duration_ms: track.duration_ms,
            popularity: track.popularity,
            explicit: track.explicit,
            explanation: track.explanation,
        }
    }
}

/// Freshly generated recommendation
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub id: Uuid,
    pub user_input: String,
    pub recommendations: Vec<RecommendedTrack>,
    pub created_at: DateTime<Utc>,
}

impl From<Recommendation> for GenerateResponse {
    fn from(rec: Recommendation) -> Self {
        Self {
            id: rec.id,
            user_input: rec.user_input,
            recommendations: rec.resolved_tracks.into_iter().map(Into::into).collect(),
            created_at: rec.created_at,
        }
    }
}

/// Stored recommendation
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub id: Uuid,
    pub user_input: String,
    pub recommendations: Vec<RecommendedTrack>,
    pub satisfaction_rating: Option<u8>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Recommendation> for RecommendationResponse {
    fn from(rec: Recommendation) -> Self {
        Self {
            id: rec.id,
            user_input: rec.user_input,
            recommendations: rec.resolved_tracks.into_iter().map(Into::into).collect(),
            satisfaction_rating: rec.satisfaction_rating.map(|r| r.value()),
            created_at: rec.created_at,
            updated_at: rec.updated_at,
        }
    }
}

/// History entry
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationSummaryResponse {
    pub id: Uuid,
    pub user_input: String,
    pub recommendations_count: usize,
    pub satisfaction_rating: Option<u8>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RecommendationSummary> for RecommendationSummaryResponse {
    fn from(summary: RecommendationSummary) -> Self {
        Self {
            id: summary.id,
            user_input: summary.user_input,
            recommendations_count: summary.recommendations_count,
            satisfaction_rating: summary.satisfaction_rating.map(|r| r.value()),
            created_at: summary.created_at,
            updated_at: summary.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
