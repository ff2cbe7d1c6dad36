//! Recommendation - AI-generated discovery and its catalog resolution
//!
//! A Recommendation is created once, at the end of a generation, and keeps
//! everything needed to audit it: the user's text, the favorites digest
//! that fed the prompt, the prompt itself and the raw model reply.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::Rating;

/// Reduced snapshot of a favorite used as generation context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteDigest {
    pub catalog_track_id: String,
    pub track_name: String,
    pub artist_name: String,
}

/// Track/artist pair extracted from generated text, not yet verified
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCandidate {
    pub track_name: String,
    pub artist_name: String,
    pub explanation: Option<String>,
}

/// Candidate matched to a real catalog track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRecommendation {
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

/// Persisted aggregate of one discovery request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_input: String,
    pub favorites_digest: Vec<FavoriteDigest>,
    pub prompt_text: String,
    pub raw_response_text: String,
    pub resolved_tracks: Vec<ResolvedRecommendation>,
    pub satisfaction_rating: Option<Rating>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// List-view projection of a Recommendation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationSummary {
    pub id: Uuid,
    pub user_input: String,
    pub recommendations_count: usize,
    pub satisfaction_rating: Option<Rating>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Recommendation {
    /// Create a new, unrated Recommendation with generated ID and timestamps
    pub fn new(
        user_id: Uuid,
        user_input: String,
        favorites_digest: Vec<FavoriteDigest>,
        prompt_text: String,
        raw_response_text: String,
        resolved_tracks: Vec<ResolvedRecommendation>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            user_input,
            favorites_digest,
            prompt_text,
            raw_response_text,
            resolved_tracks,
            satisfaction_rating: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_rated(&self) -> bool {
        self.satisfaction_rating.is_some()
    }

    pub fn summary(&self) -> RecommendationSummary {
        RecommendationSummary {
            id: self.id,
            user_input: self.user_input.clone(),
            recommendations_count: self.resolved_tracks.len(),
            satisfaction_rating: self.satisfaction_rating,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
