//! Catalog - track search

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use encore::CatalogTrack;

pub const DEFAULT_SEARCH_LIMIT: u32 = 20;
pub const MAX_SEARCH_LIMIT: u32 = 50;

#[derive(Debug, Default, Deserialize)]
pub struct TrackSearchQuery {
    pub q: Option<String>,
    pub limit: Option<String>,
}

impl TrackSearchQuery {
    /// Absent, unparseable or zero falls back to the default; capped at 50
    pub fn limit(&self) -> u32 {
        self.limit
            .as_deref()
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|n| *n >= 1)
            .unwrap_or(DEFAULT_SEARCH_LIMIT)
            .min(MAX_SEARCH_LIMIT)
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrackResponse {
    pub id: String,
    pub name: String,
    pub artists: Vec<String>,
    pub album_name: Option<String>,
    pub album_image_url: Option<String>,
    pub preview_url: Option<String>,
    pub external_url: Option<String>,
    pub duration_ms: Option<u64>,
    pub popularity: Option<u32>,
    pub explicit: Option<bool>,
}

impl From<CatalogTrack> for TrackResponse {
    fn from(track: CatalogTrack) -> Self {
        Self {
            id: track.id,
            name: track.name,
            artists: track.artists,
            album_name: track.album_name,
            album_image_url: track.album_image_url,
            preview_url: track.preview_url,
            external_url: track.external_url,
            duration_ms: track.duration_ms,
            popularity: track.popularity,
            explicit: track.explicit,
        }
    }
}
