//! Catalog Search Port
//!
//! Abstract interface for the music catalog (track search).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::DomainError;

/// A track as listed by the catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogTrack {
    pub id: String,
    pub name: String,
    /// Artist names in catalog order
    pub artists: Vec<String>,
    pub album_name: Option<String>,
    /// First (largest) album image
    pub album_image_url: Option<String>,
    pub preview_url: Option<String>,
    pub external_url: Option<String>,
    pub duration_ms: Option<u64>,
    pub popularity: Option<u32>,
    pub explicit: Option<bool>,
}

impl CatalogTrack {
    pub fn primary_artist(&self) -> Option<&str> {
        self.artists.first().map(String::as_str)
    }
}

/// Service interface for catalog track search
#[async_trait]
pub trait CatalogSearch: Send + Sync {
    /// Search tracks on behalf of `owner`, in catalog order.
    ///
    /// Upstream failures surface as `CatalogSearchFailed`.
    async fn search_tracks(
        &self,
        owner: Uuid,
        query: &str,
        limit: u32,
    ) -> Result<Vec<CatalogTrack>, DomainError>;
}
