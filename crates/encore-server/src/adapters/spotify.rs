//! Spotify Web API catalog search.
//!
//! Searches on behalf of a user with the access token the credential
//! provider holds for them.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use encore::{CatalogSearch, CatalogTrack, CredentialProvider, DomainError};

pub struct SpotifyCatalog {
    client: Client,
    base_url: String,
    market: String,
    credentials: Arc<dyn CredentialProvider>,
}

impl SpotifyCatalog {
    pub fn new(
        base_url: impl Into<String>,
        market: impl Into<String>,
        credentials: Arc<dyn CredentialProvider>,
        timeout: Duration,
    ) -> reqwest::Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.into(),
            market: market.into(),
            credentials,
        })
    }
}

#[async_trait]
impl CatalogSearch for SpotifyCatalog {
    async fn search_tracks(
        &self,
        owner: Uuid,
        query: &str,
        limit: u32,
    ) -> Result<Vec<CatalogTrack>, DomainError> {
        let token = self.credentials.access_token(owner).await?;
        let limit = limit.to_string();

        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .bearer_auth(token)
            .query(&[
                ("q", query),
                ("type", "track"),
                ("limit", limit.as_str()),
                ("market", self.market.as_str()),
            ])
            .send()
            .await
            .map_err(|err| DomainError::CatalogSearchFailed(err.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::CatalogSearchFailed(format!(
                "Spotify API error ({}): {}",
                status.as_u16(),
                error_message(&body)
            )));
        }

        let payload: SearchResponse = response
            .json()
            .await
            .map_err(|err| DomainError::CatalogSearchFailed(err.to_string()))?;

        Ok(payload
            .tracks
            .map(|page| {
                page.items
                    .into_iter()
                    .flatten()
                    .map(CatalogTrack::from)
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default())
    }
}

// ============================================
// Response Types
// ============================================

#[derive(Deserialize)]
struct SearchResponse {
    tracks: Option<TrackPage>,
}

#[derive(Deserialize)]
struct TrackPage {
    #[serde(default)]
    items: Vec<Option<SpotifyTrack>>,
}

#[derive(Deserialize)]
struct SpotifyTrack {
    id: String,
    name: String,
    #[serde(default)]
    artists: Vec<SpotifyArtist>,
    album: Option<SpotifyAlbum>,
    preview_url: Option<String>,
    external_urls: Option<ExternalUrls>,
    duration_ms: Option<u64>,
    popularity: Option<u32>,
    explicit: Option<bool>,
}

#[derive(Deserialize)]
struct SpotifyArtist {
    name: String,
}

#[derive(Deserialize)]
struct SpotifyAlbum {
    name: Option<String>,
    #[serde(default)]
    images: Vec<SpotifyImage>,
}

#[derive(Deserialize)]
struct SpotifyImage {
    url: String,
}

#[derive(Deserialize)]
struct ExternalUrls {
    spotify: Option<String>,
}

impl From<SpotifyTrack> for CatalogTrack {
    fn from(track: SpotifyTrack) -> Self {
        let (album_name, album_image_url) = match track.album {
            Some(album) => (album.name, album.images.into_iter().next().map(|i| i.url)),
            None => (None, None),
        };

        Self {
            id: track.id,
            name: track.name,
            artists: track.artists.into_iter().map(|a| a.name).collect(),
            album_name,
            album_image_url,
            preview_url: track.preview_url,
            external_url: track.external_urls.and_then(|u| u.spotify),
            duration_ms: track.duration_ms,
            popularity: track.popularity,
            explicit: track.explicit,
        }
    }
}

/// `error.message` from a Spotify error body, or the raw body
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|err| err.get("message"))
                .and_then(|msg| msg.as_str())
                .map(|msg| msg.to_string())
        })
        .unwrap_or_else(|| body.to_string())
}
