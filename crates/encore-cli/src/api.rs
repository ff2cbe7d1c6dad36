//! Encore API Client

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

/// API Client for Encore
pub struct EncoreClient {
    client: Client,
    base_url: String,
    token: String,
}

// ============================================
// API Response Types
// ============================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedTrack {
    pub catalog_track_id: String,
    pub track_name: String,
    pub artist_name: String,
    pub album_name: Option<String>,
    pub catalog_url: Option<String>,
    pub explanation: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub id: Uuid,
    pub user_input: String,
    pub recommendations: Vec<RecommendedTrack>,
    pub satisfaction_rating: Option<u8>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationSummary {
    pub id: Uuid,
    pub user_input: String,
    pub recommendations_count: usize,
    pub satisfaction_rating: Option<u8>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackResponse {
    pub id: String,
    pub name: String,
    pub artists: Vec<String>,
    pub album_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteResponse {
    pub id: Uuid,
    pub catalog_track_id: String,
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub total: u64,
    pub pages: u64,
}

#[derive(Debug, Deserialize)]
pub struct FavoritesPage {
    pub favorites: Vec<FavoriteResponse>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFavoriteRequest {
    pub catalog_track_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl EncoreClient {
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    /// Check the token against an authenticated endpoint
    pub async fn verify_token(&self) -> Result<()> {
        self.history(Some(1)).await.map(|_| ())
    }

    /// Ask for recommendations
    pub async fn discover(&self, user_input: &str) -> Result<RecommendationResponse> {
        let body = json!({ "userInput": user_input });
        self.send(self.request(Method::POST, "/api/discovery/generate").json(&body))
            .await
    }

    pub async fn history(&self, limit: Option<u32>) -> Result<Vec<RecommendationSummary>> {
        let mut builder = self.request(Method::GET, "/api/discovery/history");
        if let Some(limit) = limit {
            builder = builder.query(&[("limit", limit)]);
        }
        self.send(builder).await
    }

    pub async fn get_recommendation(&self, id: &str) -> Result<RecommendationResponse> {
        let path = format!("/api/discovery/{}", urlencoding::encode(id));
        self.send(self.request(Method::GET, &path)).await
    }

    pub async fn rate(&self, id: &str, rating: u8) -> Result<()> {
        let path = format!("/api/discovery/{}/rate", urlencoding::encode(id));
        let body = json!({ "rating": rating });
        self.send::<serde_json::Value>(self.request(Method::POST, &path).json(&body))
            .await
            .map(|_| ())
    }

    pub async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<TrackResponse>> {
        let path = format!(
            "/api/tracks/search?q={}&limit={}",
            urlencoding::encode(query),
            limit
        );
        self.send(self.request(Method::GET, &path)).await
    }

    pub async fn list_favorites(&self, page: u32, limit: u32) -> Result<FavoritesPage> {
        let builder = self
            .request(Method::GET, "/api/curation/favorites")
            .query(&[("page", page), ("limit", limit)]);
        self.send(builder).await
    }

    pub async fn add_favorite(&self, request: &AddFavoriteRequest) -> Result<FavoriteResponse> {
        self.send(
            self.request(Method::POST, "/api/curation/favorites")
                .json(request),
        )
        .await
    }

    pub async fn remove_favorite(&self, catalog_track_id: &str) -> Result<()> {
        let path = format!(
            "/api/curation/favorites/{}",
            urlencoding::encode(catalog_track_id)
        );
        self.send::<serde_json::Value>(self.request(Method::DELETE, &path))
            .await
            .map(|_| ())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .bearer_auth(&self.token)
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let resp = builder
            .send()
            .await
            .context("Failed to connect to Encore API")?;

        let resp = check_status(resp).await?;
        resp.json().await.context("Failed to parse response")
    }
}

/// Turn a non-2xx response into an error carrying the server's message
async fn check_status(resp: Response) -> Result<Response> {
    if resp.status().is_success() {
        return Ok(resp);
    }

    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|e| e.error)
        .unwrap_or(body);
    bail!("API error ({}): {}", status, message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve a single canned HTTP response, returning the base URL
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_verify_token_rejects_unauthorized() {
        let base_url = serve_once("401 Unauthorized", r#"{"error":"Invalid token"}"#).await;
        let client = EncoreClient::new(&base_url, "bad-token");

        let err = client.verify_token().await.unwrap_err();
        assert!(err.to_string().contains("Invalid token"));
    }

    #[tokio::test]
    async fn test_verify_token_accepts_authorized() {
        let base_url = serve_once("200 OK", "[]").await;
        let client = EncoreClient::new(&base_url, "good-token");

        assert!(client.verify_token().await.is_ok());
    }
}
