//! In-memory fakes of the ports for service and route tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use encore::ports::CompletionOptions;
use encore::{
    CatalogSearch, CatalogTrack, Category, CategoryRepository, Comment, CommentRepository,
    DomainError, Favorite, FavoriteDigest, FavoriteRepository, LabeledBlockParser, LlmProvider,
    Page, PageRequest, ParsedCandidate, Rating, Recommendation, RecommendationRepository,
    RecommendationSummary,
};

use crate::application::{
    CurationService, DiscoveryService, RecommendationGenerator, RecommendationResolver,
};
use crate::auth::{Claims, JwtVerifier};
use crate::AppState;

pub const TEST_JWT_SECRET: &str = "test-secret";

// ============================================
// Builders
// ============================================

pub fn candidate(track: &str, artist: &str, why: Option<&str>) -> ParsedCandidate {
    ParsedCandidate {
        track_name: track.to_string(),
        artist_name: artist.to_string(),
        explanation: why.map(str::to_string),
    }
}

pub fn catalog_track(id: &str, name: &str, artists: &[&str]) -> CatalogTrack {
    CatalogTrack {
        id: id.to_string(),
        name: name.to_string(),
        artists: artists.iter().map(|a| a.to_string()).collect(),
        album_name: Some(format!("{} (Album)", name)),
        album_image_url: Some(format!("https://img.example/{}.jpg", id)),
        preview_url: None,
        external_url: Some(format!("https://open.spotify.com/track/{}", id)),
        duration_ms: Some(200_000),
        popularity: Some(50),
        explicit: Some(false),
    }
}

/// Signed bearer token valid for one hour
pub fn token_for(user_id: Uuid) -> String {
    let claims = Claims {
        user_id,
        exp: Utc::now().timestamp() + 3600,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

/// Authenticated request for `user`, with an optional JSON body
pub fn request(method: &str, uri: &str, user: Uuid, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token_for(user)));

    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Run one request through the router; non-JSON bodies come back as `Null`
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn paginate<T: Clone>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let total = items.len() as u64;
    let slice = items
        .into_iter()
        .skip(request.offset() as usize)
        .take(request.limit as usize)
        .collect();
    Page::new(slice, request, total)
}

// ============================================
// LLM
// ============================================

#[derive(Default)]
pub struct FakeLlm {
    reply: String,
    failure: Mutex<Option<DomainError>>,
    prompts: Mutex<Vec<String>>,
}

impl FakeLlm {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            ..Default::default()
        }
    }

    /// Fails the first call with `error`
    pub fn failing(error: DomainError) -> Self {
        Self {
            failure: Mutex::new(Some(error)),
            ..Default::default()
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for FakeLlm {
    async fn complete(
        &self,
        prompt: &str,
        _options: &CompletionOptions,
    ) -> Result<String, DomainError> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        if let Some(err) = self.failure.lock().unwrap().take() {
            return Err(err);
        }

        Ok(self.reply.clone())
    }

    fn provider_name(&self) -> &str {
        "fake"
    }

    fn model_id(&self) -> &str {
        "fake-model"
    }
}

// ============================================
// Catalog
// ============================================

/// Answers queries whose `track:"<key>"` (or whole query) matches a registered key
#[derive(Default)]
pub struct FakeCatalog {
    hits: Vec<(String, CatalogTrack)>,
    failures: Vec<String>,
    queries: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn with_hit(mut self, key: &str, track: CatalogTrack) -> Self {
        self.hits.push((key.to_string(), track));
        self
    }

    pub fn with_failure(mut self, key: &str) -> Self {
        self.failures.push(key.to_string());
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    fn matches(key: &str, query: &str) -> bool {
        query == key || query.contains(&format!("track:\"{}\"", key))
    }
}

#[async_trait]
impl CatalogSearch for FakeCatalog {
    async fn search_tracks(
        &self,
        _owner: Uuid,
        query: &str,
        limit: u32,
    ) -> Result<Vec<CatalogTrack>, DomainError> {
        self.queries.lock().unwrap().push(query.to_string());

        if self.failures.iter().any(|key| Self::matches(key, query)) {
            return Err(DomainError::CatalogSearchFailed(
                "The access token expired".to_string(),
            ));
        }

        Ok(self
            .hits
            .iter()
            .filter(|(key, _)| Self::matches(key, query))
            .map(|(_, track)| track.clone())
            .take(limit as usize)
            .collect())
    }
}

// ============================================
// Storage
// ============================================

#[derive(Default)]
struct StoreData {
    recommendations: Vec<Recommendation>,
    favorites: Vec<Favorite>,
    categories: Vec<Category>,
    comments: Vec<Comment>,
}

/// One shared store behind every repository port, so deletes cascade
/// the way the database does. Lists are newest first by insertion order.
#[derive(Default)]
pub struct InMemoryStore {
    data: Mutex<StoreData>,
}

#[async_trait]
impl RecommendationRepository for InMemoryStore {
    async fn create(&self, recommendation: &Recommendation) -> Result<Recommendation, DomainError> {
        let mut data = self.data.lock().unwrap();
        data.recommendations.push(recommendation.clone());
        Ok(recommendation.clone())
    }

    async fn find_by_id(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Recommendation>, DomainError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .recommendations
            .iter()
            .find(|r| r.id == id && r.user_id == user_id)
            .cloned())
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        limit: u32,
    ) -> Result<Vec<RecommendationSummary>, DomainError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .recommendations
            .iter()
            .rev()
            .filter(|r| r.user_id == user_id)
            .take(limit as usize)
            .map(Recommendation::summary)
            .collect())
    }

    async fn set_rating(
        &self,
        user_id: Uuid,
        id: Uuid,
        rating: Rating,
    ) -> Result<bool, DomainError> {
        let mut data = self.data.lock().unwrap();
        match data
            .recommendations
            .iter_mut()
            .find(|r| r.id == id && r.user_id == user_id)
        {
            Some(rec) => {
                rec.satisfaction_rating = Some(rating);
                rec.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl FavoriteRepository for InMemoryStore {
    async fn create(&self, favorite: &Favorite) -> Result<Favorite, DomainError> {
        let mut data = self.data.lock().unwrap();
        if data.favorites.iter().any(|f| {
            f.user_id == favorite.user_id && f.catalog_track_id == favorite.catalog_track_id
        }) {
            return Err(DomainError::Conflict("duplicate favorite".to_string()));
        }
        data.favorites.push(favorite.clone());
        Ok(favorite.clone())
    }

    async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> Result<Option<Favorite>, DomainError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .favorites
            .iter()
            .find(|f| f.id == id && f.user_id == user_id)
            .cloned())
    }

    async fn find_by_track(
        &self,
        user_id: Uuid,
        catalog_track_id: &str,
    ) -> Result<Option<Favorite>, DomainError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .favorites
            .iter()
            .find(|f| f.user_id == user_id && f.catalog_track_id == catalog_track_id)
            .cloned())
    }

    async fn list(&self, user_id: Uuid, page: PageRequest) -> Result<Page<Favorite>, DomainError> {
        let data = self.data.lock().unwrap();
        let items = data
            .favorites
            .iter()
            .rev()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect();
        Ok(paginate(items, page))
    }

    async fn list_by_ids(
        &self,
        user_id: Uuid,
        ids: &[Uuid],
        page: PageRequest,
    ) -> Result<Page<Favorite>, DomainError> {
        let data = self.data.lock().unwrap();
        let items = data
            .favorites
            .iter()
            .rev()
            .filter(|f| f.user_id == user_id && ids.contains(&f.id))
            .cloned()
            .collect();
        Ok(paginate(items, page))
    }

    async fn delete_by_track(
        &self,
        user_id: Uuid,
        catalog_track_id: &str,
    ) -> Result<bool, DomainError> {
        let mut data = self.data.lock().unwrap();
        let Some(position) = data
            .favorites
            .iter()
            .position(|f| f.user_id == user_id && f.catalog_track_id == catalog_track_id)
        else {
            return Ok(false);
        };

        let removed = data.favorites.remove(position);
        for category in data.categories.iter_mut() {
            category.favorite_ids.retain(|id| *id != removed.id);
        }
        data.comments.retain(|c| c.favorite_id != removed.id);
        Ok(true)
    }

    async fn recent_digest(
        &self,
        user_id: Uuid,
        limit: u32,
    ) -> Result<Vec<FavoriteDigest>, DomainError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .favorites
            .iter()
            .rev()
            .filter(|f| f.user_id == user_id)
            .take(limit as usize)
            .map(Favorite::digest)
            .collect())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn create(&self, category: &Category) -> Result<Category, DomainError> {
        let mut data = self.data.lock().unwrap();
        data.categories.push(category.clone());
        Ok(category.clone())
    }

    async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> Result<Option<Category>, DomainError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .categories
            .iter()
            .find(|c| c.id == id && c.user_id == user_id)
            .cloned())
    }

    async fn find_by_name(
        &self,
        user_id: Uuid,
        name: &str,
    ) -> Result<Option<Category>, DomainError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .categories
            .iter()
            .find(|c| c.user_id == user_id && c.name == name)
            .cloned())
    }

    async fn list(&self, user_id: Uuid, page: PageRequest) -> Result<Page<Category>, DomainError> {
        let data = self.data.lock().unwrap();
        let items = data
            .categories
            .iter()
            .rev()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect();
        Ok(paginate(items, page))
    }

    async fn rename(
        &self,
        user_id: Uuid,
        id: Uuid,
        name: &str,
    ) -> Result<Option<Category>, DomainError> {
        let mut data = self.data.lock().unwrap();
        Ok(data
            .categories
            .iter_mut()
            .find(|c| c.id == id && c.user_id == user_id)
            .map(|c| {
                c.name = name.to_string();
                c.updated_at = Utc::now();
                c.clone()
            }))
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, DomainError> {
        let mut data = self.data.lock().unwrap();
        let before = data.categories.len();
        data.categories
            .retain(|c| !(c.id == id && c.user_id == user_id));
        Ok(data.categories.len() < before)
    }

    async fn add_favorite(&self, category_id: Uuid, favorite_id: Uuid) -> Result<(), DomainError> {
        let mut data = self.data.lock().unwrap();
        if let Some(category) = data.categories.iter_mut().find(|c| c.id == category_id) {
            category.favorite_ids.push(favorite_id);
        }
        Ok(())
    }

    async fn remove_favorite(
        &self,
        category_id: Uuid,
        favorite_id: Uuid,
    ) -> Result<bool, DomainError> {
        let mut data = self.data.lock().unwrap();
        let Some(category) = data.categories.iter_mut().find(|c| c.id == category_id) else {
            return Ok(false);
        };
        let before = category.favorite_ids.len();
        category.favorite_ids.retain(|id| *id != favorite_id);
        Ok(category.favorite_ids.len() < before)
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn create(&self, comment: &Comment) -> Result<Comment, DomainError> {
        let mut data = self.data.lock().unwrap();
        data.comments.push(comment.clone());
        Ok(comment.clone())
    }

    async fn list_for_favorite(
        &self,
        favorite_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Comment>, DomainError> {
        let data = self.data.lock().unwrap();
        let items = data
            .comments
            .iter()
            .rev()
            .filter(|c| c.favorite_id == favorite_id)
            .cloned()
            .collect();
        Ok(paginate(items, page))
    }

    async fn update_text(
        &self,
        user_id: Uuid,
        id: Uuid,
        text: &str,
    ) -> Result<Option<Comment>, DomainError> {
        let mut data = self.data.lock().unwrap();
        Ok(data
            .comments
            .iter_mut()
            .find(|c| c.id == id && c.user_id == user_id)
            .map(|c| {
                c.text = text.to_string();
                c.updated_at = Utc::now();
                c.clone()
            }))
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, DomainError> {
        let mut data = self.data.lock().unwrap();
        let before = data.comments.len();
        data.comments
            .retain(|c| !(c.id == id && c.user_id == user_id));
        Ok(data.comments.len() < before)
    }
}

// ============================================
// Wiring
// ============================================

/// Fully wired services on top of the fakes
pub struct TestHarness {
    pub discovery: Arc<DiscoveryService>,
    pub curation: Arc<CurationService>,
    pub llm: Arc<FakeLlm>,
    pub catalog: Arc<FakeCatalog>,
}

impl TestHarness {
    pub fn new(llm: FakeLlm, catalog: FakeCatalog) -> Self {
        let llm = Arc::new(llm);
        let catalog = Arc::new(catalog);
        let store = Arc::new(InMemoryStore::default());

        let discovery = DiscoveryService::new(
            RecommendationGenerator::new(llm.clone()),
            Arc::new(LabeledBlockParser),
            RecommendationResolver::new(catalog.clone(), 5),
            store.clone(),
            store.clone(),
        );
        let curation = CurationService::new(store.clone(), store.clone(), store);

        Self {
            discovery: Arc::new(discovery),
            curation: Arc::new(curation),
            llm,
            catalog,
        }
    }

    pub fn state(&self) -> AppState {
        AppState {
            discovery: self.discovery.clone(),
            curation: self.curation.clone(),
            catalog: self.catalog.clone(),
            jwt: Arc::new(JwtVerifier::new(TEST_JWT_SECRET)),
        }
    }
}
