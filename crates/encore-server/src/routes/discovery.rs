//! Discovery Routes - AI music recommendations
//!
//! HTTP handlers that delegate to DiscoveryService.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};

use super::{json_body, parse_id};
use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::models::{
    GenerateRequest, GenerateResponse, HistoryQuery, MessageResponse, RateRequest,
    RecommendationResponse, RecommendationSummaryResponse,
};
use crate::AppState;

/// Generate recommendations
#[utoipa::path(
    post,
    path = "/api/discovery/generate",
    request_body = GenerateRequest,
    responses(
        (status = 201, description = "Recommendations generated", body = GenerateResponse),
        (status = 400, description = "Missing, blank or too long userInput"),
        (status = 401, description = "Missing or invalid token"),
        (status = 500, description = "Generation or storage failed")
    ),
    security(("bearer_auth" = [])),
    tag = "Discovery"
)]
pub async fn generate(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<GenerateResponse>)> {
    let request = json_body(payload)?;

    let recommendation = state
        .discovery
        .generate(user.user_id, &request.user_input)
        .await?;

    Ok((StatusCode::CREATED, Json(recommendation.into())))
}

/// Recommendation history, newest first
#[utoipa::path(
    get,
    path = "/api/discovery/history",
    params(
        ("limit" = Option<u32>, Query, description = "Entries to return (default 10, max 50)")
    ),
    responses(
        (status = 200, description = "History", body = Vec<RecommendationSummaryResponse>),
        (status = 400, description = "limit above 50"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Discovery"
)]
pub async fn history(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<Json<Vec<RecommendationSummaryResponse>>> {
    let limit = query.limit.as_deref().and_then(parse_limit);

    let summaries = state.discovery.history(user.user_id, limit).await?;

    Ok(Json(summaries.into_iter().map(Into::into).collect()))
}

/// Parse a raw `limit` value. Non-numeric input yields `None`; integers too
/// large for `i64` saturate so they are still range-checked.
fn parse_limit(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<i64>() {
        return Some(n);
    }
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(if negative { i64::MIN } else { i64::MAX })
}

/// Get a recommendation
#[utoipa::path(
    get,
    path = "/api/discovery/{id}",
    params(
        ("id" = String, Path, description = "Recommendation ID (UUID)")
    ),
    responses(
        (status = 200, description = "Recommendation found", body = RecommendationResponse),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Recommendation not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Discovery"
)]
pub async fn get_recommendation(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<RecommendationResponse>> {
    let id = parse_id(&id, "recommendation")?;
    let recommendation = state.discovery.get(user.user_id, id).await?;

    Ok(Json(recommendation.into()))
}

/// Rate a recommendation (1-5, overwrites any previous rating)
#[utoipa::path(
    post,
    path = "/api/discovery/{id}/rate",
    params(
        ("id" = String, Path, description = "Recommendation ID (UUID)")
    ),
    request_body = RateRequest,
    responses(
        (status = 200, description = "Rating saved", body = MessageResponse),
        (status = 400, description = "Malformed id or rating"),
        (status = 404, description = "Recommendation not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Discovery"
)]
pub async fn rate_recommendation(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    payload: Result<Json<RateRequest>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_id(&id, "recommendation")?;
    let request = json_body(payload)?;

    state
        .discovery
        .rate(user.user_id, id, request.rating)
        .await?;

    Ok(Json(MessageResponse::new("Rating saved")))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/discovery/generate", post(generate))
        .route("/api/discovery/history", get(history))
        .route("/api/discovery/:id", get(get_recommendation))
        .route("/api/discovery/:id/rate", post(rate_recommendation))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use serde_json::json;
    use uuid::Uuid;

    use super::parse_limit;
    use crate::test_support::{
        catalog_track, request, send, FakeCatalog, FakeLlm, TestHarness,
    };

    const REPLY: &str = "ENTRY 1:\nName: Midnight City\nArtist: M83\nWhy: Soaring synths.\n\
ENTRY 2:\nName: Unknown Song\nArtist: Unknown Band\nWhy: Deep cut.";

    fn app() -> Router {
        let harness = TestHarness::new(
            FakeLlm::replying(REPLY),
            FakeCatalog::default()
                .with_hit("Midnight City", catalog_track("m83", "Midnight City", &["M83"])),
        );
        crate::build_router(harness.state())
    }

    #[tokio::test]
    async fn test_requires_token() {
        let app = app();
        let request = Request::builder()
            .uri("/api/discovery/history")
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_generate_then_read_back() {
        let app = app();
        let user = Uuid::new_v4();

        let (status, created) = send(
            &app,
            request(
                "POST",
                "/api/discovery/generate",
                user,
                Some(json!({ "userInput": "I want energetic workout music" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["userInput"], "I want energetic workout music");
        assert_eq!(created["recommendations"].as_array().unwrap().len(), 1);
        assert_eq!(created["recommendations"][0]["catalogTrackId"], "m83");
        assert_eq!(created["recommendations"][0]["explanation"], "Soaring synths.");

        let id = created["id"].as_str().unwrap();
        let (status, stored) = send(
            &app,
            request("GET", &format!("/api/discovery/{}", id), user, None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stored["recommendations"], created["recommendations"]);
        assert!(stored["satisfactionRating"].is_null());
    }

    #[tokio::test]
    async fn test_generate_validation() {
        let app = app();
        let user = Uuid::new_v4();

        for body in [
            json!({}),
            json!({ "userInput": 42 }),
            json!({ "userInput": "   " }),
            json!({ "userInput": "x".repeat(501) }),
        ] {
            let (status, value) = send(
                &app,
                request("POST", "/api/discovery/generate", user, Some(body)),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(value["error"].is_string());
        }
    }

    #[tokio::test]
    async fn test_get_errors() {
        let app = app();
        let user = Uuid::new_v4();

        let (status, _) =
            send(&app, request("GET", "/api/discovery/not-a-uuid", user, None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let uri = format!("/api/discovery/{}", Uuid::new_v4());
        let (status, _) = send(&app, request("GET", &uri, user, None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_rate_flow() {
        let app = app();
        let user = Uuid::new_v4();
        let (_, created) = send(
            &app,
            request(
                "POST",
                "/api/discovery/generate",
                user,
                Some(json!({ "userInput": "sunday morning" })),
            ),
        )
        .await;
        let rate_uri = format!("/api/discovery/{}/rate", created["id"].as_str().unwrap());

        for bad in [
            json!({ "rating": 0 }),
            json!({ "rating": 6 }),
            json!({ "rating": 3.5 }),
            json!({}),
        ] {
            let (status, _) = send(&app, request("POST", &rate_uri, user, Some(bad))).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
        }

        let (status, body) =
            send(&app, request("POST", &rate_uri, user, Some(json!({ "rating": 3 })))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["message"].is_string());

        send(&app, request("POST", &rate_uri, user, Some(json!({ "rating": 5 })))).await;

        let detail_uri = format!("/api/discovery/{}", created["id"].as_str().unwrap());
        let (_, stored) = send(&app, request("GET", &detail_uri, user, None)).await;
        assert_eq!(stored["satisfactionRating"], 5);

        let (status, _) = send(
            &app,
            request("POST", &rate_uri, Uuid::new_v4(), Some(json!({ "rating": 4 }))),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_history_limits() {
        let app = app();
        let user = Uuid::new_v4();
        for input in ["one", "two", "three"] {
            send(
                &app,
                request(
                    "POST",
                    "/api/discovery/generate",
                    user,
                    Some(json!({ "userInput": input })),
                ),
            )
            .await;
        }

        let (status, body) =
            send(&app, request("GET", "/api/discovery/history?limit=2", user, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);
        assert_eq!(body[0]["userInput"], "three");
        assert_eq!(body[0]["recommendationsCount"], 1);

        let (status, body) =
            send(&app, request("GET", "/api/discovery/history?limit=abc", user, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 3);

        let (status, _) =
            send(&app, request("GET", "/api/discovery/history?limit=51", user, None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            request(
                "GET",
                "/api/discovery/history?limit=99999999999999999999",
                user,
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, body) = send(
            &app,
            request("GET", "/api/discovery/history", Uuid::new_v4(), None),
        )
        .await;
        assert!(body.as_array().unwrap().is_empty());
    }

    #[test]
    fn test_parse_limit_saturates_overflow() {
        assert_eq!(parse_limit(" 7 "), Some(7));
        assert_eq!(parse_limit("abc"), None);
        assert_eq!(parse_limit(""), None);
        assert_eq!(parse_limit("99999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_limit("-99999999999999999999"), Some(i64::MIN));
        assert_eq!(parse_limit("12x"), None);
    }
}
