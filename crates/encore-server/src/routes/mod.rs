//! Encore API Routes
//!
//! - /api/discovery - AI recommendations (generate, history, detail, rate)
//! - /api/tracks - Catalog track search
//! - /api/curation - Favorites, categories and comments

pub mod catalog;
pub mod curation;
pub mod discovery;
pub mod swagger;

use axum::extract::rejection::JsonRejection;
use axum::Json;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

/// Path ids are parsed by hand so malformed ones get a JSON 400
pub(crate) fn parse_id(raw: &str, what: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request(format!("Invalid {} id", what)))
}

/// Any body rejection (not JSON, wrong shape) is a 400
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}
