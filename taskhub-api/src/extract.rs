/// Request extractors with JSON error bodies
///
/// axum's stock `Json` and `Query` reject with plain-text bodies. These
/// wrappers route the rejection through [`ApiError`] so every failure has
/// the same `{error, message}` shape.

use axum::extract::{FromRequest, FromRequestParts};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

/// `axum::Json` with [`ApiError`] rejections
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Query` with [`ApiError`] rejections
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// Parses a path id
///
/// A string that is not a UUID cannot name any record, so it is reported
/// as `NotFound` for `entity` rather than as a bad request.
pub fn parse_id(raw: &str, entity: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound(format!("{} not found", entity)))
}

/// Parses an optional integer query parameter
pub fn parse_number(raw: Option<&str>, name: &str) -> ApiResult<Option<i64>> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| {
            value
                .parse::<i64>()
                .map_err(|_| ApiError::BadRequest(format!("{} must be an integer", name)))
        })
        .transpose()
}
