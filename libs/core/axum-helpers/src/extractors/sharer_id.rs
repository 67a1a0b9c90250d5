//! Extractor for the trusted caller identity header.

use crate::errors::ErrorResponse;
use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

/// Header carrying the calling user's numeric identifier.
///
/// The boundary trusts this value; no authentication is performed here.
pub const SHARER_USER_HEADER: &str = "x-sharer-user-id";

/// Extracts the caller's user id from `X-Sharer-User-Id`.
///
/// Rejects with 400 when the header is missing or not a valid i64.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::SharerId;
///
/// async fn my_bookings(SharerId(user_id): SharerId) -> String {
///     format!("bookings of {}", user_id)
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharerId(pub i64);

fn bad_request(message: &str) -> Response {
    let body = Json(ErrorResponse {
        error: "BadRequest".to_string(),
        message: message.to_string(),
        details: None,
    });

    (StatusCode::BAD_REQUEST, body).into_response()
}

impl<S> FromRequestParts<S> for SharerId
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(SHARER_USER_HEADER)
            .ok_or_else(|| bad_request("Missing X-Sharer-User-Id header"))?;

        let user_id = value
            .to_str()
            .ok()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .ok_or_else(|| bad_request("Invalid X-Sharer-User-Id header"))?;

        Ok(SharerId(user_id))
    }
}
