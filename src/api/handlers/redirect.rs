//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::url_validator::to_location;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{short_code}`
///
/// The click counter is incremented in the same statement that looks the
/// link up, so every successful redirect is counted exactly once.
///
/// Responds with `302 Found`, or `301 Moved Permanently` when the service
/// runs with `REDIRECT_PERMANENT=true`.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let link = state.link_service.resolve(&short_code).await?;

    let location = HeaderValue::try_from(to_location(&link.original_url)).map_err(|_| {
        tracing::error!(id = link.id, "Stored URL is not a valid Location header");
        AppError::internal("Invalid redirect target", json!({}))
    })?;

    let status = if state.redirect_permanent {
        StatusCode::MOVED_PERMANENTLY
    } else {
        StatusCode::FOUND
    };

    tracing::debug!(short_code = %short_code, clicks = link.clicks, "Redirecting");

    Ok((status, [(header::LOCATION, location)]).into_response())
}
