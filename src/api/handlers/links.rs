//! Handlers for link management endpoints.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;
use serde_json::json;
use validator::Validate;

use crate::api::dto::link::{LinkListResponse, LinkRequest, LinkResponse};
use crate::api::dto::pagination::ListQuery;
use crate::domain::entities::{Link, OwnerId, Requester};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// Authentication is optional: with a valid Bearer token the link belongs
/// to the token's owner, without one it is anonymous and can never be
/// edited or deleted.
///
/// # Request Body
///
/// ```json
/// { "original_url": "https://example.com/some/long/path" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the URL is missing or invalid, or the body is
/// not a JSON object with a string `original_url`.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Extension(requester): Extension<Requester>,
    WithRejection(Json(payload), _): WithRejection<Json<LinkRequest>, AppError>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .create(payload.original_url(), &requester)
        .await?;

    Ok((StatusCode::CREATED, Json(to_response(&state, link))))
}

/// Lists the caller's links, most recent first.
///
/// # Endpoint
///
/// `GET /api/links`
///
/// # Query Parameters
///
/// - `page` (optional): Page number (default: 1)
/// - `page_size` (optional): Items per page (default: `DEFAULT_PAGE_SIZE`, max: 100)
/// - `search` (optional): Case-insensitive match on URL or short code
///
/// # Errors
///
/// Returns 401 Unauthorized without a valid token.
/// Returns 400 Bad Request if pagination parameters are invalid.
pub async fn list_links_handler(
    State(state): State<AppState>,
    Extension(requester): Extension<Requester>,
    WithRejection(Query(params), _): WithRejection<Query<ListQuery>, AppError>,
) -> Result<Json<LinkListResponse>, AppError> {
    let owner_id = require_owner(&requester)?;

    let page = params
        .validate_and_get_page(state.default_page_size)
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let links = state
        .link_service
        .list(owner_id, params.search.as_deref(), page)
        .await?;

    let response = links.map(|link| to_response(&state, link));

    Ok(Json(response.into()))
}

/// Returns one of the caller's links.
///
/// # Endpoint
///
/// `GET /api/links/{id}`
///
/// # Errors
///
/// Returns 401 without a valid token, 404 for an unknown id and 403 if the
/// link belongs to someone else.
pub async fn get_link_handler(
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
    State(state): State<AppState>,
    Extension(requester): Extension<Requester>,
) -> Result<Json<LinkResponse>, AppError> {
    require_owner(&requester)?;

    let link = state.link_service.get(id, &requester).await?;

    Ok(Json(to_response(&state, link)))
}

/// Replaces the destination of one of the caller's links.
///
/// # Endpoint
///
/// `PUT /api/links/{id}`
///
/// The short code and click count are preserved.
///
/// # Request Body
///
/// ```json
/// { "original_url": "https://example.com/new-destination" }
/// ```
///
/// # Errors
///
/// Returns 401 without a valid token, then 404, 403 and 400 in that order.
/// The URL is only checked once ownership is established.
pub async fn update_link_handler(
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
    State(state): State<AppState>,
    Extension(requester): Extension<Requester>,
    WithRejection(Json(payload), _): WithRejection<Json<LinkRequest>, AppError>,
) -> Result<Json<LinkResponse>, AppError> {
    require_owner(&requester)?;

    let link = state
        .link_service
        .update(id, payload.original_url(), &requester)
        .await?;

    Ok(Json(to_response(&state, link)))
}

/// Permanently deletes one of the caller's links.
///
/// # Endpoint
///
/// `DELETE /api/links/{id}`
///
/// The short code stops resolving immediately and the click count is lost.
///
/// # Errors
///
/// Returns 401 without a valid token, 404 for an unknown id and 403 if the
/// link belongs to someone else.
pub async fn delete_link_handler(
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
    State(state): State<AppState>,
    Extension(requester): Extension<Requester>,
) -> Result<StatusCode, AppError> {
    require_owner(&requester)?;

    state.link_service.delete(id, &requester).await?;

    Ok(StatusCode::NO_CONTENT)
}

fn to_response(state: &AppState, link: Link) -> LinkResponse {
    let short_url = state.link_service.short_url(&link.short_code);
    LinkResponse::new(link, short_url)
}

/// Management endpoints other than create need an authenticated owner.
fn require_owner(requester: &Requester) -> Result<OwnerId, AppError> {
    requester.owner_id().ok_or_else(|| {
        AppError::unauthorized(
            "Unauthorized",
            json!({"reason": "Authorization header is missing or invalid"}),
        )
    })
}
