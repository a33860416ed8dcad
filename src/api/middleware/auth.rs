//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::domain::entities::Requester;
use crate::{error::AppError, state::AppState};

/// Resolves the caller's identity and stores it as a [`Requester`] extension.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Authentication Flow
///
/// 1. No `Authorization` header: the request continues as [`Requester::Anonymous`]
/// 2. Otherwise extract the Bearer token
/// 3. Validate the token hash against the database
/// 4. Continue as [`Requester::Owner`] with the token's owner id
///
/// Handlers decide whether an anonymous caller is acceptable.
///
/// # Errors
///
/// Returns `401 Unauthorized` if a header is present but:
/// - Token format is invalid
/// - Token is not found or revoked
///
/// Adds `WWW-Authenticate: Bearer` header to 401 responses per RFC 6750.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use crate::api::middleware::auth;
///
/// let api = Router::new()
///     .route("/api/links", get(list_links_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let requester = if parts.headers.contains_key(header::AUTHORIZATION) {
        let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
            .await
            .map_err(|_| {
                AppError::unauthorized(
                    "Unauthorized",
                    serde_json::json!({"reason": "Authorization header is missing or invalid"}),
                )
            })?;

        st.auth_service.authenticate(&token).await?
    } else {
        Requester::Anonymous
    };

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(requester);

    Ok(next.run(req).await)
}
