//! API route configuration.
//!
//! Every API request passes through [`crate::api::middleware::auth`], which
//! resolves an optional Bearer token into a [`crate::domain::entities::Requester`].

use crate::api::handlers::{
    create_link_handler, delete_link_handler, get_link_handler, list_links_handler,
    update_link_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Link management routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `POST   /links`        - Create a short link (token optional)
/// - `GET    /links`        - List the caller's links (paginated, searchable)
/// - `GET    /links/{id}`   - Fetch one of the caller's links
/// - `PUT    /links/{id}`   - Replace a link's destination
/// - `DELETE /links/{id}`   - Permanently delete a link
pub fn link_routes() -> Router<AppState> {
    Router::new()
        .route("/links", get(list_links_handler).post(create_link_handler))
        .route(
            "/links/{id}",
            get(get_link_handler)
                .put(update_link_handler)
                .delete(delete_link_handler),
        )
}
