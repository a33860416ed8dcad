#![allow(dead_code)]

use axum::Router;
use axum_test::TestServer;
use linkbase::application::services::auth_service::hash_token;
use linkbase::application::services::{AuthService, LinkService};
use linkbase::domain::entities::OwnerId;
use linkbase::domain::repositories::{LinkRepository, TokenRepository};
use linkbase::infrastructure::memory::{InMemoryLinkRepository, InMemoryTokenRepository};
use linkbase::routes::{api_routes, public_routes};
use linkbase::state::AppState;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

pub const SIGNING_SECRET: &str = "test-signing-secret";
pub const BASE_URL: &str = "http://s.test";

static TOKEN_SEQ: AtomicU64 = AtomicU64::new(1);

/// Test server over in-memory repositories.
pub struct TestApp {
    pub server: TestServer,
    pub links: Arc<InMemoryLinkRepository>,
    pub tokens: Arc<InMemoryTokenRepository>,
}

impl TestApp {
    /// Issues a fresh API token for `owner` and returns the raw value.
    pub async fn token_for(&self, owner: i64) -> String {
        issue_token(&self.tokens, owner).await
    }
}

pub fn create_test_state(
    links: Arc<InMemoryLinkRepository>,
    tokens: Arc<InMemoryTokenRepository>,
) -> AppState {
    let link_service = Arc::new(LinkService::new(
        links as Arc<dyn LinkRepository>,
        BASE_URL,
    ));
    let auth_service = Arc::new(AuthService::new(
        tokens as Arc<dyn TokenRepository>,
        SIGNING_SECRET.to_string(),
    ));

    AppState::new(link_service, auth_service)
}

/// Application routes without rate limiting, which needs a peer address.
pub fn test_router(state: AppState) -> Router {
    Router::new()
        .merge(public_routes())
        .nest("/api", api_routes(&state))
        .with_state(state)
}

pub fn spawn_app() -> TestApp {
    spawn_app_with(|state| state)
}

pub fn spawn_app_with(configure: impl FnOnce(AppState) -> AppState) -> TestApp {
    let links = Arc::new(InMemoryLinkRepository::new());
    let tokens = Arc::new(InMemoryTokenRepository::new());

    let state = configure(create_test_state(links.clone(), tokens.clone()));
    let server = TestServer::new(test_router(state)).unwrap();

    TestApp {
        server,
        links,
        tokens,
    }
}

pub async fn issue_token(tokens: &InMemoryTokenRepository, owner: i64) -> String {
    let seq = TOKEN_SEQ.fetch_add(1, Ordering::Relaxed);
    let raw = format!("test-token-{owner}-{seq}");

    tokens
        .create_token(
            &format!("token-{seq}"),
            OwnerId::new(owner),
            &hash_token(SIGNING_SECRET, &raw),
        )
        .await
        .unwrap();

    raw
}
