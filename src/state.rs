//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{AuthService, LinkService};

/// Default number of links per page when the client does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 15;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub auth_service: Arc<AuthService>,
    /// Answer redirects with `301 Moved Permanently` instead of `302 Found`.
    pub redirect_permanent: bool,
    pub default_page_size: u32,
}

impl AppState {
    pub fn new(link_service: Arc<LinkService>, auth_service: Arc<AuthService>) -> Self {
        Self {
            link_service,
            auth_service,
            redirect_permanent: false,
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_redirect_permanent(mut self, permanent: bool) -> Self {
        self.redirect_permanent = permanent;
        self
    }

    pub fn with_default_page_size(mut self, page_size: u32) -> Self {
        self.default_page_size = page_size;
        self
    }
}
