//! DTOs for link management endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{Link, OwnerId, Page};

/// Request body for `POST /api/links` and `PUT /api/links/{id}`.
///
/// `original_url` is optional at the serde level so that a missing field
/// reaches the service and gets the same message as an empty one.
#[derive(Debug, Deserialize, Validate)]
pub struct LinkRequest {
    #[serde(default)]
    #[validate(length(max = 2048, message = "URL is too long"))]
    pub original_url: Option<String>,
}

impl LinkRequest {
    pub fn original_url(&self) -> &str {
        self.original_url.as_deref().unwrap_or_default()
    }
}

/// JSON representation of a link.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub short_url: String,
    pub clicks: i64,
    pub owner_id: Option<OwnerId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LinkResponse {
    pub fn new(link: Link, short_url: String) -> Self {
        Self {
            id: link.id,
            original_url: link.original_url,
            short_code: link.short_code,
            short_url,
            clicks: link.clicks,
            owner_id: link.owner_id,
            created_at: link.created_at,
            updated_at: link.updated_at,
        }
    }
}

/// Paginated list of links.
#[derive(Debug, Serialize)]
pub struct LinkListResponse {
    pub pagination: PaginationMeta,
    pub items: Vec<LinkResponse>,
}

/// Pagination metadata for responses.
///
/// `from` and `to` are 1-based positions of the first and last item on the
/// page; both are `null` for an empty page.
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub page_size: u32,
    pub total: i64,
    pub total_pages: i64,
    pub from: Option<i64>,
    pub to: Option<i64>,
}

impl From<Page<LinkResponse>> for LinkListResponse {
    fn from(page: Page<LinkResponse>) -> Self {
        let pagination = PaginationMeta {
            page: page.page,
            page_size: page.page_size,
            total: page.total,
            total_pages: page.total_pages(),
            from: page.first_index(),
            to: page.last_index(),
        };

        Self {
            pagination,
            items: page.items,
        }
    }
}
