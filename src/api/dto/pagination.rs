//! Pagination and search query parameters.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};

use crate::domain::entities::PageRequest;

/// Largest page size a client may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Query parameters for `GET /api/links`.
///
/// Uses `serde_with` to parse page numbers from query strings as integers.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page_size: Option<u32>,

    /// Case-insensitive substring of the destination URL or short code.
    #[serde(default)]
    pub search: Option<String>,
}

impl ListQuery {
    /// Validates pagination parameters.
    ///
    /// # Defaults
    ///
    /// - `page`: 1
    /// - `page_size`: `default_page_size`
    ///
    /// # Validation
    ///
    /// - Page must be > 0
    /// - Page size must be between 1 and [`MAX_PAGE_SIZE`]
    pub fn validate_and_get_page(&self, default_page_size: u32) -> Result<PageRequest, String> {
        let page = self.page.unwrap_or(1);
        let page_size = self.page_size.unwrap_or(default_page_size);

        if page == 0 {
            return Err("Page must be greater than 0".to_string());
        }

        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(format!("Page size must be between 1 and {MAX_PAGE_SIZE}"));
        }

        Ok(PageRequest::new(page, page_size))
    }
}
