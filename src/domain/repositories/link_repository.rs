//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink, OwnerId};
use crate::error::AppError;
use async_trait::async_trait;

/// Filter applied to an owner's link listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkFilter {
    pub owner_id: OwnerId,
    /// Case-insensitive substring matched against `original_url` or `short_code`.
    pub search: Option<String>,
}

/// Repository interface for managing short links.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::InMemoryLinkRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Reserves the id the next link will be stored under.
    ///
    /// Ids are unique and increase monotonically; reserved ids that are never
    /// inserted leave gaps.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn next_id(&self) -> Result<i64, AppError>;

    /// Inserts a link under a previously reserved id with `clicks = 0`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the id or short code already exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError>;

    /// Finds a link by its short code without touching the click counter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_code(&self, short_code: &str) -> Result<Option<Link>, AppError>;

    /// Atomically increments `clicks` by one and returns the updated link.
    ///
    /// Returns `Ok(None)` if no link has this code. Concurrent calls never
    /// lose increments.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn increment_clicks(&self, short_code: &str) -> Result<Option<Link>, AppError>;

    /// Replaces the destination URL, leaving `short_code` and `clicks` untouched.
    ///
    /// Returns `Ok(None)` if the link no longer exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn update_url(&self, id: i64, original_url: &str) -> Result<Option<Link>, AppError>;

    /// Permanently deletes a link and its click count.
    ///
    /// Returns `Ok(false)` if the link did not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Lists an owner's links, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self, filter: LinkFilter, offset: i64, limit: i64)
    -> Result<Vec<Link>, AppError>;

    /// Counts the links matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self, filter: LinkFilter) -> Result<i64, AppError>;

    /// Checks connectivity with the backing store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store is unreachable.
    async fn ping(&self) -> Result<(), AppError>;
}
