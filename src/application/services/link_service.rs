//! Link registry and resolver service.

use std::sync::Arc;

use crate::domain::entities::{Link, NewLink, OwnerId, Page, PageRequest, Requester};
use crate::domain::repositories::{LinkFilter, LinkRepository};
use crate::error::AppError;
use crate::utils::base62;
use crate::utils::url_validator::{UrlValidationError, validate_url};
use serde_json::json;

/// Service for creating, managing and resolving short links.
///
/// Short codes are the base62 encoding of the link id, so no collision
/// handling is needed: ids are unique, and so are their encodings.
///
/// Every mutating operation takes an explicit [`Requester`]. Only the owner
/// of a link may read it through the management API, edit or delete it;
/// anonymous links have no owner and are immutable once created.
pub struct LinkService<L: LinkRepository + ?Sized = dyn LinkRepository> {
    repository: Arc<L>,
    base_url: String,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    ///
    /// `base_url` is the public origin short links are served from
    /// (e.g. `https://s.example.com`).
    pub fn new(repository: Arc<L>, base_url: impl Into<String>) -> Self {
        Self {
            repository,
            base_url: base_url.into(),
        }
    }

    /// Creates a short link owned by `requester` (or nobody, if anonymous).
    ///
    /// Reserves the next id, derives `short_code = base62(id)` and inserts the
    /// row in one statement.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is missing or is not an
    /// absolute HTTP(S) URL. The repository is not touched in that case.
    pub async fn create(&self, original_url: &str, requester: &Requester) -> Result<Link, AppError> {
        validate_original_url(original_url)?;

        let id = self.repository.next_id().await?;
        let short_code = base62::encode(id).map_err(|e| {
            AppError::internal("Failed to encode short code", json!({ "reason": e.to_string() }))
        })?;

        let link = self
            .repository
            .create(NewLink {
                id,
                short_code,
                original_url: original_url.to_string(),
                owner_id: requester.owner_id(),
            })
            .await?;

        metrics::counter!("links_created_total").increment(1);
        tracing::info!(
            id = link.id,
            short_code = %link.short_code,
            anonymous = link.is_anonymous(),
            "Link created"
        );

        Ok(link)
    }

    /// Resolves a short code for redirection, counting the click.
    ///
    /// The increment happens in the store as a single atomic update.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn resolve(&self, short_code: &str) -> Result<Link, AppError> {
        match self.repository.increment_clicks(short_code).await? {
            Some(link) => {
                metrics::counter!("links_resolved_total").increment(1);
                Ok(link)
            }
            None => {
                metrics::counter!("links_resolve_misses_total").increment(1);
                Err(AppError::not_found(
                    "Short link not found",
                    json!({ "short_code": short_code }),
                ))
            }
        }
    }

    /// Returns a link owned by `requester`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the id is unknown, then
    /// [`AppError::Forbidden`] if `requester` is not the owner.
    pub async fn get(&self, id: i64, requester: &Requester) -> Result<Link, AppError> {
        let link = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| link_not_found(id))?;

        if !link.is_owned_by(requester) {
            tracing::warn!(id, requester = ?requester, "Rejected access to foreign link");
            return Err(AppError::forbidden(
                "You do not own this link",
                json!({ "id": id }),
            ));
        }

        Ok(link)
    }

    /// Replaces the destination of an owned link.
    ///
    /// `short_code` and `clicks` are left unchanged.
    ///
    /// # Errors
    ///
    /// Checked in order: [`AppError::NotFound`], [`AppError::Forbidden`],
    /// [`AppError::Validation`]. Nothing is written when any check fails.
    pub async fn update(
        &self,
        id: i64,
        original_url: &str,
        requester: &Requester,
    ) -> Result<Link, AppError> {
        self.get(id, requester).await?;
        validate_original_url(original_url)?;

        let link = self
            .repository
            .update_url(id, original_url)
            .await?
            .ok_or_else(|| link_not_found(id))?;

        metrics::counter!("links_updated_total").increment(1);
        tracing::info!(id, short_code = %link.short_code, "Link updated");

        Ok(link)
    }

    /// Permanently deletes an owned link, discarding its click count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] or [`AppError::Forbidden`] as for
    /// [`Self::get`].
    pub async fn delete(&self, id: i64, requester: &Requester) -> Result<(), AppError> {
        let link = self.get(id, requester).await?;

        if !self.repository.delete(id).await? {
            return Err(link_not_found(id));
        }

        metrics::counter!("links_deleted_total").increment(1);
        tracing::info!(id, short_code = %link.short_code, "Link deleted");

        Ok(())
    }

    /// Lists an owner's links, most recent first.
    ///
    /// A blank `search` is treated as no filter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn list(
        &self,
        owner_id: OwnerId,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<Link>, AppError> {
        let filter = LinkFilter {
            owner_id,
            search: search
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        };

        let total = self.repository.count(filter.clone()).await?;
        let items = self
            .repository
            .list(filter, page.offset(), page.limit())
            .await?;

        Ok(Page::new(items, total, page))
    }

    /// Builds the public short URL for a code.
    pub fn short_url(&self, short_code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), short_code)
    }

    /// Checks connectivity with the backing store.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}

fn link_not_found(id: i64) -> AppError {
    AppError::not_found("Link not found", json!({ "id": id }))
}

/// Maps URL validation failures to user-facing messages.
fn validate_original_url(original_url: &str) -> Result<(), AppError> {
    validate_url(original_url).map_err(|e| match e {
        UrlValidationError::Missing => {
            AppError::bad_request("Please enter a URL.", json!({ "field": "original_url" }))
        }
        other => AppError::bad_request(
            "The URL must be valid and start with http:// or https://",
            json!({ "field": "original_url", "reason": other.to_string() }),
        ),
    })
}
