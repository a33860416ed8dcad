//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

use super::owner::{OwnerId, Requester};

/// A shortened URL with its click counter.
///
/// `short_code` is the base62 encoding of `id`; it is assigned once at
/// creation and never changes, even when `original_url` is edited.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: i64,
    pub short_code: String,
    pub original_url: String,
    pub clicks: i64,
    pub owner_id: Option<OwnerId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        short_code: String,
        original_url: String,
        clicks: i64,
        owner_id: Option<OwnerId>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            short_code,
            original_url,
            clicks,
            owner_id,
            created_at,
            updated_at,
        }
    }

    /// Returns true if the link was created without an account.
    ///
    /// Anonymous links can be resolved but never edited or deleted.
    pub fn is_anonymous(&self) -> bool {
        self.owner_id.is_none()
    }

    /// Returns true if `requester` may mutate this link.
    pub fn is_owned_by(&self, requester: &Requester) -> bool {
        match (self.owner_id, requester.owner_id()) {
            (Some(owner), Some(who)) => owner == who,
            _ => false,
        }
    }
}

/// Input data for inserting a link whose id has already been reserved.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLink {
    pub id: i64,
    pub short_code: String,
    pub original_url: String,
    pub owner_id: Option<OwnerId>,
}
