//! In-process link repository.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::{Mutex, MutexGuard};
use serde_json::json;
use std::collections::{BTreeMap, HashMap};

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{LinkFilter, LinkRepository};
use crate::error::AppError;

#[derive(Debug, Default)]
struct Store {
    last_id: i64,
    links: BTreeMap<i64, Link>,
    codes: HashMap<String, i64>,
}

/// Link repository backed by process memory.
///
/// Mirrors the PostgreSQL semantics: ids come from a monotonically
/// increasing counter, `short_code` is unique, and each operation holds a
/// single lock over the counter and both maps so they change together and
/// click increments are atomic.
#[derive(Debug, Default)]
pub struct InMemoryLinkRepository {
    store: Mutex<Store>,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn store(&self) -> MutexGuard<'_, Store> {
        self.store.lock()
    }

    /// Number of stored links.
    pub fn len(&self) -> usize {
        self.store().links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn filter_matches(link: &Link, filter: &LinkFilter) -> bool {
    if link.owner_id != Some(filter.owner_id) {
        return false;
    }

    match &filter.search {
        None => true,
        Some(search) => {
            let needle = search.to_lowercase();
            link.original_url.to_lowercase().contains(&needle)
                || link.short_code.to_lowercase().contains(&needle)
        }
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn next_id(&self) -> Result<i64, AppError> {
        let mut store = self.store();
        store.last_id += 1;
        Ok(store.last_id)
    }

    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut store = self.store();

        if store.links.contains_key(&new_link.id) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "links_pkey" }),
            ));
        }
        if store.codes.contains_key(&new_link.short_code) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "links_short_code_key" }),
            ));
        }

        let now = Utc::now();
        let link = Link::new(
            new_link.id,
            new_link.short_code,
            new_link.original_url,
            0,
            new_link.owner_id,
            now,
            now,
        );

        store.last_id = store.last_id.max(link.id);
        store.codes.insert(link.short_code.clone(), link.id);
        store.links.insert(link.id, link.clone());

        Ok(link)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        Ok(self.store().links.get(&id).cloned())
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<Link>, AppError> {
        let store = self.store();
        Ok(store
            .codes
            .get(short_code)
            .and_then(|id| store.links.get(id))
            .cloned())
    }

    async fn increment_clicks(&self, short_code: &str) -> Result<Option<Link>, AppError> {
        let mut store = self.store();

        let Some(id) = store.codes.get(short_code).copied() else {
            return Ok(None);
        };

        Ok(store.links.get_mut(&id).map(|link| {
            link.clicks += 1;
            link.clone()
        }))
    }

    async fn update_url(&self, id: i64, original_url: &str) -> Result<Option<Link>, AppError> {
        let mut store = self.store();

        Ok(store.links.get_mut(&id).map(|link| {
            link.original_url = original_url.to_string();
            link.updated_at = Utc::now();
            link.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut store = self.store();

        match store.links.remove(&id) {
            Some(link) => {
                store.codes.remove(&link.short_code);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list(
        &self,
        filter: LinkFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Link>, AppError> {
        let store = self.store();

        let mut links: Vec<Link> = store
            .links
            .values()
            .filter(|link| filter_matches(link, &filter))
            .cloned()
            .collect();
        // Ids are handed out in creation order.
        links.sort_by(|a, b| b.id.cmp(&a.id));

        Ok(links
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(0))
            .take(usize::try_from(limit).unwrap_or(0))
            .collect())
    }

    async fn count(&self, filter: LinkFilter) -> Result<i64, AppError> {
        let store = self.store();
        let count = store.links.values().filter(|l| filter_matches(l, &filter)).count();
        Ok(count as i64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::OwnerId;

    fn new_link(id: i64, url: &str, owner: Option<i64>) -> NewLink {
        NewLink {
            id,
            short_code: crate::utils::base62::encode(id).unwrap(),
            original_url: url.to_string(),
            owner_id: owner.map(OwnerId::new),
        }
    }

    #[tokio::test]
    async fn test_ids_are_monotonic() {
        let repo = InMemoryLinkRepository::new();
        assert_eq!(repo.next_id().await.unwrap(), 1);
        assert_eq!(repo.next_id().await.unwrap(), 2);
        assert_eq!(repo.next_id().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_duplicate_code_conflicts() {
        let repo = InMemoryLinkRepository::new();
        repo.create(new_link(1, "https://a.com", None)).await.unwrap();

        let mut dup = new_link(2, "https://b.com", None);
        dup.short_code = "1".to_string();

        let err = repo.create(dup).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_increment_and_delete() {
        let repo = InMemoryLinkRepository::new();
        repo.create(new_link(1, "https://a.com", Some(1))).await.unwrap();

        assert_eq!(repo.increment_clicks("1").await.unwrap().unwrap().clicks, 1);
        assert_eq!(repo.increment_clicks("1").await.unwrap().unwrap().clicks, 2);

        assert!(repo.delete(1).await.unwrap());
        assert!(repo.increment_clicks("1").await.unwrap().is_none());
        assert!(!repo.delete(1).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_filters_by_owner_and_search() {
        let repo = InMemoryLinkRepository::new();
        repo.create(new_link(1, "https://docs.rs/tokio", Some(1))).await.unwrap();
        repo.create(new_link(2, "https://crates.io", Some(1))).await.unwrap();
        repo.create(new_link(3, "https://DOCS.rs/axum", Some(1))).await.unwrap();
        repo.create(new_link(4, "https://docs.rs/serde", Some(2))).await.unwrap();

        let filter = LinkFilter {
            owner_id: OwnerId::new(1),
            search: Some("docs".to_string()),
        };

        let links = repo.list(filter.clone(), 0, 10).await.unwrap();
        let ids: Vec<i64> = links.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(repo.count(filter).await.unwrap(), 2);
    }
}
