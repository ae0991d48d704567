//! Optimistic cache mutation with rollback.
//!
//! Snapshot the cached list, apply the expected result right away so the
//! table reflects the edit, then await the remote write. A rejected write
//! restores the snapshot.
//!
//! # Example
//!
//! ```
//! use datatable_lib::cache::{CacheStore, CachedList, QueryCache};
//! use datatable_lib::optimistic::OptimisticUpdate;
//!
//! # let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! # runtime.block_on(async {
//! let cache = QueryCache::new();
//! cache.set("billing-entities", CachedList::from_entities(vec!["Old name".to_string()]));
//!
//! let update = OptimisticUpdate::snapshot(&cache, "billing-entities");
//! update.apply(|list| list.entities[0] = "New name".to_string());
//!
//! let result: Result<(), _> = update
//!     .commit_or_rollback(async { Err::<(), _>("409 conflict") })
//!     .await;
//!
//! assert!(result.is_err());
//! assert_eq!(cache.get("billing-entities").unwrap().entities, vec!["Old name"]);
//! # });
//! ```

use std::future::Future;

use crate::cache::CacheStore;
use crate::cache::CachedList;
use crate::error::MutationError;

/// An in-flight optimistic change to one cache key.
pub struct OptimisticUpdate<'a, S: CacheStore> {
    store: &'a S,
    key: String,
    snapshot: Option<CachedList<S::Item>>,
}

impl<'a, S: CacheStore> OptimisticUpdate<'a, S> {
    /// Records the current value under `key` so it can be restored.
    pub fn snapshot(store: &'a S, key: impl Into<String>) -> Self {
        let key = key.into();
        let snapshot = store.get(&key);
        log::trace!(
            "[optimistic] snapshot {} ({})",
            key,
            if snapshot.is_some() { "cached" } else { "empty" }
        );
        Self {
            store,
            key,
            snapshot,
        }
    }

    /// Returns the value captured at snapshot time.
    pub fn previous(&self) -> Option<&CachedList<S::Item>> {
        self.snapshot.as_ref()
    }

    /// Writes the speculative value. Starts from an empty list when the key
    /// was not cached.
    pub fn apply(&self, f: impl FnOnce(&mut CachedList<S::Item>)) {
        let mut value = self.snapshot.clone().unwrap_or_default();
        f(&mut value);
        self.store.set(&self.key, value);
    }

    /// Awaits the remote write. On success the applied value stays; on
    /// failure the snapshot is restored (or the key removed if it was not
    /// cached) and the error is returned.
    pub async fn commit_or_rollback<R, E, F>(self, request: F) -> Result<R, MutationError<E>>
    where
        F: Future<Output = Result<R, E>>,
    {
        match request.await {
            Ok(result) => {
                log::debug!("[optimistic] committed {}", self.key);
                Ok(result)
            }
            Err(e) => {
                self.rollback();
                Err(MutationError::Rejected(e))
            }
        }
    }

    /// Restores the snapshot without waiting for anything.
    pub fn rollback(self) {
        log::debug!("[optimistic] rolling back {}", self.key);
        match self.snapshot {
            Some(previous) => self.store.set(&self.key, previous),
            None => self.store.remove(&self.key),
        }
    }
}

impl<S: CacheStore> std::fmt::Debug for OptimisticUpdate<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptimisticUpdate")
            .field("key", &self.key)
            .field("has_snapshot", &self.snapshot.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::QueryCache;

    #[derive(Debug, Clone, PartialEq)]
    struct BillingEntity {
        id: u32,
        name: String,
    }

    fn entity(id: u32, name: &str) -> BillingEntity {
        BillingEntity {
            id,
            name: name.to_string(),
        }
    }

    fn seeded() -> QueryCache<BillingEntity> {
        let cache = QueryCache::new();
        cache.set(
            "billing-entities",
            CachedList::from_entities(vec![entity(1, "North"), entity(2, "South")]),
        );
        cache
    }

    #[tokio::test]
    async fn test_commit_keeps_applied_value() {
        let cache = seeded();
        let update = OptimisticUpdate::snapshot(&cache, "billing-entities");
        update.apply(|list| {
            list.replace_where(|e| e.id == 2, entity(2, "South East"));
        });

        let saved = update
            .commit_or_rollback(async { Ok::<_, String>(entity(2, "South East")) })
            .await
            .unwrap();

        assert_eq!(saved.name, "South East");
        assert_eq!(cache.get("billing-entities").unwrap().entities[1], saved);
    }

    #[tokio::test]
    async fn test_failure_restores_snapshot() {
        let cache = seeded();
        let update = OptimisticUpdate::snapshot(&cache, "billing-entities");
        update.apply(|list| {
            list.remove_where(|e| e.id == 1);
        });
        assert_eq!(cache.get("billing-entities").unwrap().len(), 1);

        let err = update
            .commit_or_rollback(async { Err::<(), _>("server error".to_string()) })
            .await
            .unwrap_err();

        assert_eq!(err.into_inner(), "server error");
        assert_eq!(
            cache.get("billing-entities").unwrap().entities,
            vec![entity(1, "North"), entity(2, "South")]
        );
    }

    #[tokio::test]
    async fn test_failure_removes_key_that_was_absent() {
        let cache: QueryCache<BillingEntity> = QueryCache::new();
        let update = OptimisticUpdate::snapshot(&cache, "billing-entities");
        assert!(update.previous().is_none());
        update.apply(|list| list.entities.push(entity(3, "West")));
        assert_eq!(cache.len(), 1);

        let result = update.commit_or_rollback(async { Err::<(), _>(()) }).await;

        assert!(result.is_err());
        assert!(cache.is_empty());
    }
}
