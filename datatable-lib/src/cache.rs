//! List query cache.
//!
//! Every cached list has the same tagged shape, [`CachedList`], whether it
//! came from a paginated endpoint or a plain list endpoint. Callers never
//! branch on whether a cache entry is a bare array or a wrapper.

use dashmap::DashMap;
use serde::Deserialize;
use serde::Serialize;

use crate::query::PageResponse;

/// A cached list of entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedList<T> {
    /// The cached rows.
    pub entities: Vec<T>,
    /// Total rows on the server, when known.
    #[serde(default)]
    pub total: Option<usize>,
}

impl<T> CachedList<T> {
    /// Creates a list from a plain (unpaginated) response.
    pub fn from_entities(entities: Vec<T>) -> Self {
        Self {
            entities,
            total: None,
        }
    }

    /// Returns the number of cached rows.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` if no rows are cached.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Replaces the first entity matching the predicate. Returns `true` if
    /// one was found.
    pub fn replace_where(&mut self, pred: impl Fn(&T) -> bool, entity: T) -> bool {
        match self.entities.iter_mut().find(|e| pred(e)) {
            Some(slot) => {
                *slot = entity;
                true
            }
            None => false,
        }
    }

    /// Removes every entity matching the predicate. Returns how many.
    pub fn remove_where(&mut self, pred: impl Fn(&T) -> bool) -> usize {
        let before = self.entities.len();
        self.entities.retain(|e| !pred(e));
        let removed = before - self.entities.len();
        if let Some(total) = self.total.as_mut() {
            *total = total.saturating_sub(removed);
        }
        removed
    }
}

impl<T> From<PageResponse<T>> for CachedList<T> {
    fn from(response: PageResponse<T>) -> Self {
        Self {
            entities: response.entities,
            total: Some(response.total),
        }
    }
}

impl<T> Default for CachedList<T> {
    fn default() -> Self {
        Self::from_entities(Vec::new())
    }
}

/// A keyed store of cached lists.
pub trait CacheStore {
    /// The entity type held by the lists.
    type Item: Clone;

    /// Returns a copy of the list under a key.
    fn get(&self, key: &str) -> Option<CachedList<Self::Item>>;

    /// Stores a list under a key.
    fn set(&self, key: &str, value: CachedList<Self::Item>);

    /// Removes a key.
    fn remove(&self, key: &str);

    /// Removes every key starting with the prefix. Returns how many.
    fn invalidate_prefix(&self, prefix: &str) -> usize;
}

/// An in-memory list cache backed by a concurrent hash map.
///
/// Keys are free-form; the convention is `resource?query`, e.g.
/// `billing-entities?page=1&limit=10`, so a whole resource can be
/// invalidated by prefix after a write.
///
/// # Example
///
/// ```
/// use datatable_lib::cache::{CacheStore, CachedList, QueryCache};
///
/// let cache = QueryCache::new();
/// cache.set("kits?page=1", CachedList::from_entities(vec!["SN-1".to_string()]));
/// assert_eq!(cache.invalidate_prefix("kits"), 1);
/// assert!(cache.get("kits?page=1").is_none());
/// ```
#[derive(Debug)]
pub struct QueryCache<T> {
    store: DashMap<String, CachedList<T>>,
}

impl<T> QueryCache<T> {
    /// Creates a new empty cache.
    pub fn new() -> Self {
        Self {
            store: DashMap::new(),
        }
    }

    /// Returns the number of cached lists.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Mutates a cached list in place. Returns `false` if the key is absent.
    pub fn update(&self, key: &str, f: impl FnOnce(&mut CachedList<T>)) -> bool {
        match self.store.get_mut(key) {
            Some(mut entry) => {
                f(entry.value_mut());
                true
            }
            None => false,
        }
    }
}

impl<T> Default for QueryCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> CacheStore for QueryCache<T> {
    type Item = T;

    fn get(&self, key: &str) -> Option<CachedList<T>> {
        self.store.get(key).map(|entry| entry.value().clone())
    }

    fn set(&self, key: &str, value: CachedList<T>) {
        self.store.insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.store.remove(key);
    }

    fn invalidate_prefix(&self, prefix: &str) -> usize {
        let mut removed = 0;
        self.store.retain(|key, _| {
            if key.starts_with(prefix) {
                removed += 1;
                false
            } else {
                true
            }
        });
        log::debug!("[cache] invalidated {} entries under {}", removed, prefix);
        removed
    }
}
