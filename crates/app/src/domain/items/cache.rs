//! Read-through cache of the catalog listing, backed by moka.
//!
//! The whole catalog is cached as a single entry. Entries expire after a fixed time-to-live and
//! are dropped immediately by [`ItemsCache::invalidate`], which the items service calls after
//! every write it performs. Writes that bypass the service are picked up once the entry expires.

use std::{sync::Arc, time::Duration};

use moka::future::Cache;

use crate::domain::items::models::Item;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CatalogKey;

/// Shared catalog cache handle. Clones share storage.
#[derive(Debug, Clone)]
pub struct ItemsCache {
    inner: Cache<CatalogKey, Arc<[Item]>>,
}

impl ItemsCache {
    /// Create a cache whose entry expires `ttl` after it was written.
    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            inner: Cache::builder().max_capacity(1).time_to_live(ttl).build(),
        }
    }

    /// Cached catalog, if present and not expired.
    pub async fn get(&self) -> Option<Arc<[Item]>> {
        self.inner.get(&CatalogKey).await
    }

    /// Replace the cached catalog.
    pub async fn insert(&self, items: Arc<[Item]>) {
        self.inner.insert(CatalogKey, items).await;
    }

    /// Drop the cached catalog.
    pub async fn invalidate(&self) {
        self.inner.invalidate(&CatalogKey).await;
    }
}
