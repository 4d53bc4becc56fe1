//! Items service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, info};

use crate::domain::items::{
    cache::ItemsCache,
    data::NewItem,
    errors::ItemsServiceError,
    models::Item,
    repository::ItemsRepository,
};

#[derive(Clone)]
pub struct DefaultItemsService {
    repository: Arc<dyn ItemsRepository>,
    cache: ItemsCache,
}

impl fmt::Debug for DefaultItemsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultItemsService")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl DefaultItemsService {
    #[must_use]
    pub fn new(repository: Arc<dyn ItemsRepository>, cache: ItemsCache) -> Self {
        Self { repository, cache }
    }
}

#[async_trait]
impl ItemsService for DefaultItemsService {
    async fn list_items(&self) -> Result<Vec<Item>, ItemsServiceError> {
        if let Some(items) = self.cache.get().await {
            debug!(count = items.len(), "items served from cache");

            return Ok(items.to_vec());
        }

        let items: Arc<[Item]> = self
            .repository
            .list_items()
            .await
            .map_err(ItemsServiceError::storage("error retrieving items"))?
            .into_iter()
            .map(Item::from)
            .collect();

        self.cache.insert(Arc::clone(&items)).await;

        debug!(count = items.len(), "items cache refreshed");

        Ok(items.to_vec())
    }

    async fn create_item(&self, item: NewItem) -> Result<Item, ItemsServiceError> {
        if item.name.trim().is_empty() {
            return Err(ItemsServiceError::InvalidInput("the item name should be provided"));
        }

        let created = self
            .repository
            .create_item(item)
            .await
            .map_err(ItemsServiceError::storage("error creating item"))?;

        self.cache.invalidate().await;

        info!(item = %created.id, "created item");

        Ok(created.into())
    }
}

#[automock]
#[async_trait]
pub trait ItemsService: Send + Sync {
    /// Retrieves the whole catalog, through the cache.
    async fn list_items(&self) -> Result<Vec<Item>, ItemsServiceError>;

    /// Adds an item to the catalog and invalidates the cached listing.
    async fn create_item(&self, item: NewItem) -> Result<Item, ItemsServiceError>;
}
