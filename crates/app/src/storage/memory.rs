//! In-memory storage backend.
//!
//! Implements every repository trait over a single mutex-guarded set of tables, enforcing the
//! same uniqueness and reference rules as the PostgreSQL schema. Each trait call is one critical
//! section, so the merge-on-add upsert is atomic here too.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use parking_lot::Mutex;

use crate::{
    domain::{
        carts::{
            data::{NewCart, NewCartItem},
            models::CartStatus,
            records::{CartId, CartItemId, CartItemRecord, CartRecord},
            repositories::{CartItemsRepository, CartsRepository},
        },
        items::{
            data::NewItem,
            records::{ItemId, ItemRecord},
            repository::ItemsRepository,
        },
    },
    storage::StorageError,
};

#[derive(Debug, Default)]
struct Tables {
    carts: Vec<CartRecord>,
    cart_items: Vec<CartItemRecord>,
    items: Vec<ItemRecord>,
}

/// Process-local storage. Clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a cart closed. Carts are only ever closed from outside the cart services.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if there is no cart with that id.
    pub fn close_cart(&self, cart: CartId) -> Result<(), StorageError> {
        let mut tables = self.tables.lock();

        let record = tables
            .carts
            .iter_mut()
            .find(|record| record.id == cart)
            .ok_or(StorageError::NotFound)?;

        record.status = CartStatus::Closed;
        record.updated_at = Some(Timestamp::now());

        Ok(())
    }
}

/// Ids are assigned sequentially from 1. Rows are never physically removed.
fn next_id(len: usize) -> Result<i64, StorageError> {
    i64::try_from(len)
        .ok()
        .and_then(|count| count.checked_add(1))
        .ok_or(StorageError::InvalidData)
}

#[async_trait]
impl CartsRepository for MemoryStorage {
    async fn find_cart_by_cookie(
        &self,
        cookie: &str,
        status: CartStatus,
    ) -> Result<CartRecord, StorageError> {
        self.tables
            .lock()
            .carts
            .iter()
            .rev()
            .find(|record| record.cookie == cookie && record.status == status)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn get_cart(&self, cart: CartId) -> Result<CartRecord, StorageError> {
        self.tables
            .lock()
            .carts
            .iter()
            .find(|record| record.id == cart)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn create_cart(&self, cart: NewCart) -> Result<CartRecord, StorageError> {
        if cart.cookie.is_empty() {
            return Err(StorageError::InvalidData);
        }

        let mut tables = self.tables.lock();

        let open_exists = cart.status == CartStatus::Open
            && tables
                .carts
                .iter()
                .any(|record| record.cookie == cart.cookie && record.status == CartStatus::Open);

        if open_exists {
            return Err(StorageError::AlreadyExists);
        }

        let record = CartRecord {
            id: CartId::from_i64(next_id(tables.carts.len())?),
            cookie: cart.cookie,
            status: cart.status,
            created_at: cart.created_at,
            updated_at: None,
        };

        tables.carts.push(record.clone());

        Ok(record)
    }
}

#[async_trait]
impl CartItemsRepository for MemoryStorage {
    async fn list_cart_items(&self, cart: CartId) -> Result<Vec<CartItemRecord>, StorageError> {
        Ok(self
            .tables
            .lock()
            .cart_items
            .iter()
            .filter(|record| record.cart_id == cart)
            .cloned()
            .collect())
    }

    async fn get_cart_item(&self, cart_item: CartItemId) -> Result<CartItemRecord, StorageError> {
        self.tables
            .lock()
            .cart_items
            .iter()
            .find(|record| record.id == cart_item)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn add_cart_item(&self, item: NewCartItem) -> Result<CartItemRecord, StorageError> {
        let mut tables = self.tables.lock();

        let cart_exists = tables.carts.iter().any(|record| record.id == item.cart_id);
        let item_exists = tables.items.iter().any(|record| record.id == item.item_id);

        if !cart_exists || !item_exists {
            return Err(StorageError::InvalidReference);
        }

        let live = tables.cart_items.iter_mut().find(|record| {
            record.cart_id == item.cart_id
                && record.item_id == item.item_id
                && record.deleted_at.is_none()
        });

        if let Some(record) = live {
            record.quantity = record
                .quantity
                .checked_add(item.quantity)
                .ok_or(StorageError::InvalidData)?;
            record.updated_at = Some(item.added_at);

            return Ok(record.clone());
        }

        let record = CartItemRecord {
            id: CartItemId::from_i64(next_id(tables.cart_items.len())?),
            cart_id: item.cart_id,
            item_id: item.item_id,
            quantity: item.quantity,
            created_at: item.added_at,
            updated_at: None,
            deleted_at: None,
        };

        tables.cart_items.push(record.clone());

        Ok(record)
    }

    async fn delete_cart_item(
        &self,
        cart_item: CartItemId,
        deleted_at: Timestamp,
    ) -> Result<(), StorageError> {
        let mut tables = self.tables.lock();

        let record = tables
            .cart_items
            .iter_mut()
            .find(|record| record.id == cart_item && record.deleted_at.is_none())
            .ok_or(StorageError::NotFound)?;

        record.deleted_at = Some(deleted_at);

        Ok(())
    }
}

#[async_trait]
impl ItemsRepository for MemoryStorage {
    async fn list_items(&self) -> Result<Vec<ItemRecord>, StorageError> {
        Ok(self.tables.lock().items.clone())
    }

    async fn get_items_by_ids(&self, ids: &[ItemId]) -> Result<Vec<ItemRecord>, StorageError> {
        Ok(self
            .tables
            .lock()
            .items
            .iter()
            .filter(|record| ids.contains(&record.id))
            .cloned()
            .collect())
    }

    async fn create_item(&self, item: NewItem) -> Result<ItemRecord, StorageError> {
        if item.name.is_empty() {
            return Err(StorageError::InvalidData);
        }

        let mut tables = self.tables.lock();

        let record = ItemRecord {
            id: ItemId::from_i64(next_id(tables.items.len())?),
            name: item.name,
            price: item.price,
            created_at: Timestamp::now(),
            updated_at: None,
        };

        tables.items.push(record.clone());

        Ok(record)
    }
}
