//! Cart Items Repository

use async_trait::async_trait;
use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};

use crate::{
    domain::{
        carts::{
            data::NewCartItem,
            records::{CartId, CartItemId, CartItemRecord},
        },
        items::records::ItemId,
    },
    storage::StorageError,
};

const LIST_CART_ITEMS_SQL: &str = include_str!("../sql/list_cart_items.sql");
const GET_CART_ITEM_SQL: &str = include_str!("../sql/get_cart_item.sql");
const ADD_CART_ITEM_SQL: &str = include_str!("../sql/add_cart_item.sql");
const DELETE_CART_ITEM_SQL: &str = include_str!("../sql/delete_cart_item.sql");

/// Cart line item persistence.
#[automock]
#[async_trait]
pub trait CartItemsRepository: Send + Sync {
    /// Every row of the cart, soft-deleted ones included, in insertion order.
    async fn list_cart_items(&self, cart: CartId) -> Result<Vec<CartItemRecord>, StorageError>;

    /// Row by id, soft-deleted or not.
    async fn get_cart_item(&self, cart_item: CartItemId) -> Result<CartItemRecord, StorageError>;

    /// Atomically merge a quantity into the cart's live row for the item.
    ///
    /// Increments the live row in place when one exists; otherwise inserts a new row, leaving
    /// any soft-deleted rows for the pair untouched. Returns the row as stored.
    async fn add_cart_item(&self, item: NewCartItem) -> Result<CartItemRecord, StorageError>;

    /// Soft-delete a live row. Fails with `NotFound` if there is no live row with that id.
    async fn delete_cart_item(
        &self,
        cart_item: CartItemId,
        deleted_at: Timestamp,
    ) -> Result<(), StorageError>;
}

#[derive(Debug, Clone)]
pub struct PgCartItemsRepository {
    pool: PgPool,
}

impl PgCartItemsRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartItemsRepository for PgCartItemsRepository {
    async fn list_cart_items(&self, cart: CartId) -> Result<Vec<CartItemRecord>, StorageError> {
        let items = query_as::<Postgres, CartItemRecord>(LIST_CART_ITEMS_SQL)
            .bind(cart.into_i64())
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    async fn get_cart_item(&self, cart_item: CartItemId) -> Result<CartItemRecord, StorageError> {
        let item = query_as::<Postgres, CartItemRecord>(GET_CART_ITEM_SQL)
            .bind(cart_item.into_i64())
            .fetch_one(&self.pool)
            .await?;

        Ok(item)
    }

    async fn add_cart_item(&self, item: NewCartItem) -> Result<CartItemRecord, StorageError> {
        let saved = query_as::<Postgres, CartItemRecord>(ADD_CART_ITEM_SQL)
            .bind(item.cart_id.into_i64())
            .bind(item.item_id.into_i64())
            .bind(item.quantity)
            .bind(SqlxTimestamp::from(item.added_at))
            .fetch_one(&self.pool)
            .await?;

        Ok(saved)
    }

    async fn delete_cart_item(
        &self,
        cart_item: CartItemId,
        deleted_at: Timestamp,
    ) -> Result<(), StorageError> {
        let rows_affected = query(DELETE_CART_ITEM_SQL)
            .bind(cart_item.into_i64())
            .bind(SqlxTimestamp::from(deleted_at))
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows_affected == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for CartItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: CartItemId::from_i64(row.try_get("id")?),
            cart_id: CartId::from_i64(row.try_get("cart_id")?),
            item_id: ItemId::from_i64(row.try_get("item_id")?),
            quantity: row.try_get("quantity")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row
                .try_get::<Option<SqlxTimestamp>, _>("updated_at")?
                .map(SqlxTimestamp::to_jiff),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
