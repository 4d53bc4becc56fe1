//! Items Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};

use crate::{
    domain::items::{
        data::NewItem,
        records::{ItemId, ItemRecord},
    },
    storage::StorageError,
};

const LIST_ITEMS_SQL: &str = include_str!("sql/list_items.sql");
const GET_ITEMS_BY_IDS_SQL: &str = include_str!("sql/get_items_by_ids.sql");
const CREATE_ITEM_SQL: &str = include_str!("sql/create_item.sql");

/// Catalog persistence.
#[automock]
#[async_trait]
pub trait ItemsRepository: Send + Sync {
    /// All catalog items ordered by id.
    async fn list_items(&self) -> Result<Vec<ItemRecord>, StorageError>;

    /// Batch lookup. Ids with no matching row are silently absent from the result.
    async fn get_items_by_ids(&self, ids: &[ItemId]) -> Result<Vec<ItemRecord>, StorageError>;

    /// Insert a catalog item.
    async fn create_item(&self, item: NewItem) -> Result<ItemRecord, StorageError>;
}

#[derive(Debug, Clone)]
pub struct PgItemsRepository {
    pool: PgPool,
}

impl PgItemsRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemsRepository for PgItemsRepository {
    async fn list_items(&self) -> Result<Vec<ItemRecord>, StorageError> {
        let items = query_as::<Postgres, ItemRecord>(LIST_ITEMS_SQL)
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    async fn get_items_by_ids(&self, ids: &[ItemId]) -> Result<Vec<ItemRecord>, StorageError> {
        let ids: Vec<i64> = ids.iter().copied().map(ItemId::into_i64).collect();

        let items = query_as::<Postgres, ItemRecord>(GET_ITEMS_BY_IDS_SQL)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    async fn create_item(&self, item: NewItem) -> Result<ItemRecord, StorageError> {
        let price = i64::try_from(item.price).map_err(|_overflow| StorageError::InvalidData)?;

        let created = query_as::<Postgres, ItemRecord>(CREATE_ITEM_SQL)
            .bind(item.name)
            .bind(price)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }
}

impl<'r> FromRow<'r, PgRow> for ItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: ItemId::from_i64(row.try_get("id")?),
            name: row.try_get("name")?,
            price: try_get_amount(row, "price")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row
                .try_get::<Option<SqlxTimestamp>, _>("updated_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}

fn try_get_amount(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    let amount_i64: i64 = row.try_get(col)?;

    u64::try_from(amount_i64).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}
