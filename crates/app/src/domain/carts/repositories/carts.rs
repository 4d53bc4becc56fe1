//! Carts Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};

use crate::{
    domain::carts::{
        data::NewCart,
        models::CartStatus,
        records::{CartId, CartRecord},
    },
    storage::StorageError,
};

const FIND_CART_BY_COOKIE_SQL: &str = include_str!("../sql/find_cart_by_cookie.sql");
const GET_CART_SQL: &str = include_str!("../sql/get_cart.sql");
const CREATE_CART_SQL: &str = include_str!("../sql/create_cart.sql");

/// Cart persistence.
#[automock]
#[async_trait]
pub trait CartsRepository: Send + Sync {
    /// Most recent cart with the given cookie and status.
    async fn find_cart_by_cookie(
        &self,
        cookie: &str,
        status: CartStatus,
    ) -> Result<CartRecord, StorageError>;

    /// Cart by id, whatever its status.
    async fn get_cart(&self, cart: CartId) -> Result<CartRecord, StorageError>;

    /// Insert a cart. Fails with `AlreadyExists` if an open cart already holds the cookie.
    async fn create_cart(&self, cart: NewCart) -> Result<CartRecord, StorageError>;
}

#[derive(Debug, Clone)]
pub struct PgCartsRepository {
    pool: PgPool,
}

impl PgCartsRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartsRepository for PgCartsRepository {
    async fn find_cart_by_cookie(
        &self,
        cookie: &str,
        status: CartStatus,
    ) -> Result<CartRecord, StorageError> {
        let cart = query_as::<Postgres, CartRecord>(FIND_CART_BY_COOKIE_SQL)
            .bind(cookie)
            .bind(status.as_str())
            .fetch_one(&self.pool)
            .await?;

        Ok(cart)
    }

    async fn get_cart(&self, cart: CartId) -> Result<CartRecord, StorageError> {
        let cart = query_as::<Postgres, CartRecord>(GET_CART_SQL)
            .bind(cart.into_i64())
            .fetch_one(&self.pool)
            .await?;

        Ok(cart)
    }

    async fn create_cart(&self, cart: NewCart) -> Result<CartRecord, StorageError> {
        let created = query_as::<Postgres, CartRecord>(CREATE_CART_SQL)
            .bind(cart.cookie)
            .bind(cart.status.as_str())
            .bind(SqlxTimestamp::from(cart.created_at))
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }
}

impl<'r> FromRow<'r, PgRow> for CartRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        Ok(Self {
            id: CartId::from_i64(row.try_get("id")?),
            cookie: row.try_get("cookie")?,
            status: status.parse().map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row
                .try_get::<Option<SqlxTimestamp>, _>("updated_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use sqlx::query;
    use testresult::TestResult;

    use crate::test::TestDb;

    use super::*;

    fn open_cart(cookie: &str) -> NewCart {
        NewCart {
            cookie: cookie.to_string(),
            status: CartStatus::Open,
            created_at: Timestamp::now(),
        }
    }

    #[tokio::test]
    async fn create_cart_then_find_by_cookie() -> TestResult {
        let Some(db) = TestDb::new_or_skip().await else {
            return Ok(());
        };

        let repository = PgCartsRepository::new(db.pool().clone());

        let created = repository.create_cart(open_cart("abc")).await?;
        let found = repository
            .find_cart_by_cookie("abc", CartStatus::Open)
            .await?;

        assert_eq!(found, created);
        assert_eq!(found.status, CartStatus::Open);

        Ok(())
    }

    #[tokio::test]
    async fn second_open_cart_for_cookie_already_exists() -> TestResult {
        let Some(db) = TestDb::new_or_skip().await else {
            return Ok(());
        };

        let repository = PgCartsRepository::new(db.pool().clone());

        repository.create_cart(open_cart("abc")).await?;

        let result = repository.create_cart(open_cart("abc")).await;

        assert!(
            matches!(result, Err(StorageError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn closed_carts_are_not_found_by_open_lookup() -> TestResult {
        let Some(db) = TestDb::new_or_skip().await else {
            return Ok(());
        };

        let repository = PgCartsRepository::new(db.pool().clone());

        let created = repository.create_cart(open_cart("abc")).await?;

        query("UPDATE carts SET status = 'closed' WHERE id = $1")
            .bind(created.id.into_i64())
            .execute(db.pool())
            .await?;

        let result = repository.find_cart_by_cookie("abc", CartStatus::Open).await;

        assert!(
            matches!(result, Err(StorageError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        let closed = repository.get_cart(created.id).await?;

        assert_eq!(closed.status, CartStatus::Closed);

        Ok(())
    }

    #[tokio::test]
    async fn get_cart_unknown_id_returns_not_found() -> TestResult {
        let Some(db) = TestDb::new_or_skip().await else {
            return Ok(());
        };

        let repository = PgCartsRepository::new(db.pool().clone());

        let result = repository.get_cart(CartId::from_i64(42)).await;

        assert!(
            matches!(result, Err(StorageError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }
}
