//! Cart items service.
//!
//! Line items are listed joined with catalog data, added with quantity merging, and
//! soft-deleted. Every mutation is rejected once the owning cart is closed.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use crate::{
    domain::{
        carts::{
            data::NewCartItem,
            errors::CartsServiceError,
            models::{CartId, CartItem, CartItemId, CartStatus},
            records::{CartItemRecord, CartRecord},
            repositories::{CartItemsRepository, CartsRepository},
        },
        items::{ItemsRepository, models::Item, records::ItemId},
    },
    storage::StorageError,
};

#[derive(Clone)]
pub struct DefaultCartItemsService {
    carts: Arc<dyn CartsRepository>,
    cart_items: Arc<dyn CartItemsRepository>,
    items: Arc<dyn ItemsRepository>,
}

impl fmt::Debug for DefaultCartItemsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultCartItemsService").finish_non_exhaustive()
    }
}

impl DefaultCartItemsService {
    #[must_use]
    pub fn new(
        carts: Arc<dyn CartsRepository>,
        cart_items: Arc<dyn CartItemsRepository>,
        items: Arc<dyn ItemsRepository>,
    ) -> Self {
        Self {
            carts,
            cart_items,
            items,
        }
    }

    /// Fetch the cart and reject it unless it still accepts mutation.
    async fn open_cart(&self, cart: CartId) -> Result<CartRecord, CartsServiceError> {
        let record = self
            .carts
            .get_cart(cart)
            .await
            .map_err(CartsServiceError::storage("error retrieving cart"))?;

        if record.status == CartStatus::Closed {
            warn!(cart = %cart, "rejected mutation of closed cart");

            return Err(CartsServiceError::CartClosed);
        }

        Ok(record)
    }

    async fn items_by_id(
        &self,
        rows: &[CartItemRecord],
    ) -> Result<FxHashMap<ItemId, Item>, CartsServiceError> {
        let mut ids: Vec<ItemId> = rows.iter().map(|row| row.item_id).collect();

        ids.sort_unstable();
        ids.dedup();

        match self.items.get_items_by_ids(&ids).await {
            Ok(records) => Ok(records
                .into_iter()
                .map(|record| (record.id, Item::from(record)))
                .collect()),
            Err(StorageError::NotFound) => Ok(FxHashMap::default()),
            Err(source) => Err(CartsServiceError::Storage {
                context: "error retrieving items by item-ids",
                source,
            }),
        }
    }
}

#[async_trait]
impl CartItemsService for DefaultCartItemsService {
    async fn list_cart_items(&self, cart: CartId) -> Result<Vec<CartItem>, CartsServiceError> {
        let rows = match self.cart_items.list_cart_items(cart).await {
            Ok(rows) => rows,
            Err(StorageError::NotFound) => return Ok(Vec::new()),
            Err(source) => {
                return Err(CartsServiceError::Storage {
                    context: "error retrieving cart-items by cart-id",
                    source,
                });
            }
        };

        let active: Vec<CartItemRecord> = rows
            .into_iter()
            .filter(CartItemRecord::is_active)
            .collect();

        if active.is_empty() {
            return Ok(Vec::new());
        }

        let items = self.items_by_id(&active).await?;

        Ok(active
            .into_iter()
            .map(|row| {
                let item = items.get(&row.item_id).cloned();

                if item.is_none() {
                    debug!(
                        cart_item = %row.id,
                        item = %row.item_id,
                        "cart item references unknown item"
                    );
                }

                CartItem::from_record(row, item)
            })
            .collect())
    }

    async fn add_item(
        &self,
        cart: CartId,
        item: ItemId,
        quantity: i64,
    ) -> Result<(), CartsServiceError> {
        self.open_cart(cart).await?;

        let saved = self
            .cart_items
            .add_cart_item(NewCartItem {
                cart_id: cart,
                item_id: item,
                quantity,
                added_at: Timestamp::now(),
            })
            .await
            .map_err(|source| match source {
                StorageError::InvalidReference => CartsServiceError::InvalidInput("unknown item"),
                source => CartsServiceError::storage("error adding item to cart")(source),
            })?;

        debug!(
            cart = %cart,
            cart_item = %saved.id,
            quantity = saved.quantity,
            "cart item saved"
        );

        Ok(())
    }

    async fn delete_item(
        &self,
        cart: CartId,
        cart_item: CartItemId,
    ) -> Result<(), CartsServiceError> {
        self.open_cart(cart).await?;

        let record = self
            .cart_items
            .get_cart_item(cart_item)
            .await
            .map_err(CartsServiceError::storage("error retrieving cart-item"))?;

        if record.cart_id != cart {
            warn!(cart = %cart, cart_item = %cart_item, "cart item belongs to another cart");

            return Err(CartsServiceError::NotOwned);
        }

        if record.deleted_at.is_some() {
            return Err(CartsServiceError::NotFound);
        }

        self.cart_items
            .delete_cart_item(cart_item, Timestamp::now())
            .await
            .map_err(CartsServiceError::storage("error deleting cart-item"))?;

        info!(cart = %cart, cart_item = %cart_item, "cart item deleted");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartItemsService: Send + Sync {
    /// Active line items of a cart, joined with their catalog items, in storage order.
    async fn list_cart_items(&self, cart: CartId) -> Result<Vec<CartItem>, CartsServiceError>;

    /// Add `quantity` of an item to an open cart, merging into the live line if there is one.
    async fn add_item(
        &self,
        cart: CartId,
        item: ItemId,
        quantity: i64,
    ) -> Result<(), CartsServiceError>;

    /// Soft-delete a line item of an open cart.
    async fn delete_item(
        &self,
        cart: CartId,
        cart_item: CartItemId,
    ) -> Result<(), CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{
            carts::{
                CartsService,
                models::Cart,
                repositories::{MockCartItemsRepository, MockCartsRepository},
            },
            items::{MockItemsRepository, records::ItemRecord},
        },
        test::{TestContext, helpers::create_item},
    };

    use super::*;

    fn cart_record(id: i64, status: CartStatus) -> CartRecord {
        CartRecord {
            id: CartId::from_i64(id),
            cookie: "abc".to_string(),
            status,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: None,
        }
    }

    fn row(id: i64, item: i64, quantity: i64, deleted: bool) -> CartItemRecord {
        CartItemRecord {
            id: CartItemId::from_i64(id),
            cart_id: CartId::from_i64(1),
            item_id: ItemId::from_i64(item),
            quantity,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: None,
            deleted_at: deleted.then_some(Timestamp::UNIX_EPOCH),
        }
    }

    fn item_record(id: i64) -> ItemRecord {
        ItemRecord {
            id: ItemId::from_i64(id),
            name: format!("item {id}"),
            price: 1_00,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: None,
        }
    }

    async fn open_cart(ctx: &TestContext) -> Result<Cart, CartsServiceError> {
        ctx.carts.retrieve_cart_required("abc").await
    }

    #[tokio::test]
    async fn add_then_add_merges_quantities() -> TestResult {
        let ctx = TestContext::new();
        let cart = open_cart(&ctx).await?;
        let item = create_item(&ctx, "Ladle", 4_00).await?;

        ctx.cart_items.add_item(cart.id, item.id, 2).await?;

        let after_first = ctx.cart_items.list_cart_items(cart.id).await?;

        assert_eq!(after_first.len(), 1);
        assert_eq!(after_first.first().map(|line| line.quantity), Some(2));

        ctx.cart_items.add_item(cart.id, item.id, 3).await?;

        let after_second = ctx.cart_items.list_cart_items(cart.id).await?;

        assert_eq!(
            after_second,
            vec![CartItem {
                id: CartItemId::from_i64(1),
                cart_id: cart.id,
                item: Some(item),
                quantity: 5,
                is_deleted: false,
            }]
        );

        Ok(())
    }

    #[tokio::test]
    async fn add_after_delete_creates_new_row() -> TestResult {
        let ctx = TestContext::new();
        let cart = open_cart(&ctx).await?;
        let item = create_item(&ctx, "Ladle", 4_00).await?;

        ctx.cart_items.add_item(cart.id, item.id, 2).await?;

        let deleted = CartItemId::from_i64(1);

        ctx.cart_items.delete_item(cart.id, deleted).await?;
        ctx.cart_items.add_item(cart.id, item.id, 3).await?;

        let lines = ctx.cart_items.list_cart_items(cart.id).await?;
        let old_row = ctx.storage.get_cart_item(deleted).await?;

        assert_eq!(lines.len(), 1);
        assert_eq!(lines.first().map(|line| line.id), Some(CartItemId::from_i64(2)));
        assert_eq!(lines.first().map(|line| line.quantity), Some(3));
        assert_eq!(old_row.quantity, 2, "deleted row keeps its last quantity");
        assert!(old_row.deleted_at.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn zero_and_negative_quantities_are_accepted() -> TestResult {
        let ctx = TestContext::new();
        let cart = open_cart(&ctx).await?;
        let ladle = create_item(&ctx, "Ladle", 4_00).await?;
        let sieve = create_item(&ctx, "Sieve", 6_00).await?;

        ctx.cart_items.add_item(cart.id, ladle.id, 0).await?;
        ctx.cart_items.add_item(cart.id, sieve.id, 3).await?;
        ctx.cart_items.add_item(cart.id, sieve.id, -1).await?;

        let lines = ctx.cart_items.list_cart_items(cart.id).await?;
        let zero_row = ctx.storage.get_cart_item(CartItemId::from_i64(1)).await?;

        assert_eq!(zero_row.quantity, 0, "zero quantity row is stored");
        assert_eq!(lines.len(), 1, "zero quantity row is not listed");
        assert_eq!(lines.first().map(|line| line.quantity), Some(2));

        ctx.cart_items.add_item(cart.id, sieve.id, -2).await?;

        assert!(ctx.cart_items.list_cart_items(cart.id).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn listing_is_idempotent_and_ordered() -> TestResult {
        let ctx = TestContext::new();
        let cart = open_cart(&ctx).await?;
        let whisk = create_item(&ctx, "Whisk", 3_00).await?;
        let grater = create_item(&ctx, "Grater", 7_00).await?;

        ctx.cart_items.add_item(cart.id, grater.id, 1).await?;
        ctx.cart_items.add_item(cart.id, whisk.id, 2).await?;

        let first = ctx.cart_items.list_cart_items(cart.id).await?;
        let second = ctx.cart_items.list_cart_items(cart.id).await?;

        let names: Vec<Option<String>> = first
            .iter()
            .map(|line| line.item.as_ref().map(|item| item.name.clone()))
            .collect();

        assert_eq!(first, second);
        assert_eq!(
            names,
            vec![Some("Grater".to_string()), Some("Whisk".to_string())]
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_skips_deleted_rows() -> TestResult {
        let ctx = TestContext::new();
        let cart = open_cart(&ctx).await?;
        let whisk = create_item(&ctx, "Whisk", 3_00).await?;
        let grater = create_item(&ctx, "Grater", 7_00).await?;

        ctx.cart_items.add_item(cart.id, whisk.id, 1).await?;
        ctx.cart_items.add_item(cart.id, grater.id, 4).await?;
        ctx.cart_items
            .delete_item(cart.id, CartItemId::from_i64(1))
            .await?;

        let lines = ctx.cart_items.list_cart_items(cart.id).await?;

        assert_eq!(lines.len(), 1);
        assert_eq!(lines.first().map(|line| line.quantity), Some(4));
        assert_eq!(lines.first().map(|line| line.is_deleted), Some(false));

        Ok(())
    }

    #[tokio::test]
    async fn list_empty_cart_returns_empty_without_item_lookup() -> TestResult {
        let mut cart_items = MockCartItemsRepository::new();
        let mut items = MockItemsRepository::new();

        cart_items
            .expect_list_cart_items()
            .once()
            .return_once(|_| Err(StorageError::NotFound));

        items.expect_get_items_by_ids().never();

        let service = DefaultCartItemsService::new(
            Arc::new(MockCartsRepository::new()),
            Arc::new(cart_items),
            Arc::new(items),
        );

        let lines = service.list_cart_items(CartId::from_i64(1)).await?;

        assert!(lines.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn list_keeps_lines_with_dangling_item_reference() -> TestResult {
        let mut cart_items = MockCartItemsRepository::new();
        let mut items = MockItemsRepository::new();

        cart_items.expect_list_cart_items().once().return_once(|_| {
            Ok(vec![
                row(1, 5, 2, false),
                row(2, 6, 1, true),
                row(3, 7, 1, false),
                row(4, 5, -3, false),
            ])
        });

        items
            .expect_get_items_by_ids()
            .once()
            .withf(|ids| ids == [ItemId::from_i64(5), ItemId::from_i64(7)])
            .return_once(|_| Ok(vec![item_record(5)]));

        let service = DefaultCartItemsService::new(
            Arc::new(MockCartsRepository::new()),
            Arc::new(cart_items),
            Arc::new(items),
        );

        let lines = service.list_cart_items(CartId::from_i64(1)).await?;

        let summary: Vec<(i64, bool)> = lines
            .iter()
            .map(|line| (line.id.into_i64(), line.item.is_some()))
            .collect();

        assert_eq!(summary, vec![(1, true), (3, false)]);

        Ok(())
    }

    #[tokio::test]
    async fn list_wraps_item_lookup_failure() {
        let mut cart_items = MockCartItemsRepository::new();
        let mut items = MockItemsRepository::new();

        cart_items
            .expect_list_cart_items()
            .once()
            .return_once(|_| Ok(vec![row(1, 5, 2, false)]));

        items
            .expect_get_items_by_ids()
            .once()
            .return_once(|_| Err(StorageError::Sql(sqlx::Error::PoolTimedOut)));

        let service = DefaultCartItemsService::new(
            Arc::new(MockCartsRepository::new()),
            Arc::new(cart_items),
            Arc::new(items),
        );

        let result = service.list_cart_items(CartId::from_i64(1)).await;

        assert!(
            matches!(
                result,
                Err(CartsServiceError::Storage {
                    context: "error retrieving items by item-ids",
                    ..
                })
            ),
            "expected Storage error, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_on_closed_cart_is_rejected_and_row_unchanged() -> TestResult {
        let ctx = TestContext::new();
        let cart = open_cart(&ctx).await?;
        let item = create_item(&ctx, "Ladle", 4_00).await?;

        ctx.cart_items.add_item(cart.id, item.id, 2).await?;
        ctx.storage.close_cart(cart.id)?;

        let line = CartItemId::from_i64(1);
        let result = ctx.cart_items.delete_item(cart.id, line).await;
        let row = ctx.storage.get_cart_item(line).await?;

        assert!(
            matches!(result, Err(CartsServiceError::CartClosed)),
            "expected CartClosed, got {result:?}"
        );
        assert!(row.deleted_at.is_none(), "row should be untouched");
        assert_eq!(row.quantity, 2);

        Ok(())
    }

    #[tokio::test]
    async fn add_on_closed_cart_is_rejected_without_write() {
        let mut carts = MockCartsRepository::new();
        let mut cart_items = MockCartItemsRepository::new();

        carts
            .expect_get_cart()
            .once()
            .return_once(|_| Ok(cart_record(1, CartStatus::Closed)));

        cart_items.expect_add_cart_item().never();

        let service = DefaultCartItemsService::new(
            Arc::new(carts),
            Arc::new(cart_items),
            Arc::new(MockItemsRepository::new()),
        );

        let result = service
            .add_item(CartId::from_i64(1), ItemId::from_i64(5), 2)
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::CartClosed)),
            "expected CartClosed, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_of_other_carts_item_is_not_owned() -> TestResult {
        let ctx = TestContext::new();
        let mine = open_cart(&ctx).await?;
        let theirs = ctx.carts.retrieve_cart_required("xyz").await?;
        let item = create_item(&ctx, "Ladle", 4_00).await?;

        ctx.cart_items.add_item(theirs.id, item.id, 1).await?;

        let line = CartItemId::from_i64(1);
        let result = ctx.cart_items.delete_item(mine.id, line).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotOwned)),
            "expected NotOwned, got {result:?}"
        );
        assert_eq!(ctx.cart_items.list_cart_items(theirs.id).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn delete_twice_returns_not_found() -> TestResult {
        let ctx = TestContext::new();
        let cart = open_cart(&ctx).await?;
        let item = create_item(&ctx, "Ladle", 4_00).await?;

        ctx.cart_items.add_item(cart.id, item.id, 1).await?;

        let line = CartItemId::from_i64(1);

        ctx.cart_items.delete_item(cart.id, line).await?;

        let result = ctx.cart_items.delete_item(cart.id, line).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn mutating_unknown_cart_returns_not_found() {
        let ctx = TestContext::new();

        let add = ctx
            .cart_items
            .add_item(CartId::from_i64(9), ItemId::from_i64(1), 1)
            .await;
        let delete = ctx
            .cart_items
            .delete_item(CartId::from_i64(9), CartItemId::from_i64(1))
            .await;

        assert!(
            matches!(add, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {add:?}"
        );
        assert!(
            matches!(delete, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {delete:?}"
        );
    }

    #[tokio::test]
    async fn add_unknown_item_is_invalid_input() -> TestResult {
        let ctx = TestContext::new();
        let cart = open_cart(&ctx).await?;

        let result = ctx
            .cart_items
            .add_item(cart.id, ItemId::from_i64(42), 1)
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::InvalidInput(_))),
            "expected InvalidInput, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn add_wraps_storage_failure() {
        let mut carts = MockCartsRepository::new();
        let mut cart_items = MockCartItemsRepository::new();

        carts
            .expect_get_cart()
            .once()
            .return_once(|_| Ok(cart_record(1, CartStatus::Open)));

        cart_items
            .expect_add_cart_item()
            .once()
            .withf(|new| new.quantity == 2 && new.item_id == ItemId::from_i64(5))
            .return_once(|_| Err(StorageError::Sql(sqlx::Error::PoolTimedOut)));

        let service = DefaultCartItemsService::new(
            Arc::new(carts),
            Arc::new(cart_items),
            Arc::new(MockItemsRepository::new()),
        );

        let result = service
            .add_item(CartId::from_i64(1), ItemId::from_i64(5), 2)
            .await;

        assert!(
            matches!(
                result,
                Err(CartsServiceError::Storage {
                    context: "error adding item to cart",
                    ..
                })
            ),
            "expected Storage error, got {result:?}"
        );
    }
}
