//! Cart Records

use jiff::Timestamp;

use crate::{
    domain::{carts::models::CartStatus, items::records::ItemId},
    ids::TypedId,
};

/// Cart ID
pub type CartId = TypedId<CartRecord>;

/// Cart Record
#[derive(Debug, Clone, PartialEq)]
pub struct CartRecord {
    pub id: CartId,
    pub cookie: String,
    pub status: CartStatus,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

/// Cart Item ID
pub type CartItemId = TypedId<CartItemRecord>;

/// CartItem Record
#[derive(Debug, Clone, PartialEq)]
pub struct CartItemRecord {
    pub id: CartItemId,
    pub cart_id: CartId,
    pub item_id: ItemId,
    pub quantity: i64,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
    pub deleted_at: Option<Timestamp>,
}

impl CartItemRecord {
    /// Not soft-deleted and holding a positive quantity.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none() && self.quantity > 0
    }
}
