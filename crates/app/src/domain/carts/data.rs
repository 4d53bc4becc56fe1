//! Cart Data

use jiff::Timestamp;

use crate::domain::{
    carts::{models::CartStatus, records::CartId},
    items::records::ItemId,
};

/// New Cart Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCart {
    pub cookie: String,
    pub status: CartStatus,
    pub created_at: Timestamp,
}

/// Quantity to merge into the cart's active line for `item_id`.
///
/// `added_at` becomes `created_at` of a new row, or `updated_at` of a merged one.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub cart_id: CartId,
    pub item_id: ItemId,
    pub quantity: i64,
    pub added_at: Timestamp,
}
