//! Cart Models

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{
    carts::records::{CartItemRecord, CartRecord},
    items::models::Item,
};

pub use crate::domain::carts::records::{CartId, CartItemId};

/// Cart lifecycle state. `Closed` carts are read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CartStatus {
    /// Accepts line item changes.
    Open,
    /// Checked out or abandoned.
    Closed,
}

impl CartStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for CartStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown cart status {0:?}")]
pub struct ParseCartStatusError(String);

impl FromStr for CartStatus {
    type Err = ParseCartStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            other => Err(ParseCartStatusError(other.to_string())),
        }
    }
}

/// Cart Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    pub id: CartId,
    /// Session cookie value the cart was opened under.
    pub cookie: String,
    pub status: CartStatus,
}

impl From<CartRecord> for Cart {
    fn from(record: CartRecord) -> Self {
        Self {
            id: record.id,
            cookie: record.cookie,
            status: record.status,
        }
    }
}

/// CartItem Model
///
/// `item` is `None` when the row references an item missing from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub id: CartItemId,
    /// Owning cart.
    pub cart_id: CartId,
    /// Catalog entry for the line, joined at read time.
    pub item: Option<Item>,
    /// Merged quantity of every add since the line was created.
    pub quantity: i64,
    /// Whether the line has been soft-deleted.
    pub is_deleted: bool,
}

impl CartItem {
    pub(crate) fn from_record(record: CartItemRecord, item: Option<Item>) -> Self {
        Self {
            id: record.id,
            cart_id: record.cart_id,
            item,
            quantity: record.quantity,
            is_deleted: record.deleted_at.is_some(),
        }
    }
}
