//! Item Models

use serde::{Deserialize, Serialize};

use crate::domain::items::records::ItemRecord;

pub use crate::domain::items::records::ItemId;

/// Catalog item as seen by the cart domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Price in minor currency units.
    pub price: u64,
}

impl From<ItemRecord> for Item {
    fn from(record: ItemRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            price: record.price,
        }
    }
}
