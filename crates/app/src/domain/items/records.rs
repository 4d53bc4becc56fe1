//! Item Records

use jiff::Timestamp;

use crate::ids::TypedId;

/// Item ID
pub type ItemId = TypedId<ItemRecord>;

/// Item Record
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRecord {
    pub id: ItemId,
    pub name: String,
    pub price: u64,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}
