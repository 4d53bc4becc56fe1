//! Items Data

/// New Item Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub price: u64,
}
