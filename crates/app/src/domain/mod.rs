//! Cartline Domain Concerns

pub mod carts;
pub mod items;
