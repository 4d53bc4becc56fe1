//! Cart Repositories

mod carts;
mod items;

pub use carts::{CartsRepository, MockCartsRepository, PgCartsRepository};
pub use items::{CartItemsRepository, MockCartItemsRepository, PgCartItemsRepository};
