//! Carts

pub mod data;
pub mod errors;
pub mod items;
pub mod models;
pub mod records;
pub mod repositories;
pub mod service;

pub use errors::CartsServiceError;
pub use items::{CartItemsService, DefaultCartItemsService, MockCartItemsService};
pub use service::*;
