//! Items catalog

pub mod cache;
pub mod data;
pub mod errors;
pub mod models;
pub mod records;
pub mod repository;
pub mod service;

pub use cache::ItemsCache;
pub use errors::ItemsServiceError;
pub use repository::{ItemsRepository, MockItemsRepository, PgItemsRepository};
pub use service::*;
