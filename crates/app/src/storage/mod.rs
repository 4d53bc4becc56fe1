//! Storage gateway shared types and the in-memory backend.

mod errors;
mod memory;

pub use errors::StorageError;
pub use memory::MemoryStorage;
