//! Cart endpoints, scoped to the session cookie's cart

pub(crate) mod errors;
mod handlers;
pub(crate) mod items;

pub(crate) use handlers::*;
