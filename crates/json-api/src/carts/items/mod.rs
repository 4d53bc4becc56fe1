//! Cart line item endpoints

mod handlers;

pub(crate) use handlers::*;
