//! Item Handlers

pub(crate) mod index;
