//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

const SESSION_DEPOT_KEY: &str = "session_cookie";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_session(&mut self, session: String);

    fn session_or_500(&self) -> Result<&str, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_session(&mut self, session: String) {
        self.insert(SESSION_DEPOT_KEY, session);
    }

    fn session_or_500(&self) -> Result<&str, StatusError> {
        self.get::<String>(SESSION_DEPOT_KEY)
            .map(String::as_str)
            .map_err(|_ignored| StatusError::internal_server_error())
    }
}
