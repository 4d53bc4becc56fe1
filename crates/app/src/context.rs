//! App Context

use std::{fmt, sync::Arc};

use sqlx::migrate::MigrateError;
use thiserror::Error;
use tracing::info;

use crate::{
    database,
    domain::{
        carts::{
            CartItemsService, CartsService, DefaultCartItemsService, DefaultCartsService,
            repositories::{
                CartItemsRepository, CartsRepository, PgCartItemsRepository, PgCartsRepository,
            },
        },
        items::{DefaultItemsService, ItemsCache, ItemsRepository, ItemsService, PgItemsRepository},
    },
    storage::MemoryStorage,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to run database migrations")]
    Migrations(#[source] MigrateError),

    #[error("a database url is required for the postgres backend")]
    MissingDatabaseUrl,
}

#[derive(Clone)]
pub struct AppContext {
    pub carts: Arc<dyn CartsService>,
    pub cart_items: Arc<dyn CartItemsService>,
    pub items: Arc<dyn ItemsService>,
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Wire the services over a set of repositories.
    #[must_use]
    pub fn from_repositories(
        carts: Arc<dyn CartsRepository>,
        cart_items: Arc<dyn CartItemsRepository>,
        items: Arc<dyn ItemsRepository>,
        cache: ItemsCache,
    ) -> Self {
        Self {
            carts: Arc::new(DefaultCartsService::new(carts.clone())),
            cart_items: Arc::new(DefaultCartItemsService::new(
                carts,
                cart_items,
                items.clone(),
            )),
            items: Arc::new(DefaultItemsService::new(items, cache)),
        }
    }

    /// Build application context over process-local storage.
    #[must_use]
    pub fn in_memory(cache: ItemsCache) -> Self {
        let storage = Arc::new(MemoryStorage::new());

        Self::from_repositories(storage.clone(), storage.clone(), storage, cache)
    }

    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or migrating fails.
    pub async fn from_database_url(
        url: &str,
        cache: ItemsCache,
        run_migrations: bool,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        if run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrations)?;

            info!("database migrations applied");
        }

        Ok(Self::from_repositories(
            Arc::new(PgCartsRepository::new(pool.clone())),
            Arc::new(PgCartItemsRepository::new(pool.clone())),
            Arc::new(PgItemsRepository::new(pool)),
            cache,
        ))
    }
}
