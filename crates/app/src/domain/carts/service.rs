//! Carts service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{debug, info};

use crate::{
    domain::carts::{
        data::NewCart,
        errors::CartsServiceError,
        models::{Cart, CartStatus},
        repositories::CartsRepository,
    },
    storage::StorageError,
};

#[derive(Clone)]
pub struct DefaultCartsService {
    repository: Arc<dyn CartsRepository>,
}

impl fmt::Debug for DefaultCartsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultCartsService").finish_non_exhaustive()
    }
}

impl DefaultCartsService {
    #[must_use]
    pub fn new(repository: Arc<dyn CartsRepository>) -> Self {
        Self { repository }
    }

    async fn find_open_cart(&self, cookie: &str) -> Result<Option<Cart>, CartsServiceError> {
        match self
            .repository
            .find_cart_by_cookie(cookie, CartStatus::Open)
            .await
        {
            Ok(record) => Ok(Some(record.into())),
            Err(StorageError::NotFound) => Ok(None),
            Err(source) => Err(CartsServiceError::Storage {
                context: "error retrieving cart",
                source,
            }),
        }
    }
}

fn validate_cookie(cookie: &str) -> Result<(), CartsServiceError> {
    if cookie.trim().is_empty() {
        return Err(CartsServiceError::InvalidInput(
            "the cookie should be provided",
        ));
    }

    Ok(())
}

#[async_trait]
impl CartsService for DefaultCartsService {
    async fn retrieve_cart_optional(
        &self,
        cookie: &str,
    ) -> Result<Option<Cart>, CartsServiceError> {
        validate_cookie(cookie)?;

        self.find_open_cart(cookie).await
    }

    async fn retrieve_cart_required(&self, cookie: &str) -> Result<Cart, CartsServiceError> {
        validate_cookie(cookie)?;

        if let Some(cart) = self.find_open_cart(cookie).await? {
            return Ok(cart);
        }

        let created = self
            .repository
            .create_cart(NewCart {
                cookie: cookie.to_string(),
                status: CartStatus::Open,
                created_at: Timestamp::now(),
            })
            .await;

        match created {
            Ok(record) => {
                info!(cart = %record.id, "created cart");

                Ok(record.into())
            }
            // A concurrent request created the open cart between our lookup and insert.
            Err(StorageError::AlreadyExists) => {
                debug!("open cart created concurrently, retrying lookup");

                self.find_open_cart(cookie)
                    .await?
                    .ok_or(CartsServiceError::Storage {
                        context: "error creating cart",
                        source: StorageError::AlreadyExists,
                    })
            }
            Err(source) => Err(CartsServiceError::storage("error creating cart")(source)),
        }
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the open cart for a cookie, if there is one.
    async fn retrieve_cart_optional(
        &self,
        cookie: &str,
    ) -> Result<Option<Cart>, CartsServiceError>;

    /// Retrieve the open cart for a cookie, creating it when absent.
    async fn retrieve_cart_required(&self, cookie: &str) -> Result<Cart, CartsServiceError>;
}
