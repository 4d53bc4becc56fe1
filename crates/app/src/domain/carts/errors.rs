//! Carts service errors.

use thiserror::Error;

use crate::storage::StorageError;

/// Failures of the cart and cart item services.
#[derive(Debug, Error)]
pub enum CartsServiceError {
    /// Rejected before touching storage, or an unknown item on add.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    /// The cart or line item does not exist.
    #[error("not found")]
    NotFound,

    /// Mutation of a closed cart.
    #[error("the cart has been closed")]
    CartClosed,

    /// The line item belongs to a different cart.
    #[error("cart item does not belong to the cart")]
    NotOwned,

    /// Unexpected storage failure.
    #[error("{context}")]
    Storage {
        /// What the service was doing when storage failed.
        context: &'static str,

        #[source]
        source: StorageError,
    },
}

impl CartsServiceError {
    /// Wrap a storage failure with an operation-specific message.
    ///
    /// `StorageError::NotFound` becomes [`CartsServiceError::NotFound`]; read paths that treat a
    /// miss as an empty result must match it before calling this.
    pub(crate) fn storage(context: &'static str) -> impl FnOnce(StorageError) -> Self {
        move |source| match source {
            StorageError::NotFound => Self::NotFound,
            source => Self::Storage { context, source },
        }
    }
}
