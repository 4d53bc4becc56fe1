//! Errors

use salvo::http::StatusError;
use tracing::error;

use cartline_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::InvalidInput(message) => StatusError::bad_request().brief(message),
        CartsServiceError::NotFound => StatusError::not_found().brief("Cart item not found"),
        // Another shopper's line item is indistinguishable from a missing one.
        CartsServiceError::NotOwned => StatusError::not_found().brief("Cart item not found"),
        CartsServiceError::CartClosed => StatusError::conflict().brief("Cart is closed"),
        CartsServiceError::Storage { context, source } => {
            error!("{context}: {source}");

            StatusError::internal_server_error()
        }
    }
}
