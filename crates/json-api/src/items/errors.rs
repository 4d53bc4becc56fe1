//! Errors

use salvo::http::StatusError;
use tracing::error;

use cartline_app::domain::items::ItemsServiceError;

pub(crate) fn into_status_error(error: ItemsServiceError) -> StatusError {
    match error {
        ItemsServiceError::InvalidInput(message) => StatusError::bad_request().brief(message),
        ItemsServiceError::Storage { context, source } => {
            error!("{context}: {source}");

            StatusError::internal_server_error()
        }
    }
}
