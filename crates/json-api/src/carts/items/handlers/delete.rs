//! Delete Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use cartline_app::domain::carts::models::CartItemId;

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Delete Cart Item Handler
///
/// Removes a line item from the session's cart.
#[endpoint(
    tags("carts"),
    summary = "Delete Cart Item",
    responses(
        (status_code = StatusCode::OK, description = "Cart item deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart item not found"),
        (status_code = StatusCode::CONFLICT, description = "Cart is closed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    )
)]
pub(crate) async fn handler(
    cart_item: PathParam<i64>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_or_500()?;

    let Some(cart) = state
        .app
        .carts
        .retrieve_cart_optional(session)
        .await
        .map_err(into_status_error)?
    else {
        return Err(StatusError::not_found().brief("Cart not found"));
    };

    state
        .app
        .cart_items
        .delete_item(cart.id, CartItemId::from_i64(cart_item.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}
