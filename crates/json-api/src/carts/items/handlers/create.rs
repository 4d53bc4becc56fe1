//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use cartline_app::domain::items::models::ItemId;

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCartItemRequest {
    /// The catalog item to add
    pub item_id: i64,

    /// Quantity to add, merged into an existing line for the same item
    pub quantity: i64,
}

/// Add Cart Item Handler
///
/// Adds an item to the session's cart, creating the cart on first use.
#[endpoint(
    tags("carts"),
    summary = "Add Item to Cart",
    responses(
        (status_code = StatusCode::OK, description = "Item added"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::CONFLICT, description = "Cart is closed"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddCartItemRequest>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_or_500()?;
    let request = json.into_inner();

    let cart = state
        .app
        .carts
        .retrieve_cart_required(session)
        .await
        .map_err(into_status_error)?;

    state
        .app
        .cart_items
        .add_item(cart.id, ItemId::from_i64(request.item_id), request.quantity)
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}
