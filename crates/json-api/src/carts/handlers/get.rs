//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use cartline_app::domain::carts::models::{Cart, CartItem};

use crate::{
    carts::errors::into_status_error, extensions::*, items::index::ItemResponse, state::State,
};

/// Cart Summary
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartBody {
    /// The identifier of the cart
    pub id: i64,

    /// The cart status (open, closed)
    pub status: String,
}

impl From<Cart> for CartBody {
    fn from(cart: Cart) -> Self {
        Self {
            id: cart.id.into_i64(),
            status: cart.status.to_string(),
        }
    }
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    /// The identifier of the line item
    pub id: i64,

    /// The catalog item, absent when it no longer exists
    pub item: Option<ItemResponse>,

    /// Quantity of the item in the cart
    pub quantity: i64,
}

impl From<CartItem> for CartItemResponse {
    fn from(cart_item: CartItem) -> Self {
        Self {
            id: cart_item.id.into_i64(),
            item: cart_item.item.map(Into::into),
            quantity: cart_item.quantity,
        }
    }
}

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The session's open cart, if it has one
    pub cart: Option<CartBody>,

    /// Active line items of the cart
    pub items: Vec<CartItemResponse>,
}

/// Get Cart Handler
///
/// Returns the session's open cart with its line items. Never creates a cart.
#[endpoint(tags("carts"), summary = "Get Cart")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_or_500()?;

    let Some(cart) = state
        .app
        .carts
        .retrieve_cart_optional(session)
        .await
        .map_err(into_status_error)?
    else {
        return Ok(Json(CartResponse {
            cart: None,
            items: Vec::new(),
        }));
    };

    let items = state
        .app
        .cart_items
        .list_cart_items(cart.id)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartResponse {
        cart: Some(cart.into()),
        items: items.into_iter().map(Into::into).collect(),
    }))
}
