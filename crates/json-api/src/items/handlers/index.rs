//! Item Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use cartline_app::domain::items::models::Item;

use crate::{extensions::*, items::errors::into_status_error, state::State};

/// Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ItemResponse {
    /// The identifier of the item
    pub id: i64,

    /// The display name of the item
    pub name: String,

    /// The unit price in minor currency units
    pub price: u64,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id.into_i64(),
            name: item.name,
            price: item.price,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ItemsResponse {
    /// The catalog, ordered by id
    pub items: Vec<ItemResponse>,
}

/// Item Index Handler
///
/// Returns the item catalog.
#[endpoint(tags("items"), summary = "List Items")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ItemsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let items = state
        .app
        .items
        .list_items()
        .await
        .map_err(into_status_error)?;

    Ok(Json(ItemsResponse {
        items: items.into_iter().map(Into::into).collect(),
    }))
}
