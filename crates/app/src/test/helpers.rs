//! Test Helpers

use crate::{
    domain::items::{ItemsService, ItemsServiceError, data::NewItem, models::Item},
    test::TestContext,
};

pub(crate) async fn create_item(
    ctx: &TestContext,
    name: &str,
    price: u64,
) -> Result<Item, ItemsServiceError> {
    ctx.items
        .create_item(NewItem {
            name: name.to_string(),
            price,
        })
        .await
}
