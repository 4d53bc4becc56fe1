//! Test helpers.

use std::sync::Arc;

use cartline_app::{
    context::AppContext,
    domain::{
        carts::{MockCartItemsService, MockCartsService},
        items::MockItemsService,
    },
};
use salvo::{affix_state::inject, prelude::*};

use crate::{extensions::*, state::State};

pub(crate) const TEST_SESSION: &str = "test-session";

#[salvo::handler]
pub(crate) async fn inject_session(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_session(TEST_SESSION.to_string());
    ctrl.call_next(req, depot, res).await;
}

pub(crate) fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_retrieve_cart_optional().never();
    carts.expect_retrieve_cart_required().never();

    carts
}

pub(crate) fn strict_cart_items_mock() -> MockCartItemsService {
    let mut cart_items = MockCartItemsService::new();

    cart_items.expect_list_cart_items().never();
    cart_items.expect_add_item().never();
    cart_items.expect_delete_item().never();

    cart_items
}

pub(crate) fn strict_items_mock() -> MockItemsService {
    let mut items = MockItemsService::new();

    items.expect_list_items().never();
    items.expect_create_item().never();

    items
}

pub(crate) fn state(
    carts: MockCartsService,
    cart_items: MockCartItemsService,
    items: MockItemsService,
) -> Arc<State> {
    State::from_app_context(
        AppContext {
            carts: Arc::new(carts),
            cart_items: Arc::new(cart_items),
            items: Arc::new(items),
        },
        "cart_session".to_string(),
    )
}

pub(crate) fn state_with_mocks() -> Arc<State> {
    state(strict_carts_mock(), strict_cart_items_mock(), strict_items_mock())
}

pub(crate) fn cart_service(
    carts: MockCartsService,
    cart_items: MockCartItemsService,
    route: Router,
) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state(carts, cart_items, strict_items_mock())))
            .hoop(inject_session)
            .push(route),
    )
}

pub(crate) fn items_service(items: MockItemsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state(strict_carts_mock(), strict_cart_items_mock(), items)))
            .hoop(inject_session)
            .push(route),
    )
}
