//! App Router

use salvo::Router;

use crate::{carts, healthcheck, items, session};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("items").get(items::index::handler))
        .push(
            Router::with_path("cart")
                .hoop(session::handler)
                .get(carts::get::handler)
                .push(
                    Router::with_path("items")
                        .post(carts::items::create::handler)
                        .push(
                            Router::with_path("{cart_item}").delete(carts::items::delete::handler),
                        ),
                ),
        )
}
