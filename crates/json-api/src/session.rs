//! Session cookie middleware.
//!
//! Resolves the shopper's cart cookie for the rest of the request, issuing a fresh one when the
//! client did not send it.

use std::sync::Arc;

use salvo::{
    http::cookie::{Cookie, SameSite},
    prelude::*,
};
use tracing::debug;
use uuid::Uuid;

use crate::{extensions::*, state::State};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let cookie_name = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => state.session_cookie.clone(),
        Err(error) => {
            res.render(error);

            return;
        }
    };

    let existing = req
        .cookie(&cookie_name)
        .map(|cookie| cookie.value().to_owned())
        .filter(|value| !value.trim().is_empty());

    let session = match existing {
        Some(session) => session,
        None => {
            let session = Uuid::now_v7().to_string();

            res.add_cookie(
                Cookie::build((cookie_name, session.clone()))
                    .path("/")
                    .http_only(true)
                    .same_site(SameSite::Lax)
                    .build(),
            );

            debug!("issued new session cookie");

            session
        }
    };

    depot.insert_session(session);

    ctrl.call_next(req, depot, res).await;
}
