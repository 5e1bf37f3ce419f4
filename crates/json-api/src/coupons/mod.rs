//! Coupons

mod errors;
mod handlers;
mod models;

use salvo::Router;

/// Routes under `/coupons`. `apply` is registered ahead of `{code}` so it is
/// never captured as a coupon code.
pub(crate) fn router() -> Router {
    Router::with_path("coupons")
        .get(handlers::index::handler)
        .post(handlers::create::handler)
        .push(Router::with_path("apply").post(handlers::apply::handler))
        .push(
            Router::with_path("{code}")
                .get(handlers::get::handler)
                .push(Router::with_path("deactivate").patch(handlers::deactivate::handler)),
        )
}
