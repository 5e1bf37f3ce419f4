//! Deactivate Coupon Handler

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{coupons::errors::into_status_error, extensions::*};

/// Deactivate Coupon Handler
///
/// Deactivating an already inactive coupon succeeds.
#[endpoint(
    tags("coupons"),
    summary = "Deactivate Coupon",
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Coupon deactivated"),
        (status_code = StatusCode::NOT_FOUND, description = "Coupon not found"),
        (status_code = StatusCode::CONFLICT, description = "Coupon was modified concurrently"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "coupons.deactivate",
    skip(code, depot),
    fields(coupon_code = %code.as_str()),
    err
)]
pub(crate) async fn handler(
    code: PathParam<String>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.state_or_500()?;

    state
        .coupons
        .deactivate_coupon(&code.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
