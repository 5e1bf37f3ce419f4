//! Apply Coupon Handler

use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use coupons_app::domain::coupons::{
    CouponError,
    application::ApplyCoupon,
    models::{MAX_CODE_LENGTH, MAX_CUSTOMER_ID_LENGTH},
};

use crate::{
    coupons::{errors::into_status_error, models::ApplyCouponResponse},
    extensions::*,
};

/// Apply Coupon Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ApplyCouponRequest {
    /// Coupon code, matched ignoring case and surrounding whitespace
    pub coupon_code: String,

    /// Customer redeeming the coupon, trimmed then matched exactly
    pub customer_id: String,

    #[salvo(schema(value_type = String))]
    pub order_value: Decimal,
}

impl TryFrom<ApplyCouponRequest> for ApplyCoupon {
    type Error = CouponError;

    fn try_from(request: ApplyCouponRequest) -> Result<Self, Self::Error> {
        if request.coupon_code.trim().is_empty() {
            return Err(CouponError::EmptyCode);
        }

        if request.coupon_code.chars().count() > MAX_CODE_LENGTH {
            return Err(CouponError::CodeTooLong {
                max: MAX_CODE_LENGTH,
            });
        }

        let customer_id = request.customer_id.trim();

        if customer_id.is_empty() {
            return Err(CouponError::EmptyCustomerId);
        }

        if customer_id.chars().count() > MAX_CUSTOMER_ID_LENGTH {
            return Err(CouponError::CustomerIdTooLong {
                max: MAX_CUSTOMER_ID_LENGTH,
            });
        }

        if request.order_value <= Decimal::ZERO {
            return Err(CouponError::NonPositiveOrderValue);
        }

        Ok(Self {
            coupon_code: request.coupon_code,
            customer_id: customer_id.to_string(),
            order_value: request.order_value,
        })
    }
}

/// Apply Coupon Handler
///
/// Checks the coupon against every rule and, when all pass, records the
/// redemption. Rejections and unknown codes are reported in the body with a
/// 200 status.
#[endpoint(
    tags("coupons"),
    summary = "Apply Coupon",
    responses(
        (status_code = StatusCode::OK, description = "Coupon evaluated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::CONFLICT, description = "Coupon was modified concurrently"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "coupons.apply",
    skip(json, depot),
    fields(coupon_code = %json.coupon_code.trim()),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<ApplyCouponRequest>,
    depot: &mut Depot,
) -> Result<Json<ApplyCouponResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let request = ApplyCoupon::try_from(json.into_inner()).or_400()?;

    let application = state
        .coupons
        .apply_coupon(request)
        .await
        .map_err(into_status_error)?;

    Ok(Json(application.into()))
}
