//! Create Coupon Handler

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use coupons_app::domain::coupons::models::NewCoupon;

use crate::{
    coupons::{
        errors::into_status_error,
        models::{CouponResponse, DiscountTypeBody},
    },
    extensions::*,
};

/// Create Coupon Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCouponRequest {
    /// Coupon code; stored trimmed and uppercased
    pub code: String,

    pub discount_type: DiscountTypeBody,

    /// Amount off, or percentage points for percentage coupons
    #[salvo(schema(value_type = String))]
    pub discount_value: Decimal,

    #[salvo(schema(value_type = Option<String>))]
    #[serde(default)]
    pub minimum_order_value: Option<Decimal>,

    /// RFC 3339 instant after which the coupon is rejected
    #[serde(default)]
    pub expiration_date: Option<String>,

    #[serde(default)]
    pub is_unique_per_customer: bool,
}

impl CreateCouponRequest {
    fn into_new_coupon(self) -> Result<NewCoupon, StatusError> {
        let expires_at = self
            .expiration_date
            .map(|value| value.parse::<Timestamp>())
            .transpose()
            .or_400()?;

        Ok(NewCoupon {
            code: self.code,
            discount_type: self.discount_type.into(),
            discount_value: self.discount_value,
            minimum_order_value: self.minimum_order_value,
            expires_at,
            is_unique_per_customer: self.is_unique_per_customer,
        })
    }
}

/// Create Coupon Handler
#[endpoint(
    tags("coupons"),
    summary = "Create Coupon",
    responses(
        (status_code = StatusCode::CREATED, description = "Coupon created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::CONFLICT, description = "Coupon code already exists"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCouponRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CouponResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let coupon = state
        .coupons
        .create_coupon(json.into_inner().into_new_coupon()?)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/coupons/{}", coupon.code()), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(CouponResponse::from(&coupon)))
}

#[cfg(test)]
mod tests {
    use coupons_app::domain::coupons::{
        CouponError, CouponsServiceError, MockCouponsService,
        models::{Coupon, DiscountType},
    };
    use rust_decimal_macros::dec;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{coupons_service, welcome10};

    use super::*;

    #[tokio::test]
    async fn test_create_coupon_returns_201_with_location() -> TestResult {
        let coupon = Coupon::new(welcome10())?;

        let mut service = MockCouponsService::new();

        service
            .expect_create_coupon()
            .once()
            .withf(|new| {
                *new == NewCoupon {
                    code: "welcome10".to_string(),
                    ..welcome10()
                }
            })
            .return_once(move |_| Ok(coupon));

        let mut res = TestClient::post("http://example.com/coupons")
            .json(&json!({
                "code": "welcome10",
                "discount_type": "percentage",
                "discount_value": "10",
                "minimum_order_value": "50",
                "is_unique_per_customer": true
            }))
            .send(&coupons_service(service))
            .await;

        let body: CouponResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some("/coupons/WELCOME10"));
        assert_eq!(body.code, "WELCOME10");
        assert_eq!(body.minimum_order_value, Some(dec!(50)));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_parses_expiration_date() -> TestResult {
        let expires_at: Timestamp = "2030-01-31T23:59:59Z".parse()?;

        let coupon = Coupon::new(NewCoupon {
            code: "FLASH15".to_string(),
            discount_type: DiscountType::Percentage,
            discount_value: dec!(15),
            minimum_order_value: None,
            expires_at: Some(expires_at),
            is_unique_per_customer: false,
        })?;

        let mut service = MockCouponsService::new();

        service
            .expect_create_coupon()
            .once()
            .withf(move |new| new.expires_at == Some(expires_at) && !new.is_unique_per_customer)
            .return_once(move |_| Ok(coupon));

        let res = TestClient::post("http://example.com/coupons")
            .json(&json!({
                "code": "FLASH15",
                "discount_type": "percentage",
                "discount_value": 15,
                "expiration_date": "2030-01-31T23:59:59Z"
            }))
            .send(&coupons_service(service))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_rejects_unparseable_expiration_date() -> TestResult {
        let mut service = MockCouponsService::new();

        service.expect_create_coupon().never();

        let res = TestClient::post("http://example.com/coupons")
            .json(&json!({
                "code": "FLASH15",
                "discount_type": "percentage",
                "discount_value": "15",
                "expiration_date": "next tuesday"
            }))
            .send(&coupons_service(service))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_invalid_coupon_returns_400() -> TestResult {
        let mut service = MockCouponsService::new();

        service
            .expect_create_coupon()
            .once()
            .return_once(|_| Err(CouponsServiceError::Invalid(CouponError::PercentageAboveLimit)));

        let res = TestClient::post("http://example.com/coupons")
            .json(&json!({
                "code": "HUGE",
                "discount_type": "percentage",
                "discount_value": "150"
            }))
            .send(&coupons_service(service))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_duplicate_returns_409() -> TestResult {
        let mut service = MockCouponsService::new();

        service
            .expect_create_coupon()
            .once()
            .return_once(|_| Err(CouponsServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/coupons")
            .json(&json!({
                "code": "WELCOME10",
                "discount_type": "fixed",
                "discount_value": "5"
            }))
            .send(&coupons_service(service))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_unknown_discount_type_returns_400() -> TestResult {
        let mut service = MockCouponsService::new();

        service.expect_create_coupon().never();

        let res = TestClient::post("http://example.com/coupons")
            .json(&json!({
                "code": "BOGUS",
                "discount_type": "bogus",
                "discount_value": "5"
            }))
            .send(&coupons_service(service))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
