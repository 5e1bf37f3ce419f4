//! Coupon Index Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    coupons::{errors::into_status_error, models::CouponResponse},
    extensions::*,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CouponsResponse {
    /// Coupons, newest first
    pub coupons: Vec<CouponResponse>,
}

/// Coupon Index Handler
///
/// Returns every coupon, newest first.
#[endpoint(
    tags("coupons"),
    summary = "List Coupons",
    responses(
        (status_code = StatusCode::OK, description = "Coupons listed"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CouponsResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let coupons = state
        .coupons
        .list_coupons()
        .await
        .map_err(into_status_error)?;

    Ok(Json(CouponsResponse {
        coupons: coupons.iter().map(CouponResponse::from).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use coupons_app::domain::coupons::{
        CouponsServiceError, MockCouponsService,
        models::{Coupon, DiscountType, NewCoupon},
    };
    use rust_decimal_macros::dec;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{coupons_service, welcome10};

    use super::*;

    #[tokio::test]
    async fn test_index_returns_coupons_in_service_order() -> TestResult {
        let newest = Coupon::new(NewCoupon {
            code: "save20".to_string(),
            discount_type: DiscountType::Fixed,
            discount_value: dec!(20),
            minimum_order_value: None,
            expires_at: None,
            is_unique_per_customer: false,
        })?;
        let oldest = Coupon::new(welcome10())?;

        let mut service = MockCouponsService::new();

        service
            .expect_list_coupons()
            .once()
            .return_once(move || Ok(vec![newest, oldest]));

        let response: CouponsResponse = TestClient::get("http://example.com/coupons")
            .send(&coupons_service(service))
            .await
            .take_json()
            .await?;

        let codes: Vec<&str> = response.coupons.iter().map(|c| c.code.as_str()).collect();

        assert_eq!(codes, vec!["SAVE20", "WELCOME10"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_returns_empty_list() -> TestResult {
        let mut service = MockCouponsService::new();

        service
            .expect_list_coupons()
            .once()
            .return_once(|| Ok(vec![]));

        let response: CouponsResponse = TestClient::get("http://example.com/coupons")
            .send(&coupons_service(service))
            .await
            .take_json()
            .await?;

        assert!(response.coupons.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_index_storage_failure_returns_500() -> TestResult {
        let mut service = MockCouponsService::new();

        service
            .expect_list_coupons()
            .once()
            .return_once(|| Err(CouponsServiceError::Storage(sqlx::Error::PoolTimedOut)));

        let res = TestClient::get("http://example.com/coupons")
            .send(&coupons_service(service))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
