//! Test helpers.

use std::sync::Arc;

use rust_decimal_macros::dec;
use salvo::{affix_state::inject, prelude::*};

use coupons_app::domain::coupons::{
    MockCouponsService,
    models::{DiscountType, NewCoupon},
};

use crate::{coupons, state::State};

/// Serve the full coupons router backed by `service`.
pub(crate) fn coupons_service(service: MockCouponsService) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(Arc::new(State::new(Arc::new(service)))))
            .push(coupons::router()),
    )
}

pub(crate) fn welcome10() -> NewCoupon {
    NewCoupon {
        code: "WELCOME10".to_string(),
        discount_type: DiscountType::Percentage,
        discount_value: dec!(10),
        minimum_order_value: Some(dec!(50)),
        expires_at: None,
        is_unique_per_customer: true,
    }
}
