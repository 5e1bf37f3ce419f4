//! Demo coupon data

use jiff::{SignedDuration, Timestamp};
use rust_decimal_macros::dec;
use tracing::info;

use crate::domain::coupons::{
    CouponsRepository, CouponsServiceError,
    models::{Coupon, DiscountType, NewCoupon},
};

const HOURS_PER_DAY: i64 = 24;

fn days(count: i64) -> SignedDuration {
    SignedDuration::from_hours(count * HOURS_PER_DAY)
}

/// The coupons inserted into an empty database, with expirations relative
/// to `now`.
#[must_use]
pub fn demo_coupons(now: Timestamp) -> Vec<NewCoupon> {
    vec![
        NewCoupon {
            code: "WELCOME10".to_string(),
            discount_type: DiscountType::Percentage,
            discount_value: dec!(10),
            minimum_order_value: Some(dec!(50)),
            expires_at: None,
            is_unique_per_customer: true,
        },
        NewCoupon {
            code: "SAVE20".to_string(),
            discount_type: DiscountType::Fixed,
            discount_value: dec!(20),
            minimum_order_value: Some(dec!(100)),
            expires_at: Some(now + days(30)),
            is_unique_per_customer: false,
        },
        NewCoupon {
            code: "FLASH15".to_string(),
            discount_type: DiscountType::Percentage,
            discount_value: dec!(15),
            minimum_order_value: None,
            expires_at: Some(now + days(7)),
            is_unique_per_customer: false,
        },
    ]
}

/// Insert the demo coupons unless any coupon already exists.
///
/// Returns how many coupons were inserted.
///
/// # Errors
///
/// Returns an error when listing or inserting coupons fails.
pub async fn seed_coupons(
    repository: &dyn CouponsRepository,
    now: Timestamp,
) -> Result<usize, CouponsServiceError> {
    if !repository.list().await?.is_empty() {
        info!("coupons already present, skipping seed");

        return Ok(0);
    }

    let coupons = demo_coupons(now);
    let count = coupons.len();

    for coupon in coupons {
        repository.create(Coupon::new(coupon)?).await?;
    }

    info!(count, "seeded demo coupons");

    Ok(count)
}
