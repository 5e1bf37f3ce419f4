//! Minimum Order Value Rule

use rusty_money::{
    Money,
    iso::{self, Currency},
};

use crate::domain::coupons::{
    models::Coupon,
    rules::{CouponRule, RuleContext, RuleOutcome},
};

/// Rejects orders below the coupon's minimum order value, when it has one.
#[derive(Debug, Clone, Copy)]
pub struct MinimumValueRule {
    currency: &'static Currency,
}

impl MinimumValueRule {
    /// Format rejection amounts in the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self { currency }
    }
}

impl Default for MinimumValueRule {
    fn default() -> Self {
        Self::new(iso::BRL)
    }
}

impl CouponRule for MinimumValueRule {
    fn name(&self) -> &'static str {
        "minimum_value"
    }

    fn evaluate(&self, coupon: &Coupon, context: &RuleContext<'_>) -> RuleOutcome {
        match coupon.minimum_order_value() {
            Some(minimum) if context.order_value < minimum => RuleOutcome::Reject(format!(
                "Minimum order value is {}",
                Money::from_decimal(minimum, self.currency)
            )),
            _ => RuleOutcome::Pass,
        }
    }
}
