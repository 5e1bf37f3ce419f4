//! Expiration Date Rule

use crate::domain::coupons::{
    models::Coupon,
    rules::{CouponRule, RuleContext, RuleOutcome},
};

/// Rejects coupons whose expiration instant has passed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpirationDateRule;

impl CouponRule for ExpirationDateRule {
    fn name(&self) -> &'static str {
        "expiration_date"
    }

    fn evaluate(&self, coupon: &Coupon, context: &RuleContext<'_>) -> RuleOutcome {
        match coupon.expires_at() {
            Some(expires_at) if context.now > expires_at => RuleOutcome::Reject(format!(
                "Coupon expired on {}",
                expires_at.strftime("%d/%m/%Y")
            )),
            _ => RuleOutcome::Pass,
        }
    }
}
