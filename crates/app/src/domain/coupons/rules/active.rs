//! Active Rule

use crate::domain::coupons::{
    models::Coupon,
    rules::{CouponRule, RuleContext, RuleOutcome},
};

/// Rejects coupons that have been deactivated.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActiveRule;

impl CouponRule for ActiveRule {
    fn name(&self) -> &'static str {
        "active"
    }

    fn evaluate(&self, coupon: &Coupon, _context: &RuleContext<'_>) -> RuleOutcome {
        if coupon.is_active() {
            RuleOutcome::Pass
        } else {
            RuleOutcome::Reject("Coupon is not active".to_string())
        }
    }
}
