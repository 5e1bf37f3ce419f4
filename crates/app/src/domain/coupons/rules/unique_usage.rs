//! Unique Usage Rule

use crate::domain::coupons::{
    models::Coupon,
    rules::{CouponRule, RuleContext, RuleOutcome},
};

/// Rejects a second redemption by the same customer on single-use coupons.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniqueUsageRule;

impl CouponRule for UniqueUsageRule {
    fn name(&self) -> &'static str {
        "unique_usage"
    }

    fn evaluate(&self, coupon: &Coupon, context: &RuleContext<'_>) -> RuleOutcome {
        if coupon.is_unique_per_customer() && coupon.has_been_used_by_customer(context.customer_id)
        {
            RuleOutcome::Reject("This coupon has already been used by this customer".to_string())
        } else {
            RuleOutcome::Pass
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use crate::domain::coupons::rules::tests::{context, coupon};

    use super::*;

    #[test]
    fn first_use_passes() {
        let coupon = coupon(|new| new.is_unique_per_customer = true);

        assert!(UniqueUsageRule.evaluate(&coupon, &context(dec!(10))).is_valid());
    }

    #[test]
    fn repeat_use_is_rejected() -> TestResult {
        let mut coupon = coupon(|new| new.is_unique_per_customer = true);
        coupon.add_usage("customer-1", dec!(10), dec!(1))?;

        let outcome = UniqueUsageRule.evaluate(&coupon, &context(dec!(10)));

        assert_eq!(
            outcome.message(),
            Some("This coupon has already been used by this customer")
        );

        Ok(())
    }

    #[test]
    fn other_customers_are_unaffected() -> TestResult {
        let mut coupon = coupon(|new| new.is_unique_per_customer = true);
        coupon.add_usage("customer-2", dec!(10), dec!(1))?;

        assert!(UniqueUsageRule.evaluate(&coupon, &context(dec!(10))).is_valid());

        Ok(())
    }

    #[test]
    fn reusable_coupons_ignore_history() -> TestResult {
        let mut coupon = coupon(|_| {});
        coupon.add_usage("customer-1", dec!(10), dec!(1))?;

        assert!(UniqueUsageRule.evaluate(&coupon, &context(dec!(10))).is_valid());

        Ok(())
    }
}
