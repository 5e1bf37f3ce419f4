//! Coupon Rules
//!
//! Each rule inspects a coupon snapshot together with the attempted
//! redemption and either passes or rejects it with a human-readable reason.
//! Rules hold no shared state and have no side effects, so a [`RuleSet`]
//! always evaluates every registered rule and reports every rejection.

use std::fmt;

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::domain::coupons::models::Coupon;

mod active;
mod expiration_date;
mod minimum_value;
mod unique_usage;

pub use active::ActiveRule;
pub use expiration_date::ExpirationDateRule;
pub use minimum_value::MinimumValueRule;
pub use unique_usage::UniqueUsageRule;

/// The redemption being checked.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub customer_id: &'a str,
    pub order_value: Decimal,
    pub now: Timestamp,
}

/// Result of a single rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    Pass,
    Reject(String),
}

impl RuleOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Pass)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Pass => None,
            Self::Reject(message) => Some(message),
        }
    }
}

/// A single business rule gating coupon redemption.
pub trait CouponRule: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    fn evaluate(&self, coupon: &Coupon, context: &RuleContext<'_>) -> RuleOutcome;
}

/// Ordered collection of rules.
#[derive(Default)]
pub struct RuleSet {
    rules: Vec<Box<dyn CouponRule>>,
}

impl RuleSet {
    /// A rule set with nothing registered.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The active, minimum value, expiration date and unique usage rules, in
    /// that order.
    #[must_use]
    pub fn standard() -> Self {
        Self::empty()
            .with(ActiveRule)
            .with(MinimumValueRule::default())
            .with(ExpirationDateRule)
            .with(UniqueUsageRule)
    }

    /// Register another rule after the existing ones.
    #[must_use]
    pub fn with(mut self, rule: impl CouponRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule and collect rejection messages in registration order.
    pub fn evaluate(&self, coupon: &Coupon, context: &RuleContext<'_>) -> Vec<String> {
        self.rules
            .iter()
            .filter_map(|rule| match rule.evaluate(coupon, context) {
                RuleOutcome::Pass => None,
                RuleOutcome::Reject(message) => {
                    tracing::debug!(rule = rule.name(), %message, "coupon rule rejected");

                    Some(message)
                }
            })
            .collect()
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.rules.iter().map(|rule| rule.name()))
            .finish()
    }
}
