//! Coupon Application Data

use rust_decimal::Decimal;

/// Message reported when no coupon matches the requested code.
pub const COUPON_NOT_FOUND: &str = "Coupon not found";

/// Message reported when one or more rules rejected the coupon.
pub const COUPON_INVALID: &str = "Invalid coupon";

/// Apply Coupon Data
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyCoupon {
    pub coupon_code: String,
    pub customer_id: String,
    pub order_value: Decimal,
}

/// Outcome of applying a coupon to an order.
///
/// Rejections are ordinary outcomes, not errors: only invalid input and
/// storage failures surface as `Err` from the service.
#[derive(Debug, Clone, PartialEq)]
pub enum CouponApplication {
    /// The discount was granted and a usage recorded.
    Applied {
        discount_amount: Decimal,
        final_amount: Decimal,
    },

    /// No coupon exists for the code.
    NotFound,

    /// The coupon exists but failed at least one rule.
    Rejected { validation_errors: Vec<String> },
}

impl CouponApplication {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    pub fn discount_amount(&self) -> Decimal {
        match self {
            Self::Applied {
                discount_amount, ..
            } => *discount_amount,
            Self::NotFound | Self::Rejected { .. } => Decimal::ZERO,
        }
    }

    pub fn final_amount(&self) -> Decimal {
        match self {
            Self::Applied { final_amount, .. } => *final_amount,
            Self::NotFound | Self::Rejected { .. } => Decimal::ZERO,
        }
    }

    pub fn error_message(&self) -> Option<&'static str> {
        match self {
            Self::Applied { .. } => None,
            Self::NotFound => Some(COUPON_NOT_FOUND),
            Self::Rejected { .. } => Some(COUPON_INVALID),
        }
    }

    /// Rule messages; only present for rejections.
    pub fn validation_errors(&self) -> Option<&[String]> {
        match self {
            Self::Rejected { validation_errors } => Some(validation_errors),
            Self::Applied { .. } | Self::NotFound => None,
        }
    }
}
