//! Coupon request and response bodies

use std::string::ToString;

use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use coupons_app::domain::coupons::{
    application::CouponApplication,
    models::{Coupon, DiscountType},
};

/// Discount Type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum DiscountTypeBody {
    /// Flat amount off, capped at the order value
    Fixed,

    /// Percentage of the order value, at most 100
    Percentage,
}

impl From<DiscountTypeBody> for DiscountType {
    fn from(body: DiscountTypeBody) -> Self {
        match body {
            DiscountTypeBody::Fixed => Self::Fixed,
            DiscountTypeBody::Percentage => Self::Percentage,
        }
    }
}

impl From<DiscountType> for DiscountTypeBody {
    fn from(discount_type: DiscountType) -> Self {
        match discount_type {
            DiscountType::Fixed => Self::Fixed,
            DiscountType::Percentage => Self::Percentage,
        }
    }
}

/// Coupon Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CouponResponse {
    /// The unique identifier of the coupon
    pub id: Uuid,

    /// Normalized (trimmed, uppercase) coupon code
    pub code: String,

    pub discount_type: DiscountTypeBody,

    /// Amount off, or percentage points for percentage coupons
    #[salvo(schema(value_type = String))]
    pub discount_value: Decimal,

    /// Smallest order value the coupon applies to
    #[salvo(schema(value_type = Option<String>))]
    pub minimum_order_value: Option<Decimal>,

    /// Instant after which the coupon is rejected
    pub expiration_date: Option<String>,

    pub is_active: bool,

    pub is_unique_per_customer: bool,

    /// The date and time the coupon was created
    pub created_at: String,

    /// The date and time the coupon was last updated
    pub updated_at: Option<String>,

    /// Number of recorded redemptions
    pub usage_count: usize,
}

impl From<&Coupon> for CouponResponse {
    fn from(coupon: &Coupon) -> Self {
        Self {
            id: coupon.uuid().into_uuid(),
            code: coupon.code().to_string(),
            discount_type: coupon.discount_type().into(),
            discount_value: coupon.discount_value(),
            minimum_order_value: coupon.minimum_order_value(),
            expiration_date: coupon.expires_at().as_ref().map(ToString::to_string),
            is_active: coupon.is_active(),
            is_unique_per_customer: coupon.is_unique_per_customer(),
            created_at: coupon.created_at().to_string(),
            updated_at: coupon.updated_at().as_ref().map(ToString::to_string),
            usage_count: coupon.usage_count(),
        }
    }
}

/// Coupon Application Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ApplyCouponResponse {
    /// Whether the discount was granted
    pub is_valid: bool,

    /// Discount granted, zero when not valid
    #[salvo(schema(value_type = String))]
    pub discount_amount: Decimal,

    /// Order value after the discount, zero when not valid
    #[salvo(schema(value_type = String))]
    pub final_amount: Decimal,

    /// Summary of why the coupon was not applied
    pub error_message: Option<String>,

    /// Every rule that rejected the coupon, in evaluation order
    pub validation_errors: Vec<String>,
}

impl From<CouponApplication> for ApplyCouponResponse {
    fn from(application: CouponApplication) -> Self {
        Self {
            is_valid: application.is_valid(),
            discount_amount: application.discount_amount(),
            final_amount: application.final_amount(),
            error_message: application.error_message().map(ToString::to_string),
            validation_errors: application
                .validation_errors()
                .map(<[String]>::to_vec)
                .unwrap_or_default(),
        }
    }
}
