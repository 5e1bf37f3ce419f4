//! Coupon Models

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{domain::coupons::errors::CouponError, uuids::TypedUuid};

/// Longest accepted coupon code, measured both as given and once normalized.
pub const MAX_CODE_LENGTH: usize = 50;

/// Longest accepted customer id, after trimming.
pub const MAX_CUSTOMER_ID_LENGTH: usize = 100;

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Coupon UUID
pub type CouponUuid = TypedUuid<Coupon>;

/// Coupon Usage UUID
pub type CouponUsageUuid = TypedUuid<CouponUsage>;

/// How a coupon's discount value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// Flat amount off, capped at the order value.
    Fixed,

    /// Proportion of the order value, at most 100%.
    Percentage,
}

impl DiscountType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Percentage => "percentage",
        }
    }
}

impl fmt::Display for DiscountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscountType {
    type Err = CouponError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "fixed" => Ok(Self::Fixed),
            "percentage" => Ok(Self::Percentage),
            other => Err(CouponError::UnknownDiscountType(other.to_string())),
        }
    }
}

/// Normalize a coupon code for storage and lookups.
#[must_use]
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// New Coupon Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCoupon {
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub minimum_order_value: Option<Decimal>,
    pub expires_at: Option<Timestamp>,
    pub is_unique_per_customer: bool,
}

/// A single redemption of a coupon. Only created through [`Coupon::add_usage`].
#[derive(Debug, Clone, PartialEq)]
pub struct CouponUsage {
    uuid: CouponUsageUuid,
    coupon_uuid: CouponUuid,
    customer_id: String,
    order_value: Decimal,
    discount_applied: Decimal,
    used_at: Timestamp,
}

impl CouponUsage {
    fn new(
        coupon_uuid: CouponUuid,
        customer_id: &str,
        order_value: Decimal,
        discount_applied: Decimal,
    ) -> Result<Self, CouponError> {
        let customer_id = customer_id.trim();

        if customer_id.is_empty() {
            return Err(CouponError::EmptyCustomerId);
        }

        if customer_id.chars().count() > MAX_CUSTOMER_ID_LENGTH {
            return Err(CouponError::CustomerIdTooLong {
                max: MAX_CUSTOMER_ID_LENGTH,
            });
        }

        if order_value <= Decimal::ZERO {
            return Err(CouponError::NonPositiveOrderValue);
        }

        if discount_applied < Decimal::ZERO {
            return Err(CouponError::NegativeDiscountApplied);
        }

        Ok(Self {
            uuid: CouponUsageUuid::new(),
            coupon_uuid,
            customer_id: customer_id.to_string(),
            order_value,
            discount_applied,
            used_at: Timestamp::now(),
        })
    }

    /// Rebuild a usage that was read back from storage.
    #[must_use]
    pub fn restore(
        uuid: CouponUsageUuid,
        coupon_uuid: CouponUuid,
        customer_id: String,
        order_value: Decimal,
        discount_applied: Decimal,
        used_at: Timestamp,
    ) -> Self {
        Self {
            uuid,
            coupon_uuid,
            customer_id,
            order_value,
            discount_applied,
            used_at,
        }
    }

    pub fn uuid(&self) -> CouponUsageUuid {
        self.uuid
    }

    pub fn coupon_uuid(&self) -> CouponUuid {
        self.coupon_uuid
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn order_value(&self) -> Decimal {
        self.order_value
    }

    pub fn discount_applied(&self) -> Decimal {
        self.discount_applied
    }

    pub fn used_at(&self) -> Timestamp {
        self.used_at
    }
}

/// Stored coupon columns, used to rebuild a [`Coupon`] without re-running
/// construction checks.
#[derive(Debug, Clone)]
pub struct StoredCoupon {
    pub uuid: CouponUuid,
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub minimum_order_value: Option<Decimal>,
    pub expires_at: Option<Timestamp>,
    pub is_active: bool,
    pub is_unique_per_customer: bool,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
    pub version: i64,
}

/// Coupon Model
///
/// Discount parameters are checked once, in [`Coupon::new`]. Afterwards the
/// only mutations are deactivation and appending usages.
#[derive(Debug, Clone, PartialEq)]
pub struct Coupon {
    uuid: CouponUuid,
    code: String,
    discount_type: DiscountType,
    discount_value: Decimal,
    minimum_order_value: Option<Decimal>,
    expires_at: Option<Timestamp>,
    is_active: bool,
    is_unique_per_customer: bool,
    created_at: Timestamp,
    updated_at: Option<Timestamp>,
    usages: Vec<CouponUsage>,
    persisted_usages: usize,
    version: i64,
}

impl Coupon {
    /// Build a new, active coupon.
    ///
    /// # Errors
    ///
    /// Returns a [`CouponError`] when the code is blank or longer than
    /// [`MAX_CODE_LENGTH`], the discount value is not positive, a percentage
    /// exceeds 100, or the minimum order value is not positive.
    pub fn new(coupon: NewCoupon) -> Result<Self, CouponError> {
        let code = validate_code(&coupon.code)?;

        validate_discount_value(coupon.discount_type, coupon.discount_value)?;

        if coupon
            .minimum_order_value
            .is_some_and(|minimum| minimum <= Decimal::ZERO)
        {
            return Err(CouponError::NonPositiveMinimumOrderValue);
        }

        Ok(Self {
            uuid: CouponUuid::new(),
            code,
            discount_type: coupon.discount_type,
            discount_value: coupon.discount_value,
            minimum_order_value: coupon.minimum_order_value,
            expires_at: coupon.expires_at,
            is_active: true,
            is_unique_per_customer: coupon.is_unique_per_customer,
            created_at: Timestamp::now(),
            updated_at: None,
            usages: Vec::new(),
            persisted_usages: 0,
            version: 1,
        })
    }

    /// Rebuild a coupon and its usage history from storage.
    #[must_use]
    pub fn restore(stored: StoredCoupon, usages: Vec<CouponUsage>) -> Self {
        Self {
            uuid: stored.uuid,
            code: stored.code,
            discount_type: stored.discount_type,
            discount_value: stored.discount_value,
            minimum_order_value: stored.minimum_order_value,
            expires_at: stored.expires_at,
            is_active: stored.is_active,
            is_unique_per_customer: stored.is_unique_per_customer,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
            persisted_usages: usages.len(),
            usages,
            version: stored.version,
        }
    }

    /// Column values for persisting this coupon.
    #[must_use]
    pub fn to_stored(&self) -> StoredCoupon {
        StoredCoupon {
            uuid: self.uuid,
            code: self.code.clone(),
            discount_type: self.discount_type,
            discount_value: self.discount_value,
            minimum_order_value: self.minimum_order_value,
            expires_at: self.expires_at,
            is_active: self.is_active,
            is_unique_per_customer: self.is_unique_per_customer,
            created_at: self.created_at,
            updated_at: self.updated_at,
            version: self.version,
        }
    }

    /// Mark the coupon inactive. Calling this on an inactive coupon is not an
    /// error; `updated_at` is refreshed either way.
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Some(Timestamp::now());
    }

    /// Record a redemption of this coupon.
    ///
    /// # Errors
    ///
    /// Returns a [`CouponError`] when the customer id is blank, the order
    /// value is not positive or the applied discount is negative.
    pub fn add_usage(
        &mut self,
        customer_id: &str,
        order_value: Decimal,
        discount_applied: Decimal,
    ) -> Result<CouponUsage, CouponError> {
        let usage = CouponUsage::new(self.uuid, customer_id, order_value, discount_applied)?;

        self.usages.push(usage.clone());

        Ok(usage)
    }

    /// Whether the customer has redeemed this coupon before. Matching is
    /// exact: customer ids are not case-folded.
    pub fn has_been_used_by_customer(&self, customer_id: &str) -> bool {
        self.usages
            .iter()
            .any(|usage| usage.customer_id == customer_id)
    }

    /// Discount granted on an order of the given value.
    pub fn calculate_discount(&self, order_value: Decimal) -> Decimal {
        match self.discount_type {
            DiscountType::Fixed => self.discount_value.min(order_value),
            DiscountType::Percentage => order_value * (self.discount_value / ONE_HUNDRED),
        }
    }

    pub fn uuid(&self) -> CouponUuid {
        self.uuid
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn discount_type(&self) -> DiscountType {
        self.discount_type
    }

    pub fn discount_value(&self) -> Decimal {
        self.discount_value
    }

    pub fn minimum_order_value(&self) -> Option<Decimal> {
        self.minimum_order_value
    }

    pub fn expires_at(&self) -> Option<Timestamp> {
        self.expires_at
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn is_unique_per_customer(&self) -> bool {
        self.is_unique_per_customer
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<Timestamp> {
        self.updated_at
    }

    pub fn usages(&self) -> &[CouponUsage] {
        &self.usages
    }

    pub fn usage_count(&self) -> usize {
        self.usages.len()
    }

    /// Usages appended since the coupon was created or loaded.
    pub fn pending_usages(&self) -> &[CouponUsage] {
        self.usages.get(self.persisted_usages..).unwrap_or_default()
    }

    /// Row version this coupon was loaded at.
    pub fn version(&self) -> i64 {
        self.version
    }
}

fn validate_code(code: &str) -> Result<String, CouponError> {
    if code.trim().is_empty() {
        return Err(CouponError::EmptyCode);
    }

    let normalized = normalize_code(code);

    // Uppercasing can grow a code ("ß" becomes "SS").
    if code.chars().count() > MAX_CODE_LENGTH || normalized.chars().count() > MAX_CODE_LENGTH {
        return Err(CouponError::CodeTooLong {
            max: MAX_CODE_LENGTH,
        });
    }

    Ok(normalized)
}

fn validate_discount_value(discount_type: DiscountType, value: Decimal) -> Result<(), CouponError> {
    if value <= Decimal::ZERO {
        return Err(CouponError::NonPositiveDiscountValue);
    }

    if discount_type == DiscountType::Percentage && value > ONE_HUNDRED {
        return Err(CouponError::PercentageAboveLimit);
    }

    Ok(())
}
