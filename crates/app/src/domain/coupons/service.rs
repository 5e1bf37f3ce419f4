//! Coupons service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rust_decimal::RoundingStrategy;
use tracing::{info, instrument, warn};

use crate::domain::coupons::{
    application::{ApplyCoupon, CouponApplication},
    errors::CouponsServiceError,
    models::{Coupon, NewCoupon, normalize_code},
    repository::CouponsRepository,
    rules::{RuleContext, RuleSet},
};

/// Decimal places kept for money amounts, matching the storage columns.
const MONEY_SCALE: u32 = 2;

#[automock]
#[async_trait]
pub trait CouponsService: Send + Sync {
    /// Create a coupon, failing with `AlreadyExists` when the code is taken.
    async fn create_coupon(&self, coupon: NewCoupon) -> Result<Coupon, CouponsServiceError>;

    /// Validate a redemption against every rule and, when it passes, record
    /// the usage.
    ///
    /// Rule rejections and unknown codes are ordinary outcomes. Only invalid
    /// usage input, lost update races and storage failures are errors.
    async fn apply_coupon(
        &self,
        request: ApplyCoupon,
    ) -> Result<CouponApplication, CouponsServiceError>;

    /// Retrieve a single coupon by code.
    async fn get_coupon(&self, code: &str) -> Result<Coupon, CouponsServiceError>;

    /// All coupons, newest first.
    async fn list_coupons(&self) -> Result<Vec<Coupon>, CouponsServiceError>;

    /// Deactivate a coupon. Deactivating an inactive coupon succeeds.
    async fn deactivate_coupon(&self, code: &str) -> Result<(), CouponsServiceError>;
}

#[derive(Clone)]
pub struct DefaultCouponsService {
    repository: Arc<dyn CouponsRepository>,
    rules: Arc<RuleSet>,
}

impl DefaultCouponsService {
    /// Service evaluating the standard rule set.
    #[must_use]
    pub fn new(repository: Arc<dyn CouponsRepository>) -> Self {
        Self::with_rules(repository, RuleSet::standard())
    }

    #[must_use]
    pub fn with_rules(repository: Arc<dyn CouponsRepository>, rules: RuleSet) -> Self {
        Self {
            repository,
            rules: Arc::new(rules),
        }
    }

    async fn find(&self, code: &str) -> Result<Coupon, CouponsServiceError> {
        self.repository
            .find_by_code(code)
            .await?
            .ok_or(CouponsServiceError::NotFound)
    }
}

impl fmt::Debug for DefaultCouponsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultCouponsService")
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CouponsService for DefaultCouponsService {
    #[instrument(skip_all, fields(coupon_code = %coupon.code.trim()))]
    async fn create_coupon(&self, coupon: NewCoupon) -> Result<Coupon, CouponsServiceError> {
        if self.repository.exists(&coupon.code).await? {
            warn!("coupon code already exists");

            return Err(CouponsServiceError::AlreadyExists);
        }

        let created = self.repository.create(Coupon::new(coupon)?).await?;

        info!(coupon_uuid = %created.uuid(), "coupon created");

        Ok(created)
    }

    #[instrument(
        skip_all,
        fields(
            coupon_code = %normalize_code(&request.coupon_code),
            customer_id = %request.customer_id.trim(),
            order_value = %request.order_value,
        )
    )]
    async fn apply_coupon(
        &self,
        request: ApplyCoupon,
    ) -> Result<CouponApplication, CouponsServiceError> {
        // Usages store the trimmed id, so the rules must see the same value.
        let customer_id = request.customer_id.trim();

        let Some(mut coupon) = self.repository.find_by_code(&request.coupon_code).await? else {
            warn!("coupon not found");

            return Ok(CouponApplication::NotFound);
        };

        let context = RuleContext {
            customer_id,
            order_value: request.order_value,
            now: Timestamp::now(),
        };

        let validation_errors = self.rules.evaluate(&coupon, &context);

        if !validation_errors.is_empty() {
            warn!(rejections = validation_errors.len(), "coupon rejected");

            return Ok(CouponApplication::Rejected { validation_errors });
        }

        let discount_amount = coupon
            .calculate_discount(request.order_value)
            .round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
        let final_amount = request.order_value - discount_amount;

        coupon.add_usage(customer_id, request.order_value, discount_amount)?;

        self.repository.update(&coupon).await?;

        info!(%discount_amount, %final_amount, "coupon applied");

        Ok(CouponApplication::Applied {
            discount_amount,
            final_amount,
        })
    }

    async fn get_coupon(&self, code: &str) -> Result<Coupon, CouponsServiceError> {
        self.find(code).await
    }

    async fn list_coupons(&self) -> Result<Vec<Coupon>, CouponsServiceError> {
        Ok(self.repository.list().await?)
    }

    #[instrument(skip(self), fields(coupon_code = %normalize_code(code)))]
    async fn deactivate_coupon(&self, code: &str) -> Result<(), CouponsServiceError> {
        let mut coupon = self.find(code).await?;

        coupon.deactivate();

        self.repository.update(&coupon).await?;

        info!(coupon_uuid = %coupon.uuid(), "coupon deactivated");

        Ok(())
    }
}
