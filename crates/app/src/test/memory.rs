//! In-memory coupons repository

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::coupons::{
    CouponsRepository, CouponsRepositoryError,
    models::{Coupon, CouponUuid, normalize_code},
};

/// Keeps coupons in a vector, enforcing the unique code and row version
/// contracts the PostgreSQL repository gets from its schema.
#[derive(Debug, Default)]
pub(crate) struct InMemoryCouponsRepository {
    coupons: Mutex<Vec<Coupon>>,
}

impl InMemoryCouponsRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn len(&self) -> usize {
        self.coupons.lock().await.len()
    }
}

fn persisted(coupon: &Coupon, version: i64) -> Coupon {
    let mut stored = coupon.to_stored();
    stored.version = version;

    Coupon::restore(stored, coupon.usages().to_vec())
}

#[async_trait]
impl CouponsRepository for InMemoryCouponsRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<Coupon>, CouponsRepositoryError> {
        let code = normalize_code(code);

        Ok(self
            .coupons
            .lock()
            .await
            .iter()
            .find(|coupon| coupon.code() == code)
            .cloned())
    }

    async fn find_by_uuid(
        &self,
        uuid: CouponUuid,
    ) -> Result<Option<Coupon>, CouponsRepositoryError> {
        Ok(self
            .coupons
            .lock()
            .await
            .iter()
            .find(|coupon| coupon.uuid() == uuid)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Coupon>, CouponsRepositoryError> {
        let mut coupons = self.coupons.lock().await.clone();

        coupons.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.uuid().cmp(&a.uuid()))
        });

        Ok(coupons)
    }

    async fn create(&self, coupon: Coupon) -> Result<Coupon, CouponsRepositoryError> {
        let mut coupons = self.coupons.lock().await;

        if coupons.iter().any(|existing| existing.code() == coupon.code()) {
            return Err(CouponsRepositoryError::AlreadyExists);
        }

        let stored = persisted(&coupon, coupon.version());

        coupons.push(stored.clone());

        Ok(stored)
    }

    async fn update(&self, coupon: &Coupon) -> Result<(), CouponsRepositoryError> {
        let mut coupons = self.coupons.lock().await;

        let Some(slot) = coupons.iter_mut().find(|existing| {
            existing.uuid() == coupon.uuid() && existing.version() == coupon.version()
        }) else {
            return Err(CouponsRepositoryError::Stale);
        };

        *slot = persisted(coupon, coupon.version() + 1);

        Ok(())
    }

    async fn exists(&self, code: &str) -> Result<bool, CouponsRepositoryError> {
        let code = normalize_code(code);

        Ok(self
            .coupons
            .lock()
            .await
            .iter()
            .any(|coupon| coupon.code() == code))
    }
}
