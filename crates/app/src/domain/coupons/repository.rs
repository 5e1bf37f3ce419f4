//! Coupons Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, PgPool, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use tracing::debug;
use uuid::Uuid;

use crate::domain::coupons::{
    errors::CouponsRepositoryError,
    models::{
        Coupon, CouponUsage, CouponUsageUuid, CouponUuid, DiscountType, StoredCoupon,
        normalize_code,
    },
};

const GET_COUPON_BY_CODE_SQL: &str = include_str!("sql/get_coupon_by_code.sql");
const GET_COUPON_BY_UUID_SQL: &str = include_str!("sql/get_coupon_by_uuid.sql");
const LIST_COUPONS_SQL: &str = include_str!("sql/list_coupons.sql");
const LIST_COUPON_USAGES_SQL: &str = include_str!("sql/list_coupon_usages.sql");
const CREATE_COUPON_SQL: &str = include_str!("sql/create_coupon.sql");
const CREATE_COUPON_USAGE_SQL: &str = include_str!("sql/create_coupon_usage.sql");
const UPDATE_COUPON_SQL: &str = include_str!("sql/update_coupon.sql");
const COUPON_EXISTS_SQL: &str = include_str!("sql/coupon_exists.sql");

/// Persistence boundary for coupons and their usage history.
///
/// Dropping a returned future cancels the operation; implementations impose
/// no timeouts of their own.
#[automock]
#[async_trait]
pub trait CouponsRepository: Send + Sync {
    /// Find a coupon and its usages by code, ignoring case and surrounding
    /// whitespace.
    async fn find_by_code(&self, code: &str) -> Result<Option<Coupon>, CouponsRepositoryError>;

    /// Find a coupon and its usages by UUID.
    async fn find_by_uuid(
        &self,
        uuid: CouponUuid,
    ) -> Result<Option<Coupon>, CouponsRepositoryError>;

    /// All coupons, newest first.
    async fn list(&self) -> Result<Vec<Coupon>, CouponsRepositoryError>;

    /// Insert a new coupon. Fails with `AlreadyExists` when the code is taken.
    async fn create(&self, coupon: Coupon) -> Result<Coupon, CouponsRepositoryError>;

    /// Persist deactivation and newly added usages. Fails with `Stale` when
    /// the stored row version no longer matches the coupon's.
    async fn update(&self, coupon: &Coupon) -> Result<(), CouponsRepositoryError>;

    /// Whether a coupon with this code exists.
    async fn exists(&self, code: &str) -> Result<bool, CouponsRepositoryError>;
}

#[derive(Debug, Clone)]
pub struct PgCouponsRepository {
    pool: PgPool,
}

impl PgCouponsRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_usages(
        &self,
        coupons: Vec<StoredCoupon>,
    ) -> Result<Vec<Coupon>, CouponsRepositoryError> {
        if coupons.is_empty() {
            return Ok(Vec::new());
        }

        let uuids: Vec<Uuid> = coupons.iter().map(|c| c.uuid.into_uuid()).collect();

        let usages = query_as::<Postgres, CouponUsage>(LIST_COUPON_USAGES_SQL)
            .bind(uuids)
            .fetch_all(&self.pool)
            .await?;

        let mut by_coupon: FxHashMap<CouponUuid, Vec<CouponUsage>> = FxHashMap::default();

        for usage in usages {
            by_coupon.entry(usage.coupon_uuid()).or_default().push(usage);
        }

        Ok(coupons
            .into_iter()
            .map(|stored| {
                let usages = by_coupon.remove(&stored.uuid).unwrap_or_default();

                Coupon::restore(stored, usages)
            })
            .collect())
    }
}

#[async_trait]
impl CouponsRepository for PgCouponsRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<Coupon>, CouponsRepositoryError> {
        let code = normalize_code(code);

        debug!(coupon_code = %code, "loading coupon by code");

        let stored = query_as::<Postgres, StoredCoupon>(GET_COUPON_BY_CODE_SQL)
            .bind(&code)
            .fetch_optional(&self.pool)
            .await?;

        Ok(self.load_usages(stored.into_iter().collect()).await?.pop())
    }

    async fn find_by_uuid(
        &self,
        uuid: CouponUuid,
    ) -> Result<Option<Coupon>, CouponsRepositoryError> {
        debug!(coupon_uuid = %uuid, "loading coupon by uuid");

        let stored = query_as::<Postgres, StoredCoupon>(GET_COUPON_BY_UUID_SQL)
            .bind(uuid.into_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(self.load_usages(stored.into_iter().collect()).await?.pop())
    }

    async fn list(&self) -> Result<Vec<Coupon>, CouponsRepositoryError> {
        debug!("listing coupons");

        let stored = query_as::<Postgres, StoredCoupon>(LIST_COUPONS_SQL)
            .fetch_all(&self.pool)
            .await?;

        self.load_usages(stored).await
    }

    async fn create(&self, coupon: Coupon) -> Result<Coupon, CouponsRepositoryError> {
        debug!(coupon_uuid = %coupon.uuid(), coupon_code = coupon.code(), "creating coupon");

        let stored = coupon.to_stored();

        let mut tx = self.pool.begin().await?;

        query(CREATE_COUPON_SQL)
            .bind(stored.uuid.into_uuid())
            .bind(&stored.code)
            .bind(stored.discount_type.as_str())
            .bind(stored.discount_value)
            .bind(stored.minimum_order_value)
            .bind(stored.expires_at.map(SqlxTimestamp::from))
            .bind(stored.is_active)
            .bind(stored.is_unique_per_customer)
            .bind(SqlxTimestamp::from(stored.created_at))
            .bind(stored.updated_at.map(SqlxTimestamp::from))
            .bind(stored.version)
            .execute(&mut *tx)
            .await?;

        insert_usages(&mut tx, coupon.pending_usages()).await?;

        tx.commit().await?;

        Ok(Coupon::restore(stored, coupon.usages().to_vec()))
    }

    async fn update(&self, coupon: &Coupon) -> Result<(), CouponsRepositoryError> {
        debug!(
            coupon_uuid = %coupon.uuid(),
            version = coupon.version(),
            pending_usages = coupon.pending_usages().len(),
            "updating coupon"
        );

        let mut tx = self.pool.begin().await?;

        let rows_affected = query(UPDATE_COUPON_SQL)
            .bind(coupon.uuid().into_uuid())
            .bind(coupon.version())
            .bind(coupon.is_active())
            .bind(coupon.updated_at().map(SqlxTimestamp::from))
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if rows_affected == 0 {
            return Err(CouponsRepositoryError::Stale);
        }

        insert_usages(&mut tx, coupon.pending_usages()).await?;

        tx.commit().await?;

        Ok(())
    }

    async fn exists(&self, code: &str) -> Result<bool, CouponsRepositoryError> {
        let exists = query_scalar::<Postgres, bool>(COUPON_EXISTS_SQL)
            .bind(normalize_code(code))
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }
}

async fn insert_usages(
    tx: &mut Transaction<'_, Postgres>,
    usages: &[CouponUsage],
) -> Result<(), sqlx::Error> {
    for usage in usages {
        query(CREATE_COUPON_USAGE_SQL)
            .bind(usage.uuid().into_uuid())
            .bind(usage.coupon_uuid().into_uuid())
            .bind(usage.customer_id())
            .bind(usage.order_value())
            .bind(usage.discount_applied())
            .bind(SqlxTimestamp::from(usage.used_at()))
            .execute(&mut **tx)
            .await?;
    }

    Ok(())
}

impl<'r> FromRow<'r, PgRow> for StoredCoupon {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let discount_type = row
            .try_get::<String, _>("discount_type")?
            .parse::<DiscountType>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "discount_type".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: CouponUuid::from_uuid(row.try_get("uuid")?),
            code: row.try_get("code")?,
            discount_type,
            discount_value: row.try_get("discount_value")?,
            minimum_order_value: row.try_get("minimum_order_value")?,
            expires_at: row
                .try_get::<Option<SqlxTimestamp>, _>("expires_at")?
                .map(SqlxTimestamp::to_jiff),
            is_active: row.try_get("is_active")?,
            is_unique_per_customer: row.try_get("is_unique_per_customer")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row
                .try_get::<Option<SqlxTimestamp>, _>("updated_at")?
                .map(SqlxTimestamp::to_jiff),
            version: row.try_get("version")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CouponUsage {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self::restore(
            CouponUsageUuid::from_uuid(row.try_get("uuid")?),
            CouponUuid::from_uuid(row.try_get("coupon_uuid")?),
            row.try_get("customer_id")?,
            row.try_get("order_value")?,
            row.try_get("discount_applied")?,
            row.try_get::<SqlxTimestamp, _>("used_at")?.to_jiff(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, ToSpan};
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use crate::{
        domain::coupons::models::NewCoupon,
        test::TestDb,
    };

    use super::*;

    fn new_coupon(code: &str) -> NewCoupon {
        NewCoupon {
            code: code.to_string(),
            discount_type: DiscountType::Percentage,
            discount_value: dec!(10),
            minimum_order_value: Some(dec!(50)),
            expires_at: Some(Timestamp::now() + 240.hours()),
            is_unique_per_customer: true,
        }
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for the PostgreSQL testcontainer"]
    async fn create_then_find_by_code_is_case_insensitive() -> TestResult {
        let db = TestDb::new().await;
        let repository = PgCouponsRepository::new(db.pool().clone());

        let created = repository.create(Coupon::new(new_coupon("welcome10"))?).await?;

        let found = repository.find_by_code(" Welcome10 ").await?;

        assert_eq!(found.as_ref().map(Coupon::uuid), Some(created.uuid()));
        assert_eq!(found.as_ref().map(Coupon::code), Some("WELCOME10"));
        assert!(repository.exists("WELCOME10").await?);
        assert!(!repository.exists("MISSING").await?);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for the PostgreSQL testcontainer"]
    async fn create_duplicate_code_returns_already_exists() -> TestResult {
        let db = TestDb::new().await;
        let repository = PgCouponsRepository::new(db.pool().clone());

        repository.create(Coupon::new(new_coupon("DUP"))?).await?;

        let result = repository.create(Coupon::new(new_coupon("dup"))?).await;

        assert!(
            matches!(result, Err(CouponsRepositoryError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for the PostgreSQL testcontainer"]
    async fn update_persists_usages_and_bumps_version() -> TestResult {
        let db = TestDb::new().await;
        let repository = PgCouponsRepository::new(db.pool().clone());

        let mut coupon = repository.create(Coupon::new(new_coupon("USAGE"))?).await?;

        coupon.add_usage("customer-1", dec!(100), dec!(10))?;
        repository.update(&coupon).await?;

        let reloaded = repository.find_by_uuid(coupon.uuid()).await?;

        let Some(reloaded) = reloaded else {
            return Err("coupon should still exist".into());
        };

        assert_eq!(reloaded.usage_count(), 1);
        assert_eq!(reloaded.version(), 2);
        assert!(reloaded.has_been_used_by_customer("customer-1"));
        assert!(reloaded.pending_usages().is_empty());

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for the PostgreSQL testcontainer"]
    async fn update_from_stale_copy_is_rejected() -> TestResult {
        let db = TestDb::new().await;
        let repository = PgCouponsRepository::new(db.pool().clone());

        let created = repository.create(Coupon::new(new_coupon("RACE"))?).await?;

        let mut first = created.clone();
        let mut second = created;

        first.add_usage("customer-1", dec!(100), dec!(10))?;
        second.add_usage("customer-1", dec!(100), dec!(10))?;

        repository.update(&first).await?;

        let result = repository.update(&second).await;

        assert!(
            matches!(result, Err(CouponsRepositoryError::Stale)),
            "expected Stale, got {result:?}"
        );

        let reloaded = repository.find_by_code("RACE").await?;

        assert_eq!(reloaded.map(|c| c.usage_count()), Some(1));

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for the PostgreSQL testcontainer"]
    async fn list_returns_newest_first() -> TestResult {
        let db = TestDb::new().await;
        let repository = PgCouponsRepository::new(db.pool().clone());

        let older = repository.create(Coupon::new(new_coupon("OLDER"))?).await?;
        let newer = repository.create(Coupon::new(new_coupon("NEWER"))?).await?;

        let coupons = repository.list().await?;
        let uuids: Vec<CouponUuid> = coupons.iter().map(Coupon::uuid).collect();

        assert_eq!(uuids, vec![newer.uuid(), older.uuid()]);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for the PostgreSQL testcontainer"]
    async fn deactivation_is_persisted() -> TestResult {
        let db = TestDb::new().await;
        let repository = PgCouponsRepository::new(db.pool().clone());

        let mut coupon = repository.create(Coupon::new(new_coupon("OFF"))?).await?;

        coupon.deactivate();
        repository.update(&coupon).await?;

        let reloaded = repository.find_by_code("off").await?;

        assert_eq!(reloaded.as_ref().map(Coupon::is_active), Some(false));
        assert!(reloaded.and_then(|c| c.updated_at()).is_some());

        Ok(())
    }
}
