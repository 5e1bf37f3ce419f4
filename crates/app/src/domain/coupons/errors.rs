//! Coupons errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

/// Invalid input while building or mutating a coupon.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CouponError {
    #[error("coupon code cannot be empty")]
    EmptyCode,

    #[error("coupon code must be at most {max} characters")]
    CodeTooLong { max: usize },

    #[error("discount value must be greater than zero")]
    NonPositiveDiscountValue,

    #[error("percentage discount cannot be greater than 100%")]
    PercentageAboveLimit,

    #[error("minimum order value must be greater than zero")]
    NonPositiveMinimumOrderValue,

    #[error("unknown discount type: {0}")]
    UnknownDiscountType(String),

    #[error("customer id cannot be empty")]
    EmptyCustomerId,

    #[error("customer id must be at most {max} characters")]
    CustomerIdTooLong { max: usize },

    #[error("order value must be greater than zero")]
    NonPositiveOrderValue,

    #[error("applied discount cannot be negative")]
    NegativeDiscountApplied,
}

/// Failures raised by a [`CouponsRepository`](super::CouponsRepository).
#[derive(Debug, Error)]
pub enum CouponsRepositoryError {
    #[error("coupon code already exists")]
    AlreadyExists,

    #[error("coupon was modified since it was loaded")]
    Stale,

    #[error("storage error")]
    Storage(#[source] Error),
}

impl From<Error> for CouponsRepositoryError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            _ => Self::Storage(error),
        }
    }
}

#[derive(Debug, Error)]
pub enum CouponsServiceError {
    #[error(transparent)]
    Invalid(#[from] CouponError),

    #[error("coupon already exists")]
    AlreadyExists,

    #[error("coupon not found")]
    NotFound,

    #[error("coupon was updated concurrently")]
    ConcurrentUpdate,

    #[error("storage error")]
    Storage(#[source] Error),
}

impl From<CouponsRepositoryError> for CouponsServiceError {
    fn from(error: CouponsRepositoryError) -> Self {
        match error {
            CouponsRepositoryError::AlreadyExists => Self::AlreadyExists,
            CouponsRepositoryError::Stale => Self::ConcurrentUpdate,
            CouponsRepositoryError::Storage(source) => Self::Storage(source),
        }
    }
}
