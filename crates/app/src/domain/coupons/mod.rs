//! Coupons

pub mod application;
pub mod errors;
pub mod models;
mod repository;
pub mod rules;
pub mod seed;
pub mod service;

pub use errors::{CouponError, CouponsRepositoryError, CouponsServiceError};
pub use repository::*;
pub use service::*;
