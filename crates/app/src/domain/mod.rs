//! Coupons Domain Concerns

pub mod coupons;
