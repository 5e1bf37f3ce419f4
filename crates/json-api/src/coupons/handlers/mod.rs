//! Coupon Handlers

pub(crate) mod apply;
pub(crate) mod create;
pub(crate) mod deactivate;
pub(crate) mod get;
pub(crate) mod index;
