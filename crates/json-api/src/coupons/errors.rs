//! Errors

use salvo::http::StatusError;
use tracing::error;

use coupons_app::domain::coupons::{CouponsServiceError, application::COUPON_NOT_FOUND};

pub(crate) fn into_status_error(error: CouponsServiceError) -> StatusError {
    match error {
        CouponsServiceError::Invalid(source) => StatusError::bad_request().brief(source.to_string()),
        CouponsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Coupon code already exists")
        }
        CouponsServiceError::ConcurrentUpdate => {
            StatusError::conflict().brief("Coupon was modified concurrently, retry the request")
        }
        CouponsServiceError::NotFound => StatusError::not_found().brief(COUPON_NOT_FOUND),
        CouponsServiceError::Storage(source) => {
            error!("coupon storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
