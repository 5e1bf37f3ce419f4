//! Coupons JSON API Health Handler

use jiff::Timestamp;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

const HEALTHY: &str = "healthy";

/// Health response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Time the check was answered, RFC 3339
    pub timestamp: String,
}

/// Health handler
///
/// Reports that the server is accepting requests. The database is not
/// probed.
#[endpoint(tags("health"), summary = "Health check endpoint")]
pub(crate) async fn handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HEALTHY.to_string(),
        timestamp: Timestamp::now().to_string(),
    })
}
