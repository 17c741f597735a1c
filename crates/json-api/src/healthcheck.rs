//! Liveness probe for load balancers and orchestrators.

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

/// Body returned by `GET /healthcheck`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `"ok"` while the process can answer requests
    pub status: String,
}

/// Reports that the process is up and serving.
#[endpoint(tags("health"), summary = "Report coupon API liveness")]
pub(crate) async fn handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
