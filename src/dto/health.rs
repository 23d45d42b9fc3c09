use serde::Serialize;
use utoipa::ToSchema;

/// Body of the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// "ok" while a game store is installed, "degraded" otherwise.
    pub status: String,
}

impl HealthResponse {
    /// Storage reachable.
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }

    /// No storage installed; game routes fail until it comes back.
    pub fn degraded() -> Self {
        Self {
            status: "degraded".to_string(),
        }
    }
}
