use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Report whether storage is reachable, logging connectivity issues.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    match state.require_game_store().await {
        Ok(store) => match store.health_check().await {
            Ok(()) => HealthResponse::ok(),
            Err(err) => {
                warn!(error = %err, "storage health check failed");
                HealthResponse::degraded()
            }
        },
        Err(_) => {
            warn!("storage unavailable (degraded mode)");
            HealthResponse::degraded()
        }
    }
}
