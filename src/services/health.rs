use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Probe the storage backend and report whether the service is fully up.
///
/// A missing store (still connecting, or dropped by the supervisor) and a
/// failed ping both surface as degraded so load balancers can react.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let Ok(store) = state.require_store().await else {
        warn!("storage unavailable (degraded mode)");
        return HealthResponse::degraded();
    };

    match store.health_check().await {
        Ok(()) => HealthResponse::ok(),
        Err(err) => {
            warn!(error = %err, "storage health check failed");
            HealthResponse::degraded()
        }
    }
}
