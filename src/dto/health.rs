use serde::Serialize;
use utoipa::ToSchema;

/// Reachability of the storage backend, as reported by `/healthcheck`.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Storage answered the last ping.
    Ok,
    /// Serving requests without a usable storage backend.
    Degraded,
}

/// Health payload returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Current health status.
    pub status: HealthStatus,
}

impl HealthResponse {
    /// Payload reporting reachable storage.
    pub fn ok() -> Self {
        Self {
            status: HealthStatus::Ok,
        }
    }

    /// Payload reporting degraded mode.
    pub fn degraded() -> Self {
        Self {
            status: HealthStatus::Degraded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_serialize_in_lowercase() {
        let ok = serde_json::to_value(HealthResponse::ok()).unwrap();
        assert_eq!(ok["status"], "ok");

        let degraded = serde_json::to_value(HealthResponse::degraded()).unwrap();
        assert_eq!(degraded["status"], "degraded");
    }
}
