use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::dao::storage::StorageError;

/// Errors raised by the service layer.
///
/// Variants carry the complete client-facing message; the HTTP layer only
/// decides the status code. `UpdateFailed` is kept separate from the other
/// client errors: a write that matched no document reports 401, not 400.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Required input missing or a forbidden field present.
    #[error("{0}")]
    Validation(String),
    /// Entity absent, or present but not owned by the acting account.
    #[error("{0}")]
    NotFound(String),
    /// The operation clashes with current state (duplicate membership,
    /// taken name, membership absent on removal).
    #[error("{0}")]
    Conflict(String),
    /// Tournament roster is full.
    #[error("{0}")]
    Capacity(String),
    /// A persistence update or delete matched no document.
    #[error("{0}")]
    UpdateFailed(String),
    /// Credentials missing, invalid or expired.
    #[error("{0}")]
    Unauthorized(String),
    /// Authenticated, but the operation is not allowed for this account.
    #[error("{0}")]
    Forbidden(String),
    /// No storage backend is installed (degraded mode).
    #[error("storage unavailable (degraded mode)")]
    Degraded,
    /// The storage backend failed mid-operation.
    #[error("storage failure")]
    Storage(#[from] StorageError),
    /// Unexpected fault with no better classification.
    #[error("{0}")]
    Internal(String),
}

/// Application-level errors converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request, covering validation, lookup and state conflicts.
    #[error("{0}")]
    BadRequest(String),
    /// Missing or rejected credentials, or a write that changed nothing.
    #[error("{0}")]
    Unauthorized(String),
    /// Authenticated but not allowed.
    #[error("{0}")]
    Forbidden(String),
    /// Storage is unreachable; the request can be retried later.
    #[error("{0}")]
    ServiceUnavailable(String),
    /// Internal server error with the detail kept out of the response.
    #[error("{0}")]
    Internal(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(message)
            | ServiceError::NotFound(message)
            | ServiceError::Conflict(message)
            | ServiceError::Capacity(message) => AppError::BadRequest(message),
            ServiceError::UpdateFailed(message) | ServiceError::Unauthorized(message) => {
                AppError::Unauthorized(message)
            }
            ServiceError::Forbidden(message) => AppError::Forbidden(message),
            ServiceError::Degraded => {
                AppError::ServiceUnavailable("storage unavailable (degraded mode)".into())
            }
            ServiceError::Storage(source) => {
                error!(error = %source, "storage failure while handling a request");
                AppError::Internal("unexpected server error".into())
            }
            ServiceError::Internal(message) => {
                error!(error = %message, "internal failure while handling a request");
                AppError::Internal("unexpected server error".into())
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let payload = Json(ErrorBody {
            message: self.to_string(),
        });

        (self.status(), payload).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ServiceError) -> StatusCode {
        AppError::from(err).status()
    }

    #[test]
    fn client_faults_map_to_bad_request() {
        assert_eq!(
            status_of(ServiceError::Validation("missing field".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ServiceError::NotFound("tournament not found".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ServiceError::Conflict("already enrolled".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ServiceError::Capacity("roster full".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn failed_update_keeps_its_own_status() {
        assert_eq!(
            status_of(ServiceError::UpdateFailed("nothing matched".into())),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn auth_faults_map_to_their_statuses() {
        assert_eq!(
            status_of(ServiceError::Unauthorized("bad token".into())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(ServiceError::Forbidden("admins only".into())),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn degraded_mode_maps_to_service_unavailable() {
        assert_eq!(status_of(ServiceError::Degraded), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn storage_faults_become_opaque_internal_errors() {
        let source = StorageError::backend("socket closed", std::io::Error::other("boom"));
        let app = AppError::from(ServiceError::Storage(source));
        assert_eq!(app.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(app.to_string(), "unexpected server error");
    }
}
