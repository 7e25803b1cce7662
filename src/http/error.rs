use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::error::ServiceError;
use crate::http::dto::ErrorDto;

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidDateFormat { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } | Self::UserNotFound { .. } => StatusCode::NOT_FOUND,
            Self::UnsupportedCriteria { .. } => StatusCode::NOT_IMPLEMENTED,
            Self::CircuitOpen { .. } => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Client errors carry their message; internal failures are logged and
/// answered with a generic body so that remote addresses and paths stay
/// private.
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "Request failed");
            "Internal server error".to_string()
        } else {
            if status.is_server_error() {
                tracing::warn!(error = %self, status = status.as_u16(), "Request failed");
            } else {
                tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
            }
            self.to_string()
        };

        (status, Json(ErrorDto { error })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::ValidationIssue;

    #[test]
    fn status_mapping() {
        let cases = [
            (
                ServiceError::Validation(vec![ValidationIssue::new("name", "blank")]),
                StatusCode::BAD_REQUEST,
            ),
            (
                ServiceError::InvalidDateFormat { value: "x".into() },
                StatusCode::BAD_REQUEST,
            ),
            (
                ServiceError::NotFound {
                    entity: "Accommodation",
                    id: "1".into(),
                },
                StatusCode::NOT_FOUND,
            ),
            (
                ServiceError::UnsupportedCriteria { kind: "x".into() },
                StatusCode::NOT_IMPLEMENTED,
            ),
            (
                ServiceError::CircuitOpen { service: "users" },
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                ServiceError::AvailabilityCheckFailed { reason: "x".into() },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.status_code(), expected, "{err}");
        }
    }

    #[test]
    fn internal_errors_hide_details() {
        let response = ServiceError::Store {
            reason: "disk on fire".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
