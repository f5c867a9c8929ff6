//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use homegate_domain::error::{CatalogError, ConnectionError, GatewayError};

/// Machine-readable failure class carried in every error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorReason {
    ValidationFailed,
    NotFound,
    DeviceAlreadyAdded,
    DuplicateDeviceName,
    InternalServerError,
}

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    reason: ErrorReason,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

/// Maps [`GatewayError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    reason: ErrorReason,
    message: String,
    details: Option<serde_json::Value>,
}

impl ApiError {
    /// A request that could not be understood at all.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            reason: ErrorReason::ValidationFailed,
            message: message.into(),
            details: None,
        }
    }

    /// Echo the offending request back to the caller.
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn reason(&self) -> ErrorReason {
        self.reason
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        let (status, reason) = match &err {
            GatewayError::Validation(_) | GatewayError::Action(_) => {
                (StatusCode::BAD_REQUEST, ErrorReason::ValidationFailed)
            }
            GatewayError::Connection(ConnectionError::DeviceNotFound { .. })
            | GatewayError::Catalog(CatalogError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, ErrorReason::NotFound)
            }
            GatewayError::Catalog(CatalogError::DeviceAlreadyAdded { .. }) => {
                (StatusCode::BAD_REQUEST, ErrorReason::DeviceAlreadyAdded)
            }
            GatewayError::Catalog(CatalogError::DuplicateDeviceName { .. }) => {
                (StatusCode::BAD_REQUEST, ErrorReason::DuplicateDeviceName)
            }
            GatewayError::Connection(ConnectionError::UnknownDeviceType { .. })
            | GatewayError::Storage(_)
            | GatewayError::Discovery(_) => {
                tracing::error!(error = ?err, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorReason::InternalServerError,
                )
            }
        };
        let message = match err {
            GatewayError::Validation(inner) => inner.to_string(),
            other => other.to_string(),
        };
        Self {
            status,
            reason,
            message,
            details: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            reason: self.reason,
            message: self.message,
            details: self.details,
        };
        (self.status, Json(body)).into_response()
    }
}
