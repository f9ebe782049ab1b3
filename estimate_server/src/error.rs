use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use estimate_core::EstimateError;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

/// Fixed message for a request body missing one of its required fields
pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields";

/// Errors surfaced by the HTTP handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Failure reported by the estimation core
    #[error(transparent)]
    Estimate(#[from] EstimateError),

    /// Malformed request that never reached the core
    #[error("{0}")]
    BadRequest(String),

    /// Body the JSON extractor refused, with the status it chose
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    /// Server-side failure outside the core
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Estimate(err) if err.is_client_error() => StatusCode::BAD_REQUEST,
            Self::Estimate(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Rejected { status, .. } => *status,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text placed in the `error` field of the response body
    pub fn message(&self) -> String {
        match self {
            Self::Estimate(EstimateError::MissingField { .. }) => MISSING_FIELDS_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            debug!("Rejected request: {}", self);
        }

        (status, Json(json!({ "error": self.message() }))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_uses_fixed_message() {
        let err = ApiError::from(EstimateError::missing_field("budget"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Missing required fields");
    }

    #[test]
    fn test_estimator_errors_are_client_errors() {
        let err = ApiError::from(EstimateError::BudgetExceeded);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.message(),
            "Budget is not enough to cover the estimated total cost."
        );

        let err = ApiError::from(EstimateError::invalid_style("Gothic"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.message(),
            "Invalid design style. Choose from Modern, Classic, or Rustic."
        );
    }

    #[test]
    fn test_catalog_and_internal_errors_are_server_errors() {
        let err = ApiError::from(EstimateError::catalog_defect("Modern", "no prices"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = ApiError::Internal("render task panicked".to_string());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.message().contains("render task panicked"));
    }

    #[test]
    fn test_json_rejection_keeps_its_status() {
        let err = ApiError::from(JsonRejection::from(
            axum::extract::rejection::MissingJsonContentType::default(),
        ));
        assert_eq!(err.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(err.message().contains("Content-Type"));
    }
}
