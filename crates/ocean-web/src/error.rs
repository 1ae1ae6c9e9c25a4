//! JSON error envelope for API handlers.

use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ocean_core::OceanError;
use serde_json::json;

/// A failed API call, rendered as `{success: false, error, message?}`.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    /// `error` is a short summary for the user, `message` the underlying cause.
    Internal { error: String, message: String },
}

impl ApiError {
    /// Wrap a store failure under a summary line.
    pub fn internal(summary: impl Into<String>, cause: anyhow::Error) -> Self {
        let error = summary.into();
        tracing::error!(error = %error, cause = %format!("{:#}", cause), "Request failed");
        Self::Internal {
            error,
            message: format!("{:#}", cause),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<OceanError> for ApiError {
    fn from(err: OceanError) -> Self {
        match err {
            OceanError::NodeNotFound(_) => Self::NotFound(err.to_string()),
            e if e.is_client_error() => Self::BadRequest(e.to_string()),
            e => Self::Internal {
                error: "内部服务器错误".to_string(),
                message: e.to_string(),
            },
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::BadRequest(error) | Self::NotFound(error) => json!({
                "success": false,
                "error": error,
            }),
            Self::Internal { error, message } => json!({
                "success": false,
                "error": error,
                "message": message,
            }),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(OceanError::missing("q")).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(OceanError::UnknownLabel("Fish".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(OceanError::NodeNotFound("42".into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(OceanError::Config("bad".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
