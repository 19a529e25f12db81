use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use todo_common::types::ErrorBody;
use todo_service::ServiceError;
use tracing::{error, warn};

use crate::observability;

/// Every way a todo API request can fail. Rendered as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(&'static str),
    #[error("Invalid request body")]
    InvalidBody(String),
    #[error("Todo not found")]
    NotFound,
    /// Carries the value of the `Allow` header.
    #[error("Method Not Allowed")]
    MethodNotAllowed(&'static str),
    #[error("Internal Server Error")]
    Internal(#[from] ServiceError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation",
            ApiError::InvalidBody(_) => "invalid_body",
            ApiError::NotFound => "not_found",
            ApiError::MethodNotAllowed(_) => "method_not_allowed",
            ApiError::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        observability::record_error(self.kind());
        match &self {
            // detail goes to the log only; the client sees the generic message
            ApiError::Internal(e) => error!(error = %e, "todo request failed"),
            ApiError::InvalidBody(detail) => warn!(%detail, "rejected request body"),
            _ => {}
        }
        let status = self.status();
        let mut resp = (status, Json(ErrorBody::new(self.to_string()))).into_response();
        if let ApiError::MethodNotAllowed(allow) = self {
            resp.headers_mut().insert(header::ALLOW, HeaderValue::from_static(allow));
        }
        resp
    }
}
