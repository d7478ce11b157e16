//! HTTP error mapping to the `{status: "error", message}` envelope

use super::dto::ErrorResponse;
use crate::contract::EntitlementError;
use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

pub const ROUTE_NOT_FOUND: &str = "Route not found";

/// Error response with its HTTP status
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse {
                status: "error".to_string(),
                message: message.into(),
                stack: None,
            },
        }
    }

    /// Attach error details
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.body.stack = Some(stack.into());
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// HTTP status for each domain error kind
pub fn status_for(error: &EntitlementError) -> StatusCode {
    match error {
        EntitlementError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        EntitlementError::NotFound { .. } => StatusCode::NOT_FOUND,
        EntitlementError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
        EntitlementError::Forbidden { .. } => StatusCode::FORBIDDEN,
        EntitlementError::Conflict { .. } => StatusCode::CONFLICT,
        EntitlementError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Turns failures into [`ApiError`]s.
///
/// `include_stack` is off in production so internals are not leaked.
#[derive(Debug, Clone, Copy)]
pub struct ErrorMapper {
    include_stack: bool,
}

impl ErrorMapper {
    pub fn new(include_stack: bool) -> Self {
        Self { include_stack }
    }

    pub fn include_stack(&self) -> bool {
        self.include_stack
    }

    /// Map domain errors to HTTP errors
    pub fn map_domain_error(&self, error: EntitlementError) -> ApiError {
        let status = status_for(&error);
        if status.is_server_error() {
            tracing::error!(error = %error, "Request failed");
        } else {
            tracing::debug!(error = %error, status = status.as_u16(), "Request rejected");
        }
        let stack = format!("{error:?}");
        self.with_details(ApiError::new(status, error.to_string()), stack)
    }

    /// Unparsable or mistyped JSON body
    pub fn map_json_rejection(&self, rejection: JsonRejection) -> ApiError {
        let stack = format!("{rejection:?}");
        self.with_details(
            ApiError::new(StatusCode::BAD_REQUEST, rejection.body_text()),
            stack,
        )
    }

    /// Malformed query string
    pub fn map_query_rejection(&self, rejection: QueryRejection) -> ApiError {
        let stack = format!("{rejection:?}");
        self.with_details(
            ApiError::new(StatusCode::BAD_REQUEST, rejection.body_text()),
            stack,
        )
    }

    /// Path segment that cannot be decoded
    pub fn map_path_rejection(&self, rejection: PathRejection) -> ApiError {
        let stack = format!("{rejection:?}");
        self.with_details(
            ApiError::new(StatusCode::BAD_REQUEST, rejection.body_text()),
            stack,
        )
    }

    fn with_details(&self, error: ApiError, stack: String) -> ApiError {
        if self.include_stack {
            error.with_stack(stack)
        } else {
            error
        }
    }
}

impl Default for ErrorMapper {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Fallback for unknown paths and unsupported methods
pub async fn route_not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, ROUTE_NOT_FOUND)
}
