//! HTTP mapping for domain errors.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use tracing::error;

use crate::domain::{DomainError, ErrorCode};

/// Handler result carrying a [`DomainError`] on failure.
pub type ApiResult<T> = Result<T, DomainError>;

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        match self.code() {
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ErrorCode::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Internal messages stay in the logs; clients get a generic payload
        // with the trace id for correlation.
        let body = if self.code() == ErrorCode::InternalError {
            error!(
                trace_id = self.trace_id().unwrap_or("-"),
                message = self.message(),
                "internal error"
            );
            let mut redacted = DomainError::internal("internal error");
            if let Some(id) = self.trace_id() {
                redacted = redacted.with_trace_id(id);
            }
            redacted
        } else {
            self.clone()
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
