//! HTTP rendering of domain errors.
//!
//! The domain error type stays transport agnostic; this module decides the
//! status code, redacts internal failures, and echoes the trace identifier
//! in both the body and the `trace-id` header.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const INTERNAL_MESSAGE: &str = "Internal server error";

const fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Payload safe to show clients: internal errors lose their message and
/// details but keep the trace id.
fn client_payload(err: &Error) -> Error {
    if err.code() != ErrorCode::InternalError {
        return err.clone();
    }
    error!(message = err.message(), trace_id = err.trace_id(), "internal error");
    let redacted = Error::internal(INTERNAL_MESSAGE);
    match err.trace_id() {
        Some(id) => redacted.with_trace_id(id),
        None => redacted,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(client_payload(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "framework error surfaced through a handler");
        Self::internal(INTERNAL_MESSAGE)
    }
}

#[cfg(test)]
mod tests;
