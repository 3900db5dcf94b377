//! JSON error responses for domain failures.
//!
//! Every handler returns [`crate::domain::Error`] on failure. This module
//! chooses the status, echoes the trace id, and hides the message of internal
//! failures from clients after logging it.

use std::borrow::Cow;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result type returned by HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Message clients see in place of an internal failure.
const INTERNAL_MESSAGE: &str = "Internal server error";

/// The error as it may be shown to a client.
///
/// Internal failures lose their message and details but keep the trace id so
/// support can find the logged original.
fn public_view(err: &Error) -> Cow<'_, Error> {
    if err.code() != ErrorCode::InternalError {
        return Cow::Borrowed(err);
    }
    let hidden = Error::internal(INTERNAL_MESSAGE);
    Cow::Owned(match err.trace_id() {
        Some(id) => hidden.with_trace_id(id),
        None => hidden,
    })
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self.code() {
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = public_view(self);
        if matches!(body, Cow::Owned(_)) {
            error!(
                trace_id = self.trace_id().unwrap_or("-"),
                message = self.message(),
                "internal error"
            );
        }

        let mut res = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            res.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        res.json(body.as_ref())
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(
            error = %err,
            status = err.as_response_error().status_code().as_u16(),
            "framework error reached a handler"
        );
        Error::internal(INTERNAL_MESSAGE)
    }
}

#[cfg(test)]
mod tests;
