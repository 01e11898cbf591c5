//! HTTP adapter mapping for domain errors.
//!
//! Keeps the domain error type HTTP-agnostic while letting Actix handlers
//! turn domain failures into consistent JSON responses and status codes.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Deserialize;

use crate::domain::{Error, ErrorCode};

/// How much of an internal failure reaches the client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorExposure {
    /// Internal failures are reduced to a generic message.
    #[default]
    Redacted,
    /// Internal failures keep their message and details.
    Debug,
}

pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidArgument => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::AlreadyExists => StatusCode::CONFLICT,
        ErrorCode::CreationFailed | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact(error: &Error, exposure: ErrorExposure) -> Error {
    if !error.code().is_caller_fault() && exposure == ErrorExposure::Redacted {
        Error::new(error.code(), "Internal server error")
    } else {
        error.clone()
    }
}

/// Render `error` as a JSON response under the given exposure policy.
pub fn error_response(error: &Error, exposure: ErrorExposure) -> HttpResponse {
    HttpResponse::build(status_for(error.code())).json(redact(error, exposure))
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        error_response(self, ErrorExposure::Redacted)
    }
}
