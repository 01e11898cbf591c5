//! Domain-level error type shared by handlers, the delegator, and adapters.
//!
//! The error is transport agnostic. `inbound::http` decides which status a
//! code maps to and how much of the message reaches the client.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Failure category of a domain [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Input failed value object validation or a profile rule.
    InvalidArgument,
    /// The entity, or a unique attribute of it, already exists.
    AlreadyExists,
    /// The requested entity does not exist.
    NotFound,
    /// A multi-step write could not be completed consistently.
    CreationFailed,
    /// An unexpected failure inside an adapter or the domain.
    Internal,
}

impl ErrorCode {
    /// Stable snake_case label used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidArgument => "invalid_argument",
            Self::AlreadyExists => "already_exists",
            Self::NotFound => "not_found",
            Self::CreationFailed => "creation_failed",
            Self::Internal => "internal",
        }
    }

    /// Whether the caller can fix the failure by changing its input.
    pub fn is_caller_fault(self) -> bool {
        matches!(
            self,
            Self::InvalidArgument | Self::AlreadyExists | Self::NotFound
        )
    }
}

/// Message used when a caller supplies a blank one.
const FALLBACK_MESSAGE: &str = "unspecified error";

/// Failure returned by every command and query.
///
/// The message is never blank. `details` carries structured context such as
/// the offending field or, for internal failures, the original `cause`.
///
/// ```
/// use profiles::domain::{Error, ErrorCode};
/// use serde_json::json;
///
/// let err = Error::not_found("mentor not found").with_details(json!({ "key": "42" }));
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert!(err.cause().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl Error {
    /// Create an error, replacing a blank message with a generic one.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            FALLBACK_MESSAGE.to_owned()
        } else {
            message
        };
        Self {
            code,
            message,
            details: None,
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidArgument, message)
    }

    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AlreadyExists, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    pub fn creation_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::CreationFailed, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, message)
    }

    /// Replace the structured details.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Rendered cause of an adapter failure, when one was recorded.
    pub fn cause(&self) -> Option<&str> {
        self.details
            .as_ref()
            .and_then(|details| details.get("cause"))
            .and_then(Value::as_str)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for Error {}
