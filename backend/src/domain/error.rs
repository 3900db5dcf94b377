//! The error every driving port returns.
//!
//! Transport agnostic: [`crate::inbound::http`] decides statuses and what a
//! client may see. The wire shape is
//! `{"code", "message", "traceId"?, "details"?}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::TraceId;

/// Blank input rejected by the fallible builders.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    #[error("error message must not be empty")]
    EmptyMessage,
    #[error("trace identifier must not be empty")]
    EmptyTraceId,
}

macro_rules! error_codes {
    ($( $(#[$doc:meta])* $code:ident => $ctor:ident, $fallback:literal; )*) => {
        /// Failure category, serialised in snake_case.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[non_exhaustive]
        #[serde(rename_all = "snake_case")]
        pub enum ErrorCode {
            $( $(#[$doc])* $code, )*
        }

        impl ErrorCode {
            /// Message used when a caller supplies a blank one.
            fn fallback_message(self) -> &'static str {
                match self {
                    $( Self::$code => $fallback, )*
                }
            }
        }

        impl Error {
            $(
                #[doc = concat!("An [`ErrorCode::", stringify!($code), "`] error.")]
                pub fn $ctor(message: impl Into<String>) -> Self {
                    Self::new(ErrorCode::$code, message)
                }
            )*
        }
    };
}

error_codes! {
    /// Malformed or invalid input.
    InvalidRequest => invalid_request, "Invalid request";
    /// No signed-in user.
    Unauthorized => unauthorized, "Unauthorized";
    /// Signed in, but not allowed to do this.
    Forbidden => forbidden, "Forbidden";
    NotFound => not_found, "Not found";
    MethodNotAllowed => method_not_allowed, "Method not allowed";
    /// Clashes with stored state.
    Conflict => conflict, "Conflict";
    /// The database or generator cannot be reached.
    ServiceUnavailable => service_unavailable, "Service unavailable";
    /// A bug or unexpected state; never shown to clients verbatim.
    InternalError => internal, "Internal server error";
}

/// Code, message, and optional trace id and details.
///
/// The message is never blank. An error built inside a traced request picks
/// up that request's [`TraceId`].
///
/// # Examples
/// ```
/// use backend::domain::{Error, ErrorCode};
/// use serde_json::json;
///
/// let err = Error::not_found("recipe not found").with_details(json!({ "recipeId": "42" }));
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.to_string(), "recipe not found");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[serde(try_from = "ErrorBody", into = "ErrorBody")]
#[error("{message}")]
pub struct Error {
    code: ErrorCode,
    message: String,
    trace_id: Option<String>,
    details: Option<Value>,
}

impl Error {
    /// Build an error; a blank message becomes the code's generic one.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Self::traced(code, code.fallback_message().to_owned())
        } else {
            Self::traced(code, message)
        }
    }

    /// Like [`Error::new`] but refuses a blank message.
    pub fn try_new(
        code: ErrorCode,
        message: impl Into<String>,
    ) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self::traced(code, message))
    }

    fn traced(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Structured context such as the offending field.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    pub fn with_details(self, details: Value) -> Self {
        Self {
            details: Some(details),
            ..self
        }
    }

    /// Replace the trace id; blank values leave the error unchanged.
    pub fn with_trace_id(self, trace_id: impl Into<String>) -> Self {
        let trace_id = trace_id.into();
        if trace_id.trim().is_empty() {
            return self;
        }
        Self {
            trace_id: Some(trace_id),
            ..self
        }
    }

    /// Like [`Error::with_trace_id`] but refuses a blank id.
    pub fn try_with_trace_id(
        self,
        trace_id: impl Into<String>,
    ) -> Result<Self, ErrorValidationError> {
        let trace_id = trace_id.into();
        if trace_id.trim().is_empty() {
            return Err(ErrorValidationError::EmptyTraceId);
        }
        Ok(self.with_trace_id(trace_id))
    }
}

/// Wire form; deserialising goes through the same blank checks.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    code: ErrorCode,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl From<Error> for ErrorBody {
    fn from(err: Error) -> Self {
        let Error {
            code,
            message,
            trace_id,
            details,
        } = err;
        Self {
            code,
            message,
            trace_id,
            details,
        }
    }
}

impl TryFrom<ErrorBody> for Error {
    type Error = ErrorValidationError;

    fn try_from(body: ErrorBody) -> Result<Self, Self::Error> {
        let mut err = Self::try_new(body.code, body.message)?;
        err.trace_id = None;
        err.details = body.details;
        match body.trace_id {
            Some(id) => err.try_with_trace_id(id),
            None => Ok(err),
        }
    }
}
