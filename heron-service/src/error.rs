//! Error types, payload shapes, and HTTP conversion
//!
//! Two concerns live here: the typed error that application code throws
//! when it wants a specific HTTP outcome ([`StandardError`]), and the
//! wire payloads every error response is built from ([`ErrorResponse`],
//! [`ErrorMessage`], and the older [`CodedErrorMessage`] shape).
//!
//! Dispatch decisions key off [`StandardError::kind`], a stable
//! discriminator, rather than off concrete error types: errors routinely
//! cross `dyn Error` boundaries (boxing, tower layers), where type
//! identity is the wrong tool for telling the not-logged-in
//! specialization apart from the general case.
//!
//! # Example
//!
//! ```rust
//! use http::StatusCode;
//! use heron_service::error::StandardError;
//!
//! fn publish(draft_ready: bool) -> Result<(), StandardError> {
//!     if !draft_ready {
//!         return Err(StandardError::new("Draft is not ready", StatusCode::CONFLICT));
//!     }
//!     Ok(())
//! }
//!
//! assert_eq!(publish(false).unwrap_err().status_code(), StatusCode::CONFLICT);
//! ```

use std::error::Error as StdError;
use std::fmt;

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const NOT_LOGGED_IN_MESSAGE: &str = "User is not logged in";

type BoxedCause = Box<dyn StdError + Send + Sync + 'static>;

/// Discriminator for [`StandardError`] dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardErrorKind {
    /// An intentional, status-carrying failure raised by application
    /// logic.
    StandardResponse,
    /// The caller is not authenticated. Always carries status 401.
    NotLoggedIn,
}

impl fmt::Display for StandardErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StandardResponse => write!(f, "standard_response"),
            Self::NotLoggedIn => write!(f, "not_logged_in"),
        }
    }
}

/// An HTTP-status-carrying error raised by application logic.
///
/// Carries the message that will surface in the response body, the
/// status to respond with, and optionally the underlying cause. The raw
/// cause never reaches a response body; it is exposed through
/// `Error::source` and [`StandardError::trace`] for diagnostics only.
#[derive(Debug)]
pub struct StandardError {
    kind: StandardErrorKind,
    message: String,
    status_code: StatusCode,
    source: Option<BoxedCause>,
}

impl StandardError {
    /// A general-purpose response error with an arbitrary status.
    pub fn new(message: impl Into<String>, status_code: StatusCode) -> Self {
        Self {
            kind: StandardErrorKind::StandardResponse,
            message: message.into(),
            status_code,
            source: None,
        }
    }

    /// The unauthenticated-caller specialization, with its default
    /// message.
    #[must_use]
    pub fn not_logged_in() -> Self {
        Self::not_logged_in_with(NOT_LOGGED_IN_MESSAGE)
    }

    /// The unauthenticated-caller specialization with a custom message.
    /// The status is always 401.
    pub fn not_logged_in_with(message: impl Into<String>) -> Self {
        Self {
            kind: StandardErrorKind::NotLoggedIn,
            message: message.into(),
            status_code: StatusCode::UNAUTHORIZED,
            source: None,
        }
    }

    /// Attaches the underlying cause. The cause's chain is surfaced
    /// through `Error::source` and [`StandardError::trace`].
    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<BoxedCause>) -> Self {
        self.source = Some(cause.into());
        self
    }

    /// The dispatch discriminator.
    #[must_use]
    pub const fn kind(&self) -> StandardErrorKind {
        self.kind
    }

    /// The message surfaced in the response body.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The status this error maps to.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        self.status_code
    }

    /// Renders the full diagnostic chain, one `Caused by:` line per
    /// cause.
    #[must_use]
    pub fn trace(&self) -> String {
        error_trace(self)
    }
}

impl fmt::Display for StandardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for StandardError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|cause| cause.as_ref() as &(dyn StdError + 'static))
    }
}

impl IntoResponse for StandardError {
    fn into_response(self) -> Response {
        tracing::error!(
            kind = %self.kind,
            status = self.status_code.as_u16(),
            cause = ?self.source,
            "standard response error: {}",
            self.message
        );

        let status = self.status_code;
        (status, Json(ErrorResponse::new(self.message).to_value())).into_response()
    }
}

/// Renders an error and its cause chain as a diagnostic trace.
#[must_use]
pub fn error_trace(err: &dyn StdError) -> String {
    let mut trace = err.to_string();
    let mut current = err.source();
    while let Some(cause) = current {
        trace.push_str("\nCaused by: ");
        trace.push_str(&cause.to_string());
        current = cause.source();
    }
    trace
}

/// One discrete error facet, e.g. a single failed validation rule,
/// optionally tied to the field it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorMessage {
    pub message: String,
    #[serde(default)]
    pub field_name: String,
}

impl ErrorMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field_name: String::new(),
        }
    }

    pub fn for_field(message: impl Into<String>, field_name: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field_name: field_name.into(),
        }
    }

    fn to_value(&self) -> Value {
        json!({
            "message": self.message,
            "fieldName": self.field_name,
        })
    }
}

/// The standardized error response body.
///
/// Carries the detail message; optionally the field and the identifier
/// of the item causing the error; and optionally a list of
/// [`ErrorMessage`] facets for multi-part failures such as validation.
/// Built once, converted once via [`ErrorResponse::to_value`], never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub message: String,
    #[serde(default)]
    pub field_name: String,
    #[serde(default = "empty_item_id")]
    pub item_id: Value,
    #[serde(default)]
    pub errors: Vec<ErrorMessage>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field_name: String::new(),
            item_id: empty_item_id(),
            errors: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = field_name.into();
        self
    }

    #[must_use]
    pub fn with_item_id(mut self, item_id: impl Into<Value>) -> Self {
        self.item_id = item_id.into();
        self
    }

    #[must_use]
    pub fn with_errors(mut self, errors: Vec<ErrorMessage>) -> Self {
        self.errors = errors;
        self
    }

    /// The canonical wire mapping:
    /// `{message, fieldName, itemId, errors: [{message, fieldName}]}`
    /// with empty-string defaults and an empty error list when unset.
    #[must_use]
    pub fn to_value(&self) -> Value {
        json!({
            "message": self.message,
            "fieldName": self.field_name,
            "itemId": self.item_id,
            "errors": self.errors.iter().map(|e| e.to_value()).collect::<Vec<_>>(),
        })
    }
}

/// The older standalone error payload, which carries the HTTP status
/// code inside the body.
///
/// Nothing in this crate emits it; it is kept because deployed
/// consumers still parse `{message, code, fieldName, itemId}` bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodedErrorMessage {
    pub message: String,
    pub code: u16,
    #[serde(default)]
    pub field_name: String,
    #[serde(default = "empty_item_id")]
    pub item_id: Value,
}

impl CodedErrorMessage {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code,
            field_name: String::new(),
            item_id: empty_item_id(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = field_name.into();
        self
    }

    #[must_use]
    pub fn with_item_id(mut self, item_id: impl Into<Value>) -> Self {
        self.item_id = item_id.into();
        self
    }

    /// The wire mapping: `{message, code, fieldName, itemId}`.
    #[must_use]
    pub fn to_value(&self) -> Value {
        json!({
            "message": self.message,
            "code": self.code,
            "fieldName": self.field_name,
            "itemId": self.item_id,
        })
    }
}

fn empty_item_id() -> Value {
    Value::String(String::new())
}
