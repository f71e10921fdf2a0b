//! Argument and state precondition checks
//!
//! Fail-fast validation helpers used by the factory functions in this
//! crate. Each check either passes or returns a classified
//! [`PreconditionError`] that the caller propagates with `?`; nothing in
//! this crate catches these errors internally, since a failed check
//! means the caller passed structurally invalid input.
//!
//! Every check comes in two flavors: `check_x(..)`, which fails with a
//! default message, and `check_x_with(.., message)`, which fails with
//! the supplied message. The two are distinct on purpose: an empty
//! string passed to a `_with` variant is a valid custom message and does
//! not fall back to the default.
//!
//! # Example
//!
//! ```rust
//! use heron_service::preconditions::{check_positive, PreconditionError};
//!
//! fn reserve(slots: i64) -> Result<(), PreconditionError> {
//!     check_positive(slots)?;
//!     Ok(())
//! }
//!
//! assert!(reserve(5).is_ok());
//! assert!(reserve(0).is_err());
//! ```

use thiserror::Error;

/// A failed precondition check.
///
/// The variant classifies the failure: [`State`](PreconditionError::State)
/// for values violating a numeric or boolean invariant,
/// [`Argument`](PreconditionError::Argument) for structurally invalid
/// arguments (absent or blank). The display form is the class marker,
/// followed by `": <detail>"` when a detail message is present.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionError {
    /// A value violated a state invariant.
    #[error("invalid state{}", render_detail(.0))]
    State(Option<String>),
    /// A structurally invalid argument was passed.
    #[error("invalid argument{}", render_detail(.0))]
    Argument(Option<String>),
}

impl PreconditionError {
    /// The detail message, if one was supplied.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::State(detail) | Self::Argument(detail) => detail.as_deref(),
        }
    }
}

fn render_detail(detail: &Option<String>) -> String {
    match detail {
        Some(detail) => format!(": {detail}"),
        None => String::new(),
    }
}

/// Fails with a state violation when `expression` is false.
pub fn check_state(expression: bool) -> Result<(), PreconditionError> {
    if expression {
        Ok(())
    } else {
        Err(PreconditionError::State(None))
    }
}

/// Like [`check_state`], failing with the supplied message.
pub fn check_state_with(
    expression: bool,
    message: impl Into<String>,
) -> Result<(), PreconditionError> {
    if expression {
        Ok(())
    } else {
        Err(PreconditionError::State(Some(message.into())))
    }
}

/// Fails with a state violation when `value` is negative. Zero passes.
pub fn check_positive_or_zero(value: i64) -> Result<(), PreconditionError> {
    check_state_with(value >= 0, "value must be positive or zero")
}

/// Like [`check_positive_or_zero`], failing with the supplied message.
pub fn check_positive_or_zero_with(
    value: i64,
    message: impl Into<String>,
) -> Result<(), PreconditionError> {
    check_state_with(value >= 0, message)
}

/// Fails with a state violation when `value` is zero or negative.
pub fn check_positive(value: i64) -> Result<(), PreconditionError> {
    check_state_with(value > 0, "value must be a positive number")
}

/// Like [`check_positive`], failing with the supplied message.
pub fn check_positive_with(
    value: i64,
    message: impl Into<String>,
) -> Result<(), PreconditionError> {
    check_state_with(value > 0, message)
}

/// Fails with an argument violation when `expression` is false.
pub fn check_argument(expression: bool) -> Result<(), PreconditionError> {
    if expression {
        Ok(())
    } else {
        Err(PreconditionError::Argument(None))
    }
}

/// Like [`check_argument`], failing with the supplied message.
pub fn check_argument_with(
    expression: bool,
    message: impl Into<String>,
) -> Result<(), PreconditionError> {
    if expression {
        Ok(())
    } else {
        Err(PreconditionError::Argument(Some(message.into())))
    }
}

/// Fails with an argument violation when `reference` is absent.
pub fn check_argument_defined<T>(reference: Option<&T>) -> Result<(), PreconditionError> {
    check_argument(reference.is_some())
}

/// Like [`check_argument_defined`], failing with the supplied message.
pub fn check_argument_defined_with<T>(
    reference: Option<&T>,
    message: impl Into<String>,
) -> Result<(), PreconditionError> {
    check_argument_with(reference.is_some(), message)
}

/// Fails with an argument violation when the string is absent or empty.
///
/// No trimming is applied: only the exact empty string counts as blank,
/// so `" "` passes.
pub fn check_argument_not_blank(value: Option<&str>) -> Result<(), PreconditionError> {
    match value {
        Some(s) => check_argument(!s.is_empty()),
        None => Err(PreconditionError::Argument(None)),
    }
}

/// Like [`check_argument_not_blank`], failing with the supplied message.
pub fn check_argument_not_blank_with(
    value: Option<&str>,
    message: impl Into<String>,
) -> Result<(), PreconditionError> {
    match value {
        Some(s) => check_argument_with(!s.is_empty(), message),
        None => Err(PreconditionError::Argument(Some(message.into()))),
    }
}
