//! # heron-service
//!
//! Standardized pagination models and uniform HTTP success/error
//! responses for axum-based API services.
//!
//! ## Features
//!
//! - **Pagination model**: `Page` and `Sort` value objects with
//!   validated factories, derived totals, and zero- or one-based page
//!   origins
//! - **Standard responses**: one dispatch function per standard outcome
//!   (ok, created, no-content, accepted, not-found, bad-request,
//!   unauthorized, generic error) over a pluggable response sink
//! - **Typed errors**: status-carrying `StandardError` values with a
//!   stable discriminator and inspectable cause chains
//! - **Terminal error handling**: `FallbackHandler` maps any error that
//!   escapes request handling to a deterministic response, with an
//!   injectable logging hook
//! - **Uniform wire shapes**: every error body is the same
//!   `{message, fieldName, itemId, errors}` JSON mapping
//!
//! ## Example
//!
//! ```rust,no_run
//! use heron_service::prelude::*;
//!
//! async fn get_user(Path(id): Path<u64>) -> Response {
//!     let user = find_user(id);
//!     let mut reply = BufferedResponse::new();
//!     standard_get_response_with_identifier(&mut reply, "id", id, user.as_ref());
//!     reply.into_response()
//! }
//!
//! async fn list_users() -> Result<Page<serde_json::Value>, StandardError> {
//!     let users = vec![];
//!     Page::of(0, 20, 0, users)
//!         .map_err(|err| StandardError::new(err.to_string(), StatusCode::INTERNAL_SERVER_ERROR))
//! }
//! # fn find_user(_id: u64) -> Option<serde_json::Value> { None }
//! ```

pub mod error;
pub mod middleware;
pub mod page;
pub mod preconditions;
pub mod responses;
pub mod sort;

/// Common imports for route handlers and service setup.
pub mod prelude {
    pub use crate::error::{
        error_trace, CodedErrorMessage, ErrorMessage, ErrorResponse, StandardError,
        StandardErrorKind,
    };
    pub use crate::middleware::{
        fallback_not_found, handle_service_error, tracing_error_logger, ErrorLogger,
        FallbackHandler,
    };
    pub use crate::page::{Page, PageOrigin};
    pub use crate::preconditions::{
        check_argument, check_argument_defined, check_argument_defined_with,
        check_argument_not_blank, check_argument_not_blank_with, check_argument_with,
        check_positive, check_positive_or_zero, check_positive_or_zero_with, check_positive_with,
        check_state, check_state_with, PreconditionError,
    };
    pub use crate::responses::{
        standard_accepted_response, standard_bad_request_response, standard_delete_response,
        standard_delete_response_with_entity, standard_error_response,
        standard_error_response_with, standard_get_response_with_identifier,
        standard_get_response_with_message, standard_not_found_response, standard_post_response,
        standard_put_response, standard_unauthorized_response, BufferedResponse, ResponseSink,
    };
    pub use crate::sort::Sort;

    pub use axum::{
        extract::{Path, Query, State},
        http::{HeaderMap, HeaderValue, StatusCode},
        response::{IntoResponse, Json, Response},
    };
    pub use serde::{Deserialize, Serialize};
}
