//! Terminal error handling
//!
//! The last stage of request handling: whatever error escapes a route
//! handler is mapped here to exactly one deterministic outcome. The
//! policy is a strict linear sequence, run at most once per error:
//!
//! 1. an unauthenticated caller gets a 401 immediately, before logging
//!    and before the headers-sent check, so failed logins never show up
//!    as server errors;
//! 2. the logging hook, if installed, is invoked exactly once;
//! 3. if the transport already started responding, the error is handed
//!    to the continuation instead of writing again;
//! 4. otherwise a [`StandardError`] responds with its own status and
//!    anything else becomes a 500.
//!
//! # Example
//!
//! ```rust
//! use heron_service::middleware::{tracing_error_logger, FallbackHandler};
//! use heron_service::responses::BufferedResponse;
//!
//! let handler = FallbackHandler::new().with_logger(tracing_error_logger);
//!
//! let err = std::io::Error::other("boom");
//! let mut reply = BufferedResponse::new();
//! handler.handle(&err, "GET", "/entity/1", &mut reply, |_| {});
//! ```

use std::error::Error as StdError;

use axum::response::{IntoResponse, Response};
use http::StatusCode;
use tower::BoxError;

use crate::error::{error_trace, StandardError, StandardErrorKind};
use crate::responses::{
    standard_error_response, standard_not_found_response, standard_unauthorized_response,
    BufferedResponse, ResponseSink,
};

/// Logging hook invoked with the formatted request-context message and
/// the error's diagnostic trace. Injected once, owned by the host, and
/// treated as opaque; its return value is ignored.
pub type ErrorLogger = dyn Fn(&str, &str) + Send + Sync;

/// The terminal error-to-response policy.
///
/// Construct one per service (typically at router setup), optionally
/// install a logging hook, and invoke [`FallbackHandler::handle`] with
/// every error that escapes request handling.
#[derive(Default)]
pub struct FallbackHandler {
    logger: Option<Box<ErrorLogger>>,
}

impl FallbackHandler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the logging hook.
    #[must_use]
    pub fn with_logger(mut self, logger: impl Fn(&str, &str) + Send + Sync + 'static) -> Self {
        self.logger = Some(Box::new(logger));
        self
    }

    /// Maps `err` to exactly one outcome: a 401 for unauthenticated
    /// callers, a deferral to `next` when the transport already started
    /// responding, or a standard error body written to `sink`.
    ///
    /// `method` and `path` only feed the logging hook's message; the
    /// error's own message is what reaches the response body. The raw
    /// error value never does.
    pub fn handle<S, F>(
        &self,
        err: &(dyn StdError + 'static),
        method: &str,
        path: &str,
        sink: &mut S,
        next: F,
    ) where
        S: ResponseSink + ?Sized,
        F: FnOnce(&(dyn StdError + 'static)),
    {
        let standard = err.downcast_ref::<StandardError>();

        // Unauthenticated access is resolved before logging and before
        // the headers-sent check; it is not a server error.
        if let Some(standard) = standard {
            if standard.kind() == StandardErrorKind::NotLoggedIn {
                standard_unauthorized_response(sink, standard.message());
                return;
            }
        }

        if let Some(logger) = &self.logger {
            logger(
                &format!("Error while processing path {method} {path}: {err}"),
                &error_trace(err),
            );
        }

        if sink.headers_already_sent() {
            next(err);
            return;
        }

        match standard {
            Some(standard) if standard.kind() == StandardErrorKind::StandardResponse => {
                standard_error_response(sink, standard.status_code(), standard.message());
            }
            _ => {
                standard_error_response(sink, StatusCode::INTERNAL_SERVER_ERROR, &err.to_string());
            }
        }
    }
}

/// Ready-made [`ErrorLogger`] emitting a `tracing` error event.
pub fn tracing_error_logger(message: &str, trace: &str) {
    tracing::error!(trace, "{message}");
}

/// Maps boxed transport errors through the same status policy as
/// [`FallbackHandler`], for use with
/// `axum::error_handling::HandleErrorLayer`.
pub async fn handle_service_error(err: BoxError) -> Response {
    let mut sink = BufferedResponse::new();
    match err.downcast_ref::<StandardError>() {
        Some(standard) if standard.kind() == StandardErrorKind::NotLoggedIn => {
            standard_unauthorized_response(&mut sink, standard.message());
        }
        Some(standard) => {
            standard_error_response(&mut sink, standard.status_code(), standard.message());
        }
        None => {
            tracing::error!(%err, "unhandled service error");
            standard_error_response(&mut sink, StatusCode::INTERNAL_SERVER_ERROR, &err.to_string());
        }
    }
    sink.into_response()
}

/// Catch-all handler for unmatched routes, for `Router::fallback`.
pub async fn fallback_not_found() -> Response {
    let mut sink = BufferedResponse::new();
    standard_not_found_response(&mut sink, "Page not found");
    sink.into_response()
}
