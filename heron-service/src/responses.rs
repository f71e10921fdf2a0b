//! Standard response dispatch
//!
//! One function per standard outcome — ok, created, no-content,
//! accepted, not-found, bad-request, unauthorized, generic error — each
//! producing exactly one terminal write on a [`ResponseSink`]. Route
//! handlers call these instead of assembling status/body pairs by hand,
//! so every endpoint in a service emits the same shapes.
//!
//! [`BufferedResponse`] is the sink used with axum: it records the
//! dispatched response and converts into an axum
//! [`Response`](axum::response::Response).
//!
//! # Example
//!
//! ```rust
//! use axum::response::IntoResponse;
//! use heron_service::responses::{standard_get_response_with_identifier, BufferedResponse};
//! use serde_json::json;
//!
//! let entity = json!({ "id": 42, "name": "Bob" });
//! let mut reply = BufferedResponse::new();
//! standard_get_response_with_identifier(&mut reply, "id", 42, Some(&entity));
//! let response = reply.into_response();
//! assert_eq!(response.status(), http::StatusCode::OK);
//! ```

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use http::{header, HeaderName, HeaderValue, StatusCode};
use serde::Serialize;
use serde_json::Value;

use crate::error::ErrorResponse;

/// The response-writing contract the dispatch functions drive.
///
/// Implemented by whatever owns the actual transport response:
/// [`BufferedResponse`] for axum, a recording sink in tests. Each
/// dispatch function makes exactly one terminal call
/// ([`ResponseSink::send_json`] or [`ResponseSink::send_empty`]); no
/// further writes follow.
pub trait ResponseSink {
    /// Sets the status code of the pending response.
    fn set_status(&mut self, status: StatusCode);

    /// Sets a response header.
    fn set_header(&mut self, name: &str, value: &str);

    /// Terminal write: sends `body` as JSON.
    fn send_json(&mut self, body: Value);

    /// Terminal write: sends an empty response with `status`.
    fn send_empty(&mut self, status: StatusCode);

    /// Whether the transport already started writing this response.
    fn headers_already_sent(&self) -> bool;
}

/// 200 with the entity when present. Otherwise a 404 whose message
/// names the identifier used for the lookup, e.g.
/// `"Object with id 42 not found"`, with the field and identifier
/// carried in the error body.
pub fn standard_get_response_with_identifier<S, T>(
    sink: &mut S,
    identifier_field: &str,
    identifier: impl Into<Value>,
    entity: Option<&T>,
) where
    S: ResponseSink + ?Sized,
    T: Serialize,
{
    if let Some(entity) = entity {
        send_entity(sink, StatusCode::OK, entity);
        return;
    }

    let identifier = identifier.into();
    let message = format!(
        "Object with {identifier_field} {} not found",
        bare_text(&identifier)
    );
    standard_error_response_with(
        sink,
        StatusCode::NOT_FOUND,
        &ErrorResponse::new(message)
            .with_field(identifier_field)
            .with_item_id(identifier),
    );
}

/// 200 with the entity when present, 404 with the given message
/// otherwise.
pub fn standard_get_response_with_message<S, T>(
    sink: &mut S,
    entity: Option<&T>,
    not_found_message: &str,
) where
    S: ResponseSink + ?Sized,
    T: Serialize,
{
    match entity {
        Some(entity) => send_entity(sink, StatusCode::OK, entity),
        None => standard_not_found_response(sink, not_found_message),
    }
}

/// 404 with a standard error body carrying `error_details`.
pub fn standard_not_found_response<S>(sink: &mut S, error_details: &str)
where
    S: ResponseSink + ?Sized,
{
    standard_error_response(sink, StatusCode::NOT_FOUND, error_details);
}

/// 201 with the created entity and a `Location` header pointing at it.
pub fn standard_post_response<S, T>(sink: &mut S, location: &str, entity: &T)
where
    S: ResponseSink + ?Sized,
    T: Serialize,
{
    sink.set_header(header::LOCATION.as_str(), location);
    send_entity(sink, StatusCode::CREATED, entity);
}

/// 200 with the updated entity.
pub fn standard_put_response<S, T>(sink: &mut S, entity: &T)
where
    S: ResponseSink + ?Sized,
    T: Serialize,
{
    send_entity(sink, StatusCode::OK, entity);
}

/// 204 with no body, for deletes that return nothing.
pub fn standard_delete_response<S>(sink: &mut S)
where
    S: ResponseSink + ?Sized,
{
    sink.send_empty(StatusCode::NO_CONTENT);
}

/// 204 carrying the deleted entity.
pub fn standard_delete_response_with_entity<S, T>(sink: &mut S, entity: &T)
where
    S: ResponseSink + ?Sized,
    T: Serialize,
{
    send_entity(sink, StatusCode::NO_CONTENT, entity);
}

/// 400 with a standard error body carrying `error_details`.
pub fn standard_bad_request_response<S>(sink: &mut S, error_details: &str)
where
    S: ResponseSink + ?Sized,
{
    standard_error_response(sink, StatusCode::BAD_REQUEST, error_details);
}

/// 401 with a standard error body carrying `error_details`.
pub fn standard_unauthorized_response<S>(sink: &mut S, error_details: &str)
where
    S: ResponseSink + ?Sized,
{
    standard_error_response(sink, StatusCode::UNAUTHORIZED, error_details);
}

/// A standard error body with the given status.
///
/// Does not verify that the status is actually an error status.
pub fn standard_error_response<S>(sink: &mut S, status: StatusCode, error_details: &str)
where
    S: ResponseSink + ?Sized,
{
    standard_error_response_with(sink, status, &ErrorResponse::new(error_details));
}

/// Like [`standard_error_response`], with a fully built payload for
/// responses that carry a field, an item identifier, or nested error
/// facets.
pub fn standard_error_response_with<S>(sink: &mut S, status: StatusCode, error: &ErrorResponse)
where
    S: ResponseSink + ?Sized,
{
    sink.set_status(status);
    sink.send_json(error.to_value());
}

/// 202 with the accepted entity, for requests processed asynchronously.
pub fn standard_accepted_response<S, T>(sink: &mut S, entity: &T)
where
    S: ResponseSink + ?Sized,
    T: Serialize,
{
    send_entity(sink, StatusCode::ACCEPTED, entity);
}

fn send_entity<S, T>(sink: &mut S, status: StatusCode, entity: &T)
where
    S: ResponseSink + ?Sized,
    T: Serialize,
{
    match serde_json::to_value(entity) {
        Ok(body) => {
            sink.set_status(status);
            sink.send_json(body);
        }
        Err(err) => {
            tracing::error!(%err, "failed to serialize response entity");
            standard_error_response(
                sink,
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to serialize response entity",
            );
        }
    }
}

/// Strings interpolate bare; everything else uses its JSON rendering.
fn bare_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A [`ResponseSink`] that buffers the dispatched response and converts
/// it into an axum [`Response`].
///
/// The accessors expose what was dispatched, which is also how the
/// dispatch functions are asserted on in tests.
#[derive(Debug, Default)]
pub struct BufferedResponse {
    status: Option<StatusCode>,
    headers: Vec<(String, String)>,
    body: Option<Value>,
    sent: bool,
}

impl BufferedResponse {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The status set so far, if any.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// The first value recorded for the named header, if any.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The JSON body of the terminal write, if one carried a body.
    #[must_use]
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }
}

impl ResponseSink for BufferedResponse {
    fn set_status(&mut self, status: StatusCode) {
        self.status = Some(status);
    }

    fn set_header(&mut self, name: &str, value: &str) {
        self.headers.push((name.to_string(), value.to_string()));
    }

    fn send_json(&mut self, body: Value) {
        self.body = Some(body);
        self.sent = true;
    }

    fn send_empty(&mut self, status: StatusCode) {
        self.status = Some(status);
        self.sent = true;
    }

    fn headers_already_sent(&self) -> bool {
        self.sent
    }
}

impl IntoResponse for BufferedResponse {
    fn into_response(self) -> Response {
        let status = self.status.unwrap_or(StatusCode::OK);
        let mut response = match self.body {
            Some(body) => (status, Json(body)).into_response(),
            None => status.into_response(),
        };
        for (name, value) in &self.headers {
            // Header values that are not legal header text are skipped.
            if let (Ok(name), Ok(value)) = (
                HeaderName::try_from(name.as_str()),
                HeaderValue::from_str(value),
            ) {
                response.headers_mut().insert(name, value);
            }
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entity() -> Value {
        json!({ "name": "Bob", "id": 1 })
    }

    #[test]
    fn test_get_with_identifier_and_present_entity() {
        let mut sink = BufferedResponse::new();
        standard_get_response_with_identifier(&mut sink, "nameField", "Bob", Some(&entity()));

        assert_eq!(sink.status(), Some(StatusCode::OK));
        assert_eq!(sink.body(), Some(&entity()));
    }

    #[test]
    fn test_get_with_identifier_and_missing_entity() {
        let mut sink = BufferedResponse::new();
        standard_get_response_with_identifier(&mut sink, "nameField", "Bob", None::<&Value>);

        assert_eq!(sink.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(
            sink.body(),
            Some(&json!({
                "message": "Object with nameField Bob not found",
                "fieldName": "nameField",
                "itemId": "Bob",
                "errors": [],
            }))
        );
    }

    #[test]
    fn test_get_with_numeric_identifier_interpolates_unquoted() {
        let mut sink = BufferedResponse::new();
        standard_get_response_with_identifier(&mut sink, "id", 42, None::<&Value>);

        let body = sink.body().unwrap();
        assert_eq!(body["message"], json!("Object with id 42 not found"));
        assert_eq!(body["itemId"], json!(42));
    }

    #[test]
    fn test_get_with_message() {
        let mut sink = BufferedResponse::new();
        standard_get_response_with_message(&mut sink, Some(&entity()), "Entity not found");
        assert_eq!(sink.status(), Some(StatusCode::OK));
        assert_eq!(sink.body(), Some(&entity()));

        let mut sink = BufferedResponse::new();
        standard_get_response_with_message(&mut sink, None::<&Value>, "Entity not found");
        assert_eq!(sink.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(
            sink.body(),
            Some(&json!({
                "message": "Entity not found",
                "fieldName": "",
                "itemId": "",
                "errors": [],
            }))
        );
    }

    #[test]
    fn test_not_found_response() {
        let mut sink = BufferedResponse::new();
        standard_not_found_response(&mut sink, "Entity not found");

        assert_eq!(sink.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(sink.body().unwrap()["message"], json!("Entity not found"));
    }

    #[test]
    fn test_post_response_sets_location() {
        let mut sink = BufferedResponse::new();
        standard_post_response(&mut sink, "http://localhost/entity/1", &entity());

        assert_eq!(sink.status(), Some(StatusCode::CREATED));
        assert_eq!(sink.header("location"), Some("http://localhost/entity/1"));
        assert_eq!(sink.body(), Some(&entity()));
    }

    #[test]
    fn test_put_response() {
        let mut sink = BufferedResponse::new();
        standard_put_response(&mut sink, &entity());

        assert_eq!(sink.status(), Some(StatusCode::OK));
        assert_eq!(sink.body(), Some(&entity()));
    }

    #[test]
    fn test_delete_response_has_no_body() {
        let mut sink = BufferedResponse::new();
        standard_delete_response(&mut sink);

        assert_eq!(sink.status(), Some(StatusCode::NO_CONTENT));
        assert!(sink.body().is_none());
        assert!(sink.headers_already_sent());
    }

    #[test]
    fn test_delete_response_with_entity() {
        let mut sink = BufferedResponse::new();
        standard_delete_response_with_entity(&mut sink, &entity());

        assert_eq!(sink.status(), Some(StatusCode::NO_CONTENT));
        assert_eq!(sink.body(), Some(&entity()));
    }

    #[test]
    fn test_bad_request_response() {
        let mut sink = BufferedResponse::new();
        standard_bad_request_response(&mut sink, "Entity corrupt");

        assert_eq!(sink.status(), Some(StatusCode::BAD_REQUEST));
        assert_eq!(
            sink.body(),
            Some(&json!({
                "message": "Entity corrupt",
                "fieldName": "",
                "itemId": "",
                "errors": [],
            }))
        );
    }

    #[test]
    fn test_unauthorized_response() {
        let mut sink = BufferedResponse::new();
        standard_unauthorized_response(&mut sink, "Denied");

        assert_eq!(sink.status(), Some(StatusCode::UNAUTHORIZED));
        assert_eq!(sink.body().unwrap()["message"], json!("Denied"));
    }

    #[test]
    fn test_error_response_uses_caller_status() {
        let mut sink = BufferedResponse::new();
        standard_error_response(&mut sink, StatusCode::INTERNAL_SERVER_ERROR, "Whoops");

        assert_eq!(sink.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(sink.body().unwrap()["message"], json!("Whoops"));
    }

    #[test]
    fn test_error_response_with_full_payload() {
        use crate::error::{ErrorMessage, ErrorResponse};

        let mut sink = BufferedResponse::new();
        standard_error_response_with(
            &mut sink,
            StatusCode::UNPROCESSABLE_ENTITY,
            &ErrorResponse::new("Validation Error")
                .with_field("id")
                .with_item_id(42)
                .with_errors(vec![ErrorMessage::for_field("is required", "name")]),
        );

        assert_eq!(sink.status(), Some(StatusCode::UNPROCESSABLE_ENTITY));
        assert_eq!(
            sink.body(),
            Some(&json!({
                "message": "Validation Error",
                "fieldName": "id",
                "itemId": 42,
                "errors": [{ "message": "is required", "fieldName": "name" }],
            }))
        );
    }

    #[test]
    fn test_accepted_response() {
        let mut sink = BufferedResponse::new();
        standard_accepted_response(&mut sink, &entity());

        assert_eq!(sink.status(), Some(StatusCode::ACCEPTED));
        assert_eq!(sink.body(), Some(&entity()));
    }

    #[test]
    fn test_buffered_response_reports_terminal_write() {
        let mut sink = BufferedResponse::new();
        assert!(!sink.headers_already_sent());

        standard_put_response(&mut sink, &entity());
        assert!(sink.headers_already_sent());
    }

    #[test]
    fn test_buffered_response_into_response() {
        let mut sink = BufferedResponse::new();
        standard_post_response(&mut sink, "/entity/1", &entity());

        let response = sink.into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response
                .headers()
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok()),
            Some("/entity/1")
        );
    }

    #[test]
    fn test_buffered_response_empty_into_response() {
        let mut sink = BufferedResponse::new();
        standard_delete_response(&mut sink);

        let response = sink.into_response();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
