//! Classification of internal failures into outward HTTP responses
//!
//! Errors reach the HTTP boundary as opaque [`anyhow::Error`] values
//! raised by unrelated subsystems. Classification inspects them in a
//! fixed priority order and always produces a status and message, so the
//! server can build a response for any failure whatsoever.

use http::StatusCode;
use thiserror::Error;

use causeway_kv::{Response, Status};
use causeway_store::MissingError;

/// Application-raised error wrapping an explicit HTTP response status.
///
/// Raise this when a handler wants full control over the outward status
/// and message; classification passes both through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HttpError {
    /// Status the response should carry.
    pub status: StatusCode,
    /// Message exposed to the client.
    pub message: String,
}

impl HttpError {
    /// Create an error with an explicit status and message.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

/// Map an error to an HTTP status code and message.
///
/// Total over its input: `None` (no error) maps to `200 OK`, recognized
/// error shapes map through fixed tables, and anything else degrades to
/// 500 rather than fail. The match order is deliberate: an explicit
/// [`HttpError`] always wins over any structural reinterpretation of the
/// same value.
#[must_use]
pub fn error_as_http_status(err: Option<&anyhow::Error>) -> (StatusCode, String) {
    let Some(err) = err else {
        return (StatusCode::OK, "OK".to_owned());
    };
    if let Some(http) = err.downcast_ref::<HttpError>() {
        return (http.status, http.message.clone());
    }
    if let Some(response) = err.downcast_ref::<Response>() {
        return match response.status {
            Status::KeyNotFound => (StatusCode::NOT_FOUND, "missing".to_owned()),
            Status::KeyExists => (StatusCode::CONFLICT, "Conflict".to_owned()),
            Status::TooBig => (StatusCode::PAYLOAD_TOO_LARGE, "Too Large".to_owned()),
            status => (StatusCode::BAD_GATEWAY, format!("KV status {status}")),
        };
    }
    if err.downcast_ref::<MissingError>().is_some() {
        return (StatusCode::NOT_FOUND, "missing".to_owned());
    }
    tracing::warn!(error = ?err, "could not interpret error type, returning 500");
    (StatusCode::INTERNAL_SERVER_ERROR, format!("Internal error: {err}"))
}

/// The legacy wire error string for an HTTP status.
///
/// Older document-API clients parse this string instead of (or alongside)
/// the numeric status, so the values are contractual and intentionally
/// distinct from the messages produced by [`error_as_http_status`] (404
/// pairs the message `"missing"` with the name `"not_found"`). Statuses
/// outside the table fall back to the decimal form of the code.
#[must_use]
pub fn error_name(status: StatusCode) -> String {
    match status.as_u16() {
        400 => "bad_request".to_owned(),
        401 => "unauthorized".to_owned(),
        403 => "forbidden".to_owned(),
        404 => "not_found".to_owned(),
        406 => "not_acceptable".to_owned(),
        409 => "conflict".to_owned(),
        412 => "file_exists".to_owned(),
        415 => "bad_content_type".to_owned(),
        code => code.to_string(),
    }
}

/// Whether an error is a backend or bucket "document not found".
///
/// Deliberately excludes [`HttpError`]: a caller-classified 404 carries
/// caller-defined semantics and is never auto-detected as a missing
/// document.
#[must_use]
pub fn is_doc_not_found(err: &anyhow::Error) -> bool {
    if let Some(response) = err.downcast_ref::<Response>() {
        return response.status == Status::KeyNotFound;
    }
    err.downcast_ref::<MissingError>().is_some()
}

/// Legacy error payload: `{"error": <name>, "reason": <message>}`.
///
/// The server layer serializes this as the body of error responses; this
/// crate only defines the value.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ErrorBody {
    /// Symbolic error name from [`error_name`].
    pub error: String,
    /// Human-readable message from classification.
    pub reason: String,
}

impl ErrorBody {
    /// Build the payload for a classified status and message pair.
    #[must_use]
    pub fn for_status(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            error: error_name(status),
            reason: message.into(),
        }
    }
}
