//! Shared HTTP-facing error layer for the causeway gateway
//!
//! Reconciles failures from the cache backend, the in-process bucket, and
//! application code into one outward vocabulary: an HTTP status code, a
//! human-readable message, and the legacy error string that older
//! document-API clients parse instead of the numeric status. The server
//! layer turns these into actual responses, keeping classification
//! decoupled from any HTTP framework.

pub mod error;

pub use error::{ErrorBody, HttpError, error_as_http_status, error_name, is_doc_not_found};
