//! Uniform JSON body for every `/user` response.
//!
//! Success carries the payload under `data`; failure carries the raw error
//! text under `error` plus optional `details` and the request's `traceId`.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::DomainError;

/// Outcome label mirrored in the `message` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The request was served.
    Success,
    /// The request failed; see `error`.
    Error,
}

/// Response envelope.
///
/// # Examples
/// ```
/// use actix_web::http::StatusCode;
/// use user_directory::inbound::http::envelope::Envelope;
///
/// let body = serde_json::to_value(Envelope::success(StatusCode::OK, "done")).expect("json");
/// assert_eq!(body["message"], "success");
/// assert_eq!(body["data"], "done");
/// assert!(body.get("error").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    /// HTTP status code, mirrored from the response line.
    pub status: u16,
    /// `success` or `error`.
    pub message: Outcome,
    /// Payload; present on success only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Raw failure text; present on failure only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Structured failure context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// Request trace identifier; present on failure only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

/// Envelope of a failed request; `data` is always absent.
pub type ErrorEnvelope = Envelope<()>;

impl<T> Envelope<T> {
    /// Wrap `data` in a success envelope.
    #[must_use]
    pub fn success(status: StatusCode, data: T) -> Self {
        Self {
            status: status.as_u16(),
            message: Outcome::Success,
            data: Some(data),
            error: None,
            details: None,
            trace_id: None,
        }
    }
}

impl ErrorEnvelope {
    /// Describe `error` in a failure envelope.
    #[must_use]
    pub fn failure(status: StatusCode, error: &DomainError) -> Self {
        Self {
            status: status.as_u16(),
            message: Outcome::Error,
            data: None,
            error: Some(error.message().to_owned()),
            details: error.details().cloned(),
            trace_id: error.trace_id().map(str::to_owned),
        }
    }
}

impl<T: Serialize> Envelope<T> {
    /// Render as an HTTP response whose status matches the body.
    #[must_use]
    pub fn into_response(self) -> HttpResponse {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        HttpResponse::build(status).json(self)
    }
}
