//! HTTP adapter mapping for domain errors.
//!
//! The domain error stays HTTP-agnostic; this impl picks the status code,
//! writes the failure envelope, and echoes the trace identifier as a header.
//! Error text is passed through unredacted.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{debug, error};

use crate::domain::{DomainError, ErrorCode, TRACE_ID_HEADER};
use crate::inbound::http::envelope::Envelope;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, DomainError>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(
                code = self.code().as_str(),
                trace_id = self.trace_id().unwrap_or_default(),
                error = %self,
                "request failed"
            );
        } else {
            debug!(
                code = self.code().as_str(),
                trace_id = self.trace_id().unwrap_or_default(),
                error = %self,
                "request rejected"
            );
        }

        let mut builder = HttpResponse::build(status);
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(Envelope::failure(status, self))
    }
}
