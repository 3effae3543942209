//! Request validation helpers shared by the user handlers.
//!
//! Every helper produces an `InvalidRequest` domain error whose details name
//! the offending input, so clients get a 400 envelope before any store call.

use actix_web::HttpRequest;
use actix_web::error::{JsonPayloadError, PathError};
use serde_json::json;

use crate::domain::{DomainError, InvalidUserId, ProfileValidationError, UserId};

/// Validation error codes carried in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    InvalidObjectId,
    EmptyField,
    MalformedBody,
    MalformedPath,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::InvalidObjectId => "invalid_object_id",
            Self::EmptyField => "empty_field",
            Self::MalformedBody => "malformed_body",
            Self::MalformedPath => "malformed_path",
        }
    }
}

/// Name of the path parameter identifying a user.
pub(crate) const USER_ID_FIELD: &str = "userId";

/// Parse the `{userId}` path segment.
pub(crate) fn parse_user_id(raw: &str) -> Result<UserId, DomainError> {
    UserId::parse(raw).map_err(|err| invalid_user_id_error(&err))
}

pub(crate) fn invalid_user_id_error(err: &InvalidUserId) -> DomainError {
    DomainError::invalid_request(err.to_string()).with_details(json!({
        "field": USER_ID_FIELD,
        "value": err.value(),
        "code": ValidationCode::InvalidObjectId.as_str(),
    }))
}

/// Map accumulated blank-field failures, keeping every field name.
pub(crate) fn profile_error(err: &ProfileValidationError) -> DomainError {
    let fields: Vec<&str> = err.fields().iter().map(|field| field.as_str()).collect();
    DomainError::invalid_request(err.to_string()).with_details(json!({
        "fields": fields,
        "code": ValidationCode::EmptyField.as_str(),
    }))
}

/// `JsonConfig` error handler turning body extraction failures into 400 envelopes.
pub(crate) fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    let error = DomainError::invalid_request(err.to_string()).with_details(json!({
        "code": ValidationCode::MalformedBody.as_str(),
        "path": req.path(),
    }));
    error.into()
}

/// `PathConfig` error handler for unparseable path segments.
pub(crate) fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
    let error = DomainError::invalid_request(err.to_string()).with_details(json!({
        "code": ValidationCode::MalformedPath.as_str(),
        "path": req.path(),
    }));
    error.into()
}
