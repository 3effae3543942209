//! OpenAPI schema definitions for domain and envelope types.
//!
//! Domain types do not derive `ToSchema`; these wrappers mirror their wire
//! shape in the adapter layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = User)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct UserSchema {
    /// Store-assigned identifier, 24 lowercase hex characters.
    #[schema(example = "507f1f77bcf86cd799439011")]
    id: String,
    #[schema(example = "Ada")]
    name: String,
    #[schema(example = "London")]
    location: String,
    #[schema(example = "Engineer")]
    title: String,
}

/// Outcome label in the `message` field.
#[derive(ToSchema)]
#[schema(as = Outcome)]
pub enum OutcomeSchema {
    /// The request was served.
    #[schema(rename = "success")]
    Success,
    /// The request failed.
    #[schema(rename = "error")]
    Error,
}

/// Envelope wrapping a single user.
#[derive(ToSchema)]
#[schema(as = UserEnvelope)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct UserEnvelopeSchema {
    #[schema(example = 200)]
    status: u16,
    message: OutcomeSchema,
    data: UserSchema,
}

/// Envelope wrapping every stored user.
#[derive(ToSchema)]
#[schema(as = UserListEnvelope)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct UserListEnvelopeSchema {
    #[schema(example = 200)]
    status: u16,
    message: OutcomeSchema,
    data: Vec<UserSchema>,
}

/// Envelope wrapping a plain confirmation message.
#[derive(ToSchema)]
#[schema(as = MessageEnvelope)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct MessageEnvelopeSchema {
    #[schema(example = 200)]
    status: u16,
    message: OutcomeSchema,
    #[schema(example = "user successfully deleted")]
    data: String,
}

/// Envelope describing a failed request.
#[derive(ToSchema)]
#[schema(as = ErrorEnvelope, rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ErrorEnvelopeSchema {
    #[schema(example = 404)]
    status: u16,
    message: OutcomeSchema,
    /// Raw failure text.
    #[schema(example = "User with specified ID not found!")]
    error: String,
    /// Offending fields or identifier, when known.
    details: Option<serde_json::Value>,
    /// Same value as the `trace-id` response header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
}
