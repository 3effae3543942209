//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the user CRUD paths, the health probes, and the
//! envelope schemas from [`crate::inbound::http::schemas`]. Swagger UI serves
//! it in debug builds and `openapi-dump` prints it for external tooling.

use crate::inbound::http::schemas::{
    ErrorEnvelopeSchema, MessageEnvelopeSchema, OutcomeSchema, UserEnvelopeSchema,
    UserListEnvelopeSchema, UserSchema,
};
use crate::inbound::http::users::UserRequest;
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User directory API",
        description = "CRUD operations over user records, plus health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserSchema,
        UserRequest,
        OutcomeSchema,
        UserEnvelopeSchema,
        UserListEnvelopeSchema,
        MessageEnvelopeSchema,
        ErrorEnvelopeSchema
    )),
    tags(
        (name = "users", description = "User record CRUD"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
