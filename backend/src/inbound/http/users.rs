//! User CRUD handlers.
//!
//! ```text
//! GET    /user
//! POST   /user          {"name":"Ada","location":"London","title":"Engineer"}
//! GET    /user/{userId}
//! PUT    /user/{userId} {"name":"Ada","location":"Paris","title":"Engineer"}
//! DELETE /user/{userId}
//! ```
//!
//! Every response body is an [`Envelope`]. Identifiers and bodies are
//! validated before the directory is called.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::{ProfileValidationError, UserProfile};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::schemas::{
    ErrorEnvelopeSchema, MessageEnvelopeSchema, UserEnvelopeSchema, UserListEnvelopeSchema,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_user_id, profile_error};

/// Confirmation returned in `data` by a successful delete.
pub const USER_DELETED: &str = "user successfully deleted";

/// Body accepted by create and update.
///
/// Missing fields deserialise as `None` and are reported together with blank
/// ones. Any `id` in the body is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UserRequest {
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Ada")]
    pub name: Option<String>,
    /// Free-text location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "London")]
    pub location: Option<String>,
    /// Job title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Engineer")]
    pub title: Option<String>,
}

impl TryFrom<UserRequest> for UserProfile {
    type Error = ProfileValidationError;

    fn try_from(value: UserRequest) -> Result<Self, Self::Error> {
        Self::new(
            value.name.unwrap_or_default(),
            value.location.unwrap_or_default(),
            value.title.unwrap_or_default(),
        )
    }
}

fn into_profile(payload: web::Json<UserRequest>) -> ApiResult<UserProfile> {
    UserProfile::try_from(payload.into_inner()).map_err(|err| profile_error(&err))
}

/// List every stored user.
#[utoipa::path(
    get,
    path = "/user",
    responses(
        (status = 200, description = "All users in store order", body = UserListEnvelopeSchema),
        (status = 500, description = "User store failure", body = ErrorEnvelopeSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/user")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let users = state.users.list_users().await?;
    Ok(Envelope::success(StatusCode::OK, users).into_response())
}

/// Create a user and return it as stored.
#[utoipa::path(
    post,
    path = "/user",
    request_body = UserRequest,
    responses(
        (status = 201, description = "User created", body = UserEnvelopeSchema),
        (status = 400, description = "Malformed body or blank field", body = ErrorEnvelopeSchema),
        (status = 500, description = "User store failure", body = ErrorEnvelopeSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/user")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserRequest>,
) -> ApiResult<HttpResponse> {
    let profile = into_profile(payload)?;
    let user = state.users.create_user(profile).await?;
    Ok(Envelope::success(StatusCode::CREATED, user).into_response())
}

/// Fetch one user by identifier.
#[utoipa::path(
    get,
    path = "/user/{userId}",
    params(("userId" = String, Path, description = "24 character hex identifier")),
    responses(
        (status = 200, description = "The user", body = UserEnvelopeSchema),
        (status = 400, description = "Malformed identifier", body = ErrorEnvelopeSchema),
        (status = 404, description = "No such user", body = ErrorEnvelopeSchema),
        (status = 500, description = "User store failure", body = ErrorEnvelopeSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/user/{userId}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&path)?;
    let user = state.users.fetch_user(&id).await?;
    Ok(Envelope::success(StatusCode::OK, user).into_response())
}

/// Replace a user's name, location, and title.
#[utoipa::path(
    put,
    path = "/user/{userId}",
    params(("userId" = String, Path, description = "24 character hex identifier")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "Updated user", body = UserEnvelopeSchema),
        (status = 400, description = "Malformed identifier, body, or blank field", body = ErrorEnvelopeSchema),
        (status = 404, description = "No such user", body = ErrorEnvelopeSchema),
        (status = 500, description = "User store failure", body = ErrorEnvelopeSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/user/{userId}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UserRequest>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&path)?;
    let profile = into_profile(payload)?;
    let user = state.users.update_user(&id, profile).await?;
    Ok(Envelope::success(StatusCode::OK, user).into_response())
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/user/{userId}",
    params(("userId" = String, Path, description = "24 character hex identifier")),
    responses(
        (status = 200, description = "User deleted", body = MessageEnvelopeSchema),
        (status = 400, description = "Malformed identifier", body = ErrorEnvelopeSchema),
        (status = 404, description = "No such user", body = ErrorEnvelopeSchema),
        (status = 500, description = "User store failure", body = ErrorEnvelopeSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/user/{userId}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&path)?;
    state.users.delete_user(&id).await?;
    Ok(Envelope::success(StatusCode::OK, USER_DELETED).into_response())
}

#[cfg(test)]
mod tests;
