//! User API handlers.
//!
//! ```text
//! POST   /api/v1/user/new   {"name":"Acme Ltda","cnpj":"12345678000199"}
//! GET    /api/v1/user/all
//! GET    /api/v1/user/{id}
//! PUT    /api/v1/user/{id}  {"name":"Acme S.A.","cnpj":"12345678000199"}
//! DELETE /api/v1/user/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{Error, User, UserId, UserProfile, UserValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::state::HttpState;

/// Request body for creating or replacing a user.
///
/// Missing fields default to empty strings.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UserRequest {
    #[serde(default)]
    #[schema(example = "Acme Ltda", max_length = 128)]
    pub name: String,
    #[serde(default)]
    #[schema(example = "12345678000199", max_length = 14)]
    pub cnpj: String,
}

impl TryFrom<UserRequest> for UserProfile {
    type Error = UserValidationError;

    fn try_from(value: UserRequest) -> Result<Self, Self::Error> {
        Self::try_from_strings(value.name, value.cnpj)
    }
}

fn map_user_validation_error(err: UserValidationError) -> Error {
    let details = match &err {
        UserValidationError::NameTooLong { max } => {
            json!({ "field": "name", "code": "too_long", "max": max })
        }
        UserValidationError::CnpjTooLong { max } => {
            json!({ "field": "cnpj", "code": "too_long", "max": max })
        }
    };
    Error::invalid_request(err.to_string()).with_details(details)
}

fn parse_profile(payload: web::Json<UserRequest>) -> Result<UserProfile, Error> {
    UserProfile::try_from(payload.into_inner()).map_err(map_user_validation_error)
}

/// Register a user.
#[utoipa::path(
    post,
    path = "/api/v1/user/new",
    request_body = UserRequest,
    responses(
        (status = 201, description = "User created", body = UserSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Record store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/user/new")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserRequest>,
) -> ApiResult<HttpResponse> {
    let profile = parse_profile(payload)?;
    let user = state.users.create_user(profile).await?;
    Ok(HttpResponse::Created().json(user))
}

/// List users in creation order.
#[utoipa::path(
    get,
    path = "/api/v1/user/all",
    responses(
        (status = 200, description = "Users", body = [UserSchema]),
        (status = 503, description = "Record store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/user/all")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    state.users.list_users().await.map(web::Json)
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/api/v1/user/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/user/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<User>> {
    let id = UserId::new(path.into_inner());
    state.users.get_user(id).await.map(web::Json)
}

/// Replace a user's name and CNPJ.
#[utoipa::path(
    put,
    path = "/api/v1/user/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "Updated user", body = UserSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/user/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<UserRequest>,
) -> ApiResult<web::Json<User>> {
    let id = UserId::new(path.into_inner());
    let profile = parse_profile(payload)?;
    state.users.update_user(id, profile).await.map(web::Json)
}

/// Delete a user and, by cascade, all of their transfers.
#[utoipa::path(
    delete,
    path = "/api/v1/user/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "Unknown user", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/user/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = UserId::new(path.into_inner());
    state.users.delete_user(id).await?;
    Ok(HttpResponse::Ok().finish())
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
