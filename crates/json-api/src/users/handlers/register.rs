//! Register User Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use shopfront_app::domain::users::{
    data::NewUser,
    records::{Gender, Role, UserRecord},
};

use crate::{extensions::*, users::errors::into_status_error};

/// Register User Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,

    /// `buyer` or `seller`; fixed once registered
    #[salvo(schema(value_type = String))]
    pub role: Role,

    #[salvo(schema(value_type = Option<String>))]
    pub gender: Option<Gender>,

    pub location: Option<String>,
}

impl From<RegisterRequest> for NewUser {
    fn from(request: RegisterRequest) -> Self {
        NewUser {
            email: request.email,
            password: request.password,
            first_name: request.first_name,
            last_name: request.last_name,
            role: request.role,
            gender: request.gender,
            location: request.location,
        }
    }
}

/// Public view of an account.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserResponse {
    pub uuid: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,

    #[salvo(schema(value_type = String))]
    pub role: Role,

    #[salvo(schema(value_type = Option<String>))]
    pub gender: Option<Gender>,

    pub location: Option<String>,

    /// The date and time the account was created
    pub created_at: String,

    pub updated_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        UserResponse {
            uuid: user.uuid.into(),
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            gender: user.gender,
            location: user.location,
            created_at: user.created_at.to_string(),
            updated_at: user.updated_at.to_string(),
        }
    }
}

/// Register User Handler
#[endpoint(
    tags("users"),
    summary = "Register",
    responses(
        (status_code = StatusCode::CREATED, description = "Account created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::CONFLICT, description = "Email already registered"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let user = NewUser::from(json.into_inner())
        .normalized()
        .validate_or_400()?;

    let user = state
        .app
        .users
        .register(user)
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    info!(user_uuid = %user.uuid, role = %user.role, "registered user");

    Ok(Json(user.into()))
}
