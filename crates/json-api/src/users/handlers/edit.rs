//! Edit Profile Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::{Span, field, info};

use shopfront_app::domain::users::{data::ProfileUpdate, records::Gender};

use crate::{
    extensions::*,
    users::{errors::into_status_error, register::UserResponse},
};

/// Edit Profile Request
///
/// Omitting `password` keeps the current one.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EditProfileRequest {
    pub password: Option<String>,
    pub first_name: String,
    pub last_name: String,

    #[salvo(schema(value_type = Option<String>))]
    pub gender: Option<Gender>,

    pub location: Option<String>,
}

impl From<EditProfileRequest> for ProfileUpdate {
    fn from(request: EditProfileRequest) -> Self {
        ProfileUpdate {
            password: request.password,
            first_name: request.first_name,
            last_name: request.last_name,
            gender: request.gender,
            location: request.location,
        }
    }
}

/// Edit Profile Handler
#[endpoint(
    tags("users"),
    summary = "Edit Profile",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Profile updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "users.edit",
    skip(json, depot),
    fields(user_uuid = field::Empty, password_changed = field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<EditProfileRequest>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let user = depot.identity_or_401()?.user;
    let update = ProfileUpdate::from(json.into_inner())
        .normalized()
        .validate_or_400()?;

    let span = Span::current();

    span.record("user_uuid", field::display(user));
    span.record("password_changed", update.password.is_some());

    let updated = state
        .app
        .users
        .update_profile(user, update)
        .await
        .map_err(into_status_error)?;

    info!(user_uuid = %user, "updated profile");

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use shopfront_app::domain::users::{MockUsersService, UsersServiceError, records::Role};

    use crate::test_helpers::{TEST_BUYER_UUID, TestServices, make_user};

    use super::*;

    fn make_service(users: MockUsersService) -> Service {
        TestServices::new().with_users(users).signed_in(
            TEST_BUYER_UUID,
            Role::Buyer,
            Router::with_path("user/edit").put(handler),
        )
    }

    #[tokio::test]
    async fn test_edit_profile_success() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_update_profile()
            .once()
            .withf(|user, update| {
                *user == TEST_BUYER_UUID
                    && update.first_name == "Grace"
                    && update.password.is_none()
                    && update.gender == Some(Gender::Female)
            })
            .return_once(|user, update| {
                let mut record = make_user(user, Role::Buyer);

                record.first_name = update.first_name;
                record.gender = update.gender;

                Ok(record)
            });

        let mut res = TestClient::put("http://example.com/user/edit")
            .json(&json!({
                "firstName": " Grace ",
                "lastName": "Hopper",
                "gender": "female"
            }))
            .send(&make_service(users))
            .await;

        let body: UserResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.first_name, "Grace");
        assert_eq!(body.gender, Some(Gender::Female));

        Ok(())
    }

    #[tokio::test]
    async fn test_edit_short_password_returns_400() -> TestResult {
        let mut users = MockUsersService::new();

        users.expect_update_profile().never();

        let res = TestClient::put("http://example.com/user/edit")
            .json(&json!({
                "password": "short",
                "firstName": "Grace",
                "lastName": "Hopper"
            }))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_edit_deleted_account_returns_404() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_update_profile()
            .once()
            .return_once(|_, _| Err(UsersServiceError::NotFound));

        let res = TestClient::put("http://example.com/user/edit")
            .json(&json!({ "firstName": "Grace", "lastName": "Hopper" }))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
