//! Login Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use shopfront_app::domain::users::data::Credentials;

use crate::{
    extensions::*,
    users::{errors::into_status_error, register::UserResponse},
};

/// Login Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginResponse {
    pub user: UserResponse,

    /// Bearer token for the `Authorization` header
    pub token: String,

    /// When the token stops being accepted
    pub expires_at: String,
}

/// Login Handler
///
/// An unknown email and a wrong password are indistinguishable.
#[endpoint(
    tags("users"),
    summary = "Log In",
    responses(
        (status_code = StatusCode::OK, description = "Session issued"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::NOT_FOUND, description = "Invalid email or password"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<LoginResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let LoginRequest { email, password } = json.into_inner();
    let credentials = Credentials { email, password }
        .normalized()
        .validate_or_400()?;

    let session = state
        .app
        .users
        .login(credentials)
        .await
        .map_err(into_status_error)?;

    info!(user_uuid = %session.user.uuid, "issued session");

    Ok(Json(LoginResponse {
        user: session.user.into(),
        token: session.token,
        expires_at: session.expires_at.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use shopfront_app::domain::users::{
        MockUsersService, UsersServiceError,
        records::{Role, Session},
    };

    use crate::test_helpers::{TEST_BUYER_UUID, TestServices, make_user};

    use super::*;

    fn make_service(users: MockUsersService) -> Service {
        TestServices::new()
            .with_users(users)
            .public(Router::with_path("user/login").post(handler))
    }

    #[tokio::test]
    async fn test_login_returns_token() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_login()
            .once()
            .withf(|credentials| {
                credentials.email == "ada@example.com" && credentials.password == "correct-horse"
            })
            .return_once(|_| {
                Ok(Session {
                    user: make_user(TEST_BUYER_UUID, Role::Buyer),
                    token: "signed.jwt.token".to_string(),
                    expires_at: Timestamp::UNIX_EPOCH,
                })
            });

        let mut res = TestClient::post("http://example.com/user/login")
            .json(&json!({ "email": "ADA@example.com", "password": "correct-horse" }))
            .send(&make_service(users))
            .await;

        let body: LoginResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.token, "signed.jwt.token");
        assert_eq!(body.user.uuid, TEST_BUYER_UUID.into_uuid());
        assert_eq!(body.expires_at, "1970-01-01T00:00:00Z");

        Ok(())
    }

    #[tokio::test]
    async fn test_login_invalid_credentials_returns_404() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_login()
            .once()
            .return_once(|_| Err(UsersServiceError::InvalidCredentials));

        let res = TestClient::post("http://example.com/user/login")
            .json(&json!({ "email": "ada@example.com", "password": "wrong-horse" }))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_login_empty_password_returns_400() -> TestResult {
        let mut users = MockUsersService::new();

        users.expect_login().never();

        let res = TestClient::post("http://example.com/user/login")
            .json(&json!({ "email": "ada@example.com", "password": "" }))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
