//! User Errors

use salvo::http::StatusError;
use tracing::error;

use shopfront_app::domain::users::UsersServiceError;

pub(crate) fn into_status_error(error: UsersServiceError) -> StatusError {
    match error {
        UsersServiceError::AlreadyExists => {
            StatusError::conflict().brief("An account with this email already exists")
        }
        UsersServiceError::NotFound => StatusError::not_found().brief("User not found"),
        UsersServiceError::InvalidCredentials => {
            StatusError::not_found().brief("Invalid email or password")
        }
        UsersServiceError::MissingRequiredData | UsersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid user payload")
        }
        UsersServiceError::Password(source) => {
            error!("password hashing failure: {source}");

            StatusError::internal_server_error()
        }
        UsersServiceError::Token(source) => {
            error!("token issuance failure: {source}");

            StatusError::internal_server_error()
        }
        UsersServiceError::Sql(source) => {
            error!("user storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn duplicate_email_is_a_conflict() {
        assert_eq!(
            into_status_error(UsersServiceError::AlreadyExists).code,
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn bad_credentials_look_like_a_missing_user() {
        let credentials = into_status_error(UsersServiceError::InvalidCredentials);
        let missing = into_status_error(UsersServiceError::NotFound);

        assert_eq!(credentials.code, StatusCode::NOT_FOUND);
        assert_eq!(missing.code, StatusCode::NOT_FOUND);
    }

    #[test]
    fn constraint_failures_are_bad_requests() {
        for error in [
            UsersServiceError::MissingRequiredData,
            UsersServiceError::InvalidData,
        ] {
            assert_eq!(into_status_error(error).code, StatusCode::BAD_REQUEST);
        }
    }
}
