//! Delete Account Handler

use salvo::prelude::*;
use tracing::info;

use crate::{extensions::*, responses::MessageResponse, users::errors::into_status_error};

/// Delete Account Handler
///
/// A seller's listings go with the account, or not at all.
#[endpoint(
    tags("users"),
    summary = "Delete Account",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Account deleted"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let identity = depot.identity_or_401()?;

    state
        .app
        .users
        .delete_account(identity.user)
        .await
        .map_err(into_status_error)?;

    info!(user_uuid = %identity.user, role = %identity.role, "deleted account");

    Ok(Json(MessageResponse::new("Account is deleted successfully.")))
}
