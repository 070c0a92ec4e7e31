//! Cart Count Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{carts::errors::into_status_error, extensions::*};

/// Cart Count Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartCountResponse {
    /// Number of distinct products in the cart
    pub count: u64,
}

/// Cart Count Handler
///
/// Counts stored lines, including lines whose product has since been removed
/// from the catalogue.
#[endpoint(
    tags("cart"),
    summary = "Count Cart Items",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Line count"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in as a buyer"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartCountResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let owner = depot.identity_or_401()?.user;

    let count = state
        .app
        .carts
        .count_items(owner)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartCountResponse { count }))
}
