//! Remove Cart Item Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;
use uuid::Uuid;

use crate::{carts::errors::into_status_error, extensions::*, responses::MessageResponse};

/// Remove Cart Item Handler
///
/// Succeeds even when the product was not in the cart.
#[endpoint(
    tags("cart"),
    summary = "Remove Item from Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Item removed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in as a buyer"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let owner = depot.identity_or_401()?.user;
    let product = product.into_inner();

    state
        .app
        .carts
        .remove_item(owner, product.into())
        .await
        .map_err(into_status_error)?;

    info!(owner_uuid = %owner, product_uuid = %product, "removed item from cart");

    Ok(Json(MessageResponse::new(
        "Item is removed from cart successfully.",
    )))
}
