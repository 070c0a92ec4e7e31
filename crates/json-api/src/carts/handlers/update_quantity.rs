//! Update Cart Quantity Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::{Span, field, info};
use uuid::Uuid;

use shopfront_app::domain::carts::data::QuantityAdjustment;

use crate::{carts::errors::into_status_error, extensions::*, responses::MessageResponse};

/// Update Quantity Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateQuantityRequest {
    /// `increase` or `decrease`, one unit at a time
    #[salvo(schema(value_type = String))]
    pub option: QuantityAdjustment,
}

/// Update Cart Quantity Handler
#[endpoint(
    tags("cart"),
    summary = "Step Cart Item Quantity",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Quantity updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in as a buyer"),
        (status_code = StatusCode::FORBIDDEN, description = "Quantity out of bounds or item not in cart"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.update_quantity",
    skip(product, json, depot),
    fields(
        owner_uuid = field::Empty,
        product_uuid = field::Empty,
        option = field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<UpdateQuantityRequest>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let owner = depot.identity_or_401()?.user;
    let product = product.into_inner();
    let adjustment = json.into_inner().option;

    let span = Span::current();

    span.record("owner_uuid", field::display(owner));
    span.record("product_uuid", field::display(product));
    span.record("option", field::debug(adjustment));

    let line = state
        .app
        .carts
        .adjust_quantity(owner, product.into(), adjustment)
        .await
        .map_err(into_status_error)?;

    info!(
        owner_uuid = %owner,
        product_uuid = %product,
        quantity = line.quantity,
        "updated cart item quantity"
    );

    Ok(Json(MessageResponse::new(
        "Item quantity is updated successfully.",
    )))
}
