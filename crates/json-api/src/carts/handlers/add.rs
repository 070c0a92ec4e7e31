//! Add To Cart Handler

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

use shopfront_app::domain::carts::data::CartAddition;

use crate::{carts::errors::into_status_error, extensions::*, responses::MessageResponse};

/// Add To Cart Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddToCartRequest {
    /// Units to add; merged into any existing line for the product
    pub quantity: u32,
}

impl From<AddToCartRequest> for CartAddition {
    fn from(request: AddToCartRequest) -> Self {
        CartAddition {
            quantity: request.quantity,
        }
    }
}

/// Add To Cart Handler
#[endpoint(
    tags("cart"),
    summary = "Add Item to Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Item added"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in as a buyer"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.add",
    skip(product, json, depot),
    fields(
        owner_uuid = field::Empty,
        product_uuid = field::Empty,
        quantity = field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<AddToCartRequest>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let owner = depot.identity_or_401()?.user;
    let product = product.into_inner();
    let addition = CartAddition::from(json.into_inner()).validate_or_400()?;

    let span = Span::current();

    span.record("owner_uuid", field::display(owner));
    span.record("product_uuid", field::display(product));
    span.record("quantity", addition.quantity);

    let line = state
        .app
        .carts
        .add_item(owner, product.into(), addition)
        .await
        .map_err(into_status_error)?;

    info!(
        owner_uuid = %owner,
        product_uuid = %product,
        line_quantity = line.quantity,
        "added item to cart"
    );

    Ok(Json(MessageResponse::new("Item is added to cart successfully.")))
}
