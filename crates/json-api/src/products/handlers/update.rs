//! Update Product Handler

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use tracing::{Span, field, info};
use uuid::Uuid;

use shopfront_app::domain::products::data::ProductUpdate;

use crate::{
    extensions::*,
    products::{create::ProductRequest, details::ProductResponse, errors::into_status_error},
};

/// Product Update Handler
///
/// Replaces every editable field of the product.
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in as a seller"),
        (status_code = StatusCode::FORBIDDEN, description = "Product belongs to another seller"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.update",
    skip(product, json, depot),
    fields(
        seller_uuid = field::Empty,
        product_uuid = field::Empty,
        price = field::Empty,
        quantity = field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<ProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let seller = depot.identity_or_401()?.user;
    let product = product.into_inner();
    let update = ProductUpdate::from(json.into_inner())
        .normalized()
        .validate_or_400()?;

    let span = Span::current();

    span.record("seller_uuid", field::display(seller));
    span.record("product_uuid", field::display(product));
    span.record("price", field::display(update.price));
    span.record("quantity", update.quantity);

    let updated = state
        .app
        .products
        .update_product(seller, product.into(), update)
        .await
        .map_err(into_status_error)?;

    info!(product_uuid = %product, price = %updated.price, "updated product");

    Ok(Json(updated.into()))
}
