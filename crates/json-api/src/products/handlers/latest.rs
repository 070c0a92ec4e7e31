//! Latest Products Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    products::{details::ProductResponse, errors::into_status_error},
};

/// Latest Products Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LatestProductsResponse {
    pub products: Vec<ProductResponse>,
}

/// Latest Products Handler
///
/// The most recently listed products across the catalogue.
#[endpoint(
    tags("products"),
    summary = "Latest Products",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Newest products"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<LatestProductsResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let products = state
        .app
        .products
        .latest_products()
        .await
        .map_err(into_status_error)?;

    Ok(Json(LatestProductsResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}
