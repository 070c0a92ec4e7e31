//! Buyer Product Listing Handler

use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use shopfront_app::domain::products::{
    data::{BuyerProductQuery, Pagination, PriceRange},
    records::Category,
};

use crate::{
    extensions::*,
    products::{
        errors::into_status_error,
        seller_index::{ProductsPageResponse, non_blank},
    },
};

/// Buyer Products Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BuyerProductsRequest {
    pub page: u32,
    pub limit: u32,
    pub search_text: Option<String>,

    /// Inclusive lower price bound
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[salvo(schema(value_type = Option<f64>))]
    pub min_price: Option<Decimal>,

    /// Inclusive upper price bound
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[salvo(schema(value_type = Option<f64>))]
    pub max_price: Option<Decimal>,

    /// Any of these categories; empty means all
    #[serde(default)]
    #[salvo(schema(value_type = Vec<String>))]
    pub category: Vec<Category>,
}

impl From<BuyerProductsRequest> for BuyerProductQuery {
    fn from(request: BuyerProductsRequest) -> Self {
        BuyerProductQuery {
            pagination: Pagination {
                page: request.page,
                limit: request.limit,
            },
            search_text: non_blank(request.search_text),
            price: PriceRange {
                min: request.min_price,
                max: request.max_price,
            },
            categories: request.category,
        }
    }
}

/// Buyer Product Listing Handler
///
/// Searches the live catalogue across all sellers.
#[endpoint(
    tags("products"),
    summary = "Browse Products",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Page of products"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in as a buyer"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<BuyerProductsRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductsPageResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let query = BuyerProductQuery::from(json.into_inner()).validate_or_400()?;

    let page = state
        .app
        .products
        .list_buyer_products(query)
        .await
        .map_err(into_status_error)?;

    Ok(Json(page.into()))
}
