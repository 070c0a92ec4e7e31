//! Seller Product Listing Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use shopfront_app::domain::products::{
    data::{Pagination, ProductQuery},
    records::{Page, ProductRecord},
};

use crate::{
    extensions::*,
    products::{details::ProductResponse, errors::into_status_error},
};

/// Seller Products Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SellerProductsRequest {
    /// 1-based page number
    pub page: u32,

    /// Page size, at most 100
    pub limit: u32,

    /// Case-insensitive substring of the product name
    pub search_text: Option<String>,
}

impl From<SellerProductsRequest> for ProductQuery {
    fn from(request: SellerProductsRequest) -> Self {
        ProductQuery {
            pagination: Pagination {
                page: request.page,
                limit: request.limit,
            },
            search_text: non_blank(request.search_text),
        }
    }
}

/// One page of products.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductsPageResponse {
    pub products: Vec<ProductResponse>,

    /// Number of pages available at this page size
    pub total_page: u64,
}

impl From<Page<ProductRecord>> for ProductsPageResponse {
    fn from(page: Page<ProductRecord>) -> Self {
        ProductsPageResponse {
            products: page.items.into_iter().map(Into::into).collect(),
            total_page: page.total_pages,
        }
    }
}

pub(crate) fn non_blank(search_text: Option<String>) -> Option<String> {
    search_text
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Seller Product Listing Handler
///
/// Lists the caller's own products, newest first.
#[endpoint(
    tags("products"),
    summary = "List Own Products",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Page of products"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in as a seller"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<SellerProductsRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductsPageResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let seller = depot.identity_or_401()?.user;
    let query = ProductQuery::from(json.into_inner()).validate_or_400()?;

    let page = state
        .app
        .products
        .list_seller_products(seller, query)
        .await
        .map_err(into_status_error)?;

    Ok(Json(page.into()))
}
