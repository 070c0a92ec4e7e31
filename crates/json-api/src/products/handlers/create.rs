//! Create Product Handler

use rust_decimal::Decimal;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use shopfront_app::domain::products::{data::NewProduct, records::Category};

use crate::{extensions::*, products::errors::into_status_error};

/// Product details sent on create and edit.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductRequest {
    pub name: String,

    /// Brand or manufacturer
    pub company: String,

    pub description: Option<String>,

    /// Image URL
    pub image: Option<String>,

    #[serde(with = "rust_decimal::serde::float")]
    #[salvo(schema(value_type = f64))]
    pub price: Decimal,

    #[salvo(schema(value_type = String))]
    pub category: Category,

    #[serde(default)]
    pub free_shipping: bool,

    /// Units in stock
    pub quantity: u32,

    #[serde(default)]
    pub color: Vec<String>,
}

impl From<ProductRequest> for NewProduct {
    fn from(request: ProductRequest) -> Self {
        NewProduct {
            name: request.name,
            company: request.company,
            description: request.description,
            image: request.image,
            price: request.price,
            category: request.category,
            free_shipping: request.free_shipping,
            quantity: request.quantity,
            colors: request.color,
        }
    }
}

/// Product Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductCreatedResponse {
    pub message: String,

    /// Created product UUID
    pub uuid: Uuid,
}

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in as a seller"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductCreatedResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let seller = depot.identity_or_401()?.user;
    let product = NewProduct::from(json.into_inner())
        .normalized()
        .validate_or_400()?;

    let uuid = state
        .app
        .products
        .create_product(seller, product)
        .await
        .map_err(into_status_error)?
        .uuid;

    res.add_header(LOCATION, format!("/product/details/{uuid}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    info!(seller_uuid = %seller, product_uuid = %uuid, "created product");

    Ok(Json(ProductCreatedResponse {
        message: "Product is added successfully.".to_string(),
        uuid: uuid.into(),
    }))
}
