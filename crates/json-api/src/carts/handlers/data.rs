//! Cart Data Handler

use rust_decimal::Decimal;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shopfront_app::domain::carts::pricing::{CartSummary, PricedCartLine, format_amount};

use crate::{carts::errors::into_status_error, extensions::*};

/// A cart line priced against the live catalogue.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartLineResponse {
    pub product_id: Uuid,
    pub order_quantity: u32,
    pub available_quantity: u32,
    pub image: Option<String>,
    pub name: String,
    pub brand: String,

    /// Current unit price
    #[serde(with = "rust_decimal::serde::float")]
    #[salvo(schema(value_type = f64))]
    pub price: Decimal,

    /// Unit price times order quantity
    #[serde(with = "rust_decimal::serde::float")]
    #[salvo(schema(value_type = f64))]
    pub total: Decimal,
}

impl From<PricedCartLine> for CartLineResponse {
    fn from(line: PricedCartLine) -> Self {
        CartLineResponse {
            product_id: line.product_uuid.into(),
            order_quantity: line.order_quantity,
            available_quantity: line.available_quantity,
            image: line.image,
            name: line.name,
            brand: line.brand,
            price: line.price,
            total: line.total,
        }
    }
}

/// Cart Data Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartDataResponse {
    pub cart_data: Vec<CartLineResponse>,

    /// Sum of line totals, two decimal places
    pub sub_total: String,

    /// Subtotal after the 5% cart discount, two decimal places
    pub grand_total: String,
}

impl From<CartSummary> for CartDataResponse {
    fn from(summary: CartSummary) -> Self {
        CartDataResponse {
            sub_total: format_amount(summary.subtotal),
            grand_total: format_amount(summary.grand_total),
            cart_data: summary.lines.into_iter().map(Into::into).collect(),
        }
    }
}

/// Cart Data Handler
///
/// Lines whose product no longer exists are left out.
#[endpoint(
    tags("cart"),
    summary = "Get Priced Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Priced cart"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in as a buyer"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartDataResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let owner = depot.identity_or_401()?.user;

    let summary = state
        .app
        .carts
        .cart_summary(owner)
        .await
        .map_err(into_status_error)?;

    Ok(Json(summary.into()))
}
