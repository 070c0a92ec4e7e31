//! Errors

use salvo::http::StatusError;
use tracing::error;

use shopfront_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        CartsServiceError::CartLineMissing => {
            StatusError::forbidden().brief("Product is not in the cart")
        }
        CartsServiceError::QuantityExceedsStock => StatusError::forbidden()
            .brief("Order quantity cannot be greater than available quantity"),
        CartsServiceError::QuantityBelowMinimum => {
            StatusError::forbidden().brief("Order quantity cannot be less than 1")
        }
        CartsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid cart payload")
        }
        CartsServiceError::Sql(source) => {
            error!("cart storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
