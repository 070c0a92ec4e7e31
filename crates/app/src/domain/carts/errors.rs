//! Carts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::carts::reconciler::QuantityBoundError;

/// SQLSTATE raised when an integer column overflows.
const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("product not found")]
    NotFound,

    #[error("cart does not contain this product")]
    CartLineMissing,

    #[error("order quantity cannot be greater than available quantity")]
    QuantityExceedsStock,

    #[error("order quantity cannot be less than 1")]
    QuantityBelowMinimum,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<QuantityBoundError> for CartsServiceError {
    fn from(error: QuantityBoundError) -> Self {
        match error {
            QuantityBoundError::ExceedsStock => Self::QuantityExceedsStock,
            QuantityBoundError::BelowMinimum => Self::QuantityBelowMinimum,
        }
    }
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        match &error {
            Error::RowNotFound => return Self::NotFound,
            Error::Encode(_) => return Self::InvalidData,
            _ => {}
        }

        let Some(database_error) = error.as_database_error() else {
            return Self::Sql(error);
        };

        if database_error.code().as_deref() == Some(NUMERIC_VALUE_OUT_OF_RANGE) {
            return Self::InvalidData;
        }

        match DatabaseError::kind(database_error) {
            ErrorKind::CheckViolation => Self::InvalidData,
            _ => Self::Sql(error),
        }
    }
}
