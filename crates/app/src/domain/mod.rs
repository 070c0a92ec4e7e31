//! Domain services

use thiserror::Error;

pub mod carts;
pub mod products;
pub mod users;

/// A stored enum column held a value this build does not know.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown value `{0}`")]
pub struct UnknownVariant(pub String);
