//! Cart Data

use garde::Validate;
use serde::{Deserialize, Serialize};

/// Quantity requested when adding a product to a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Validate)]
pub struct CartAddition {
    #[garde(range(min = 1))]
    pub quantity: u32,
}

/// One-step change to a line's quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantityAdjustment {
    Increase,
    Decrease,
}
