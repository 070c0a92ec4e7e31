//! Cart quantity bounds.
//!
//! Adjusting moves a line one unit at a time within `1..=available`.

use thiserror::Error;

use crate::domain::carts::data::QuantityAdjustment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QuantityBoundError {
    #[error("order quantity cannot be greater than available quantity")]
    ExceedsStock,

    #[error("order quantity cannot be less than 1")]
    BelowMinimum,
}

/// Apply a one-step adjustment to `current`, bounded by `available` stock.
///
/// The stock ceiling is checked before the floor, so a line already above
/// stock cannot be stepped down until stock catches up.
///
/// # Errors
///
/// Returns the violated bound; the caller keeps the old quantity.
pub fn adjust_quantity(
    current: u32,
    available: u32,
    adjustment: QuantityAdjustment,
) -> Result<u32, QuantityBoundError> {
    let candidate = match adjustment {
        QuantityAdjustment::Increase => current
            .checked_add(1)
            .ok_or(QuantityBoundError::ExceedsStock)?,
        QuantityAdjustment::Decrease => current
            .checked_sub(1)
            .ok_or(QuantityBoundError::BelowMinimum)?,
    };

    if candidate > available {
        return Err(QuantityBoundError::ExceedsStock);
    }

    if candidate < 1 {
        return Err(QuantityBoundError::BelowMinimum);
    }

    Ok(candidate)
}
