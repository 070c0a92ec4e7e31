//! Cart pricing.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::products::records::ProductUuid;

/// Share of the subtotal charged after the flat cart discount.
const DISCOUNTED_SHARE: Decimal = Decimal::from_parts(95, 0, 0, false, 2);

/// A cart line joined against the live catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedCartLine {
    pub product_uuid: ProductUuid,
    pub order_quantity: u32,
    pub available_quantity: u32,
    pub image: Option<String>,
    pub name: String,
    pub brand: String,
    pub price: Decimal,
    pub total: Decimal,
}

impl PricedCartLine {
    #[must_use]
    pub fn new(
        product_uuid: ProductUuid,
        order_quantity: u32,
        available_quantity: u32,
        name: String,
        brand: String,
        image: Option<String>,
        price: Decimal,
    ) -> Self {
        Self {
            product_uuid,
            order_quantity,
            available_quantity,
            image,
            name,
            brand,
            price,
            total: price * Decimal::from(order_quantity),
        }
    }
}

/// Priced cart contents with order totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSummary {
    pub lines: Vec<PricedCartLine>,
    pub subtotal: Decimal,
    pub grand_total: Decimal,
}

impl CartSummary {
    /// Sum line totals and apply the flat discount, both rounded to cents.
    #[must_use]
    pub fn from_lines(lines: Vec<PricedCartLine>) -> Self {
        let subtotal = round_cents(lines.iter().map(|line| line.total).sum());
        let grand_total = round_cents(subtotal * DISCOUNTED_SHARE);

        Self {
            lines,
            subtotal,
            grand_total,
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::from_lines(Vec::new())
    }
}

fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Render an amount with exactly two decimal places.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", round_cents(amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(quantity: u32, price: Decimal) -> PricedCartLine {
        PricedCartLine::new(
            ProductUuid::new(),
            quantity,
            10,
            "Loaf".to_string(),
            "Bakehouse".to_string(),
            None,
            price,
        )
    }

    #[test]
    fn line_total_is_price_times_quantity() {
        assert_eq!(line(3, Decimal::new(125, 2)).total, Decimal::new(375, 2));
    }

    #[test]
    fn totals_apply_five_percent_discount() {
        let summary = CartSummary::from_lines(vec![
            line(2, Decimal::new(1000, 2)),
            line(1, Decimal::new(500, 2)),
        ]);

        assert_eq!(format_amount(summary.subtotal), "25.00");
        assert_eq!(format_amount(summary.grand_total), "23.75");
    }

    #[test]
    fn grand_total_rounds_half_cents_away_from_zero() {
        // 0.10 * 0.95 = 0.095
        let summary = CartSummary::from_lines(vec![line(1, Decimal::new(10, 2))]);

        assert_eq!(format_amount(summary.grand_total), "0.10");
    }

    #[test]
    fn empty_cart_totals_are_zero() {
        let summary = CartSummary::empty();

        assert!(summary.lines.is_empty());
        assert_eq!(format_amount(summary.subtotal), "0.00");
        assert_eq!(format_amount(summary.grand_total), "0.00");
    }

    #[test]
    fn whole_number_prices_render_with_cents() {
        assert_eq!(format_amount(Decimal::new(7, 0)), "7.00");
    }
}
