//! Products Data

use garde::Validate;
use rust_decimal::Decimal;

use crate::domain::products::records::Category;

/// New Product Data
///
/// Also carries the full replacement state on edit.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewProduct {
    #[garde(length(chars, min = 2, max = 55))]
    pub name: String,

    #[garde(length(chars, min = 2, max = 55))]
    pub company: String,

    #[garde(length(chars, max = 1000))]
    pub description: Option<String>,

    #[garde(length(min = 1, max = 2048))]
    pub image: Option<String>,

    #[garde(custom(non_negative))]
    pub price: Decimal,

    #[garde(skip)]
    pub category: Category,

    #[garde(skip)]
    pub free_shipping: bool,

    #[garde(range(min = 1))]
    pub quantity: u32,

    #[garde(inner(length(chars, min = 1, max = 30)))]
    pub colors: Vec<String>,
}

/// Product Update Data
pub type ProductUpdate = NewProduct;

impl NewProduct {
    /// Trim names and lower-case colours.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            company: self.company.trim().to_string(),
            description: self
                .description
                .map(|description| description.trim().to_string()),
            colors: self
                .colors
                .iter()
                .map(|color| color.trim().to_lowercase())
                .collect(),
            ..self
        }
    }
}

/// Page selection for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Validate)]
pub struct Pagination {
    #[garde(range(min = 1))]
    pub page: u32,

    #[garde(range(min = 1, max = 100))]
    pub limit: u32,
}

impl Pagination {
    #[must_use]
    pub fn offset(self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

/// Seller's own product listing query.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct ProductQuery {
    #[garde(dive)]
    pub pagination: Pagination,

    #[garde(length(chars, max = 55))]
    pub search_text: Option<String>,
}

/// Inclusive price bounds for a buyer search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceRange {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
}

/// Buyer's catalogue search.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct BuyerProductQuery {
    #[garde(dive)]
    pub pagination: Pagination,

    #[garde(length(chars, max = 55))]
    pub search_text: Option<String>,

    #[garde(custom(valid_price_range))]
    pub price: PriceRange,

    #[garde(skip)]
    pub categories: Vec<Category>,
}

fn non_negative(value: &Decimal, _context: &()) -> garde::Result {
    if *value < Decimal::ZERO {
        return Err(garde::Error::new("must not be negative"));
    }

    Ok(())
}

fn valid_price_range(value: &PriceRange, context: &()) -> garde::Result {
    if let Some(min) = &value.min {
        non_negative(min, context)?;
    }

    if let Some(max) = &value.max {
        non_negative(max, context)?;
    }

    match (value.min, value.max) {
        (Some(min), Some(max)) if max < min => Err(garde::Error::new(
            "maximum price must not be below minimum price",
        )),
        _ => Ok(()),
    }
}
