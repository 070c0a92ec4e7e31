//! Product Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{UnknownVariant, users::records::UserUuid},
    uuids::TypedUuid,
};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Grocery,
    Kitchen,
    Clothing,
    Electronics,
    Furniture,
    Bakery,
    Liquor,
}

impl Category {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Grocery => "grocery",
            Self::Kitchen => "kitchen",
            Self::Clothing => "clothing",
            Self::Electronics => "electronics",
            Self::Furniture => "furniture",
            Self::Bakery => "bakery",
            Self::Liquor => "liquor",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "grocery" => Ok(Self::Grocery),
            "kitchen" => Ok(Self::Kitchen),
            "clothing" => Ok(Self::Clothing),
            "electronics" => Ok(Self::Electronics),
            "furniture" => Ok(Self::Furniture),
            "bakery" => Ok(Self::Bakery),
            "liquor" => Ok(Self::Liquor),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub seller_uuid: UserUuid,
    pub name: String,
    pub company: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub price: Decimal,
    pub category: Category,
    pub free_shipping: bool,
    pub colors: Vec<String>,
    pub quantity: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// One page of a product listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Build a page, deriving the page count from the total number of matches.
    #[must_use]
    pub fn new(items: Vec<T>, total: u64, limit: u32) -> Self {
        Self {
            items,
            total_pages: total.div_ceil(u64::from(limit.max(1))),
        }
    }
}
