use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Discriminator stored in the `dtype` column. Subtypes carry no extra fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProductType {
    Clothing,
    Electronics,
    Grocery,
    #[default]
    Product,
}

impl ProductType {
    pub fn as_str(self) -> &'static str {
        match self {
            ProductType::Clothing => "Clothing",
            ProductType::Electronics => "Electronics",
            ProductType::Grocery => "Grocery",
            ProductType::Product => "Product",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown product type: {0}")]
pub struct ParseProductTypeError(String);

impl FromStr for ProductType {
    type Err = ParseProductTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Clothing" => Ok(ProductType::Clothing),
            "Electronics" => Ok(ProductType::Electronics),
            "Grocery" => Ok(ProductType::Grocery),
            "Product" => Ok(ProductType::Product),
            other => Err(ParseProductTypeError(other.to_string())),
        }
    }
}

impl TryFrom<String> for ProductType {
    type Error = ParseProductTypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub price: Decimal,
    pub stock_quantity: i32,
    #[sqlx(rename = "dtype", try_from = "String")]
    pub product_type: ProductType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_type_parses_stored_tags() {
        assert_eq!("Grocery".parse::<ProductType>().unwrap(), ProductType::Grocery);
        assert_eq!(ProductType::Electronics.to_string(), "Electronics");
        assert!("grocery".parse::<ProductType>().is_err());
    }
}
