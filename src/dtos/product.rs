// src/dtos/product.rs
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::product::{Product, ProductType};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price: Decimal,
    #[serde(default)]
    pub stock_quantity: i32,
    #[serde(default)]
    pub product_type: ProductType,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub name: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortParams {
    pub sort_by: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price: Decimal,
    pub stock_quantity: i32,
    pub product_type: ProductType,
}

impl From<CreateProductRequest> for Product {
    fn from(req: CreateProductRequest) -> Self {
        Self {
            id: req.id,
            name: req.name,
            category: req.category,
            price: req.price,
            stock_quantity: req.stock_quantity,
            product_type: req.product_type,
        }
    }
}

// Convert from Model to Response DTO
impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            category: product.category,
            price: product.price,
            stock_quantity: product.stock_quantity,
            product_type: product.product_type,
        }
    }
}
