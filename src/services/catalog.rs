use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::dtos::product::CreateProductRequest;
use crate::models::product::Product;
use crate::services::sorting::{sort_products, SortKey};
use crate::store::{ProductStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("{0}")]
    InvalidArgument(String),
}

/// Routes catalog requests to the matching store predicate.
#[derive(Clone)]
pub struct ProductCatalog {
    store: Arc<dyn ProductStore>,
}

/// Digits-only tokens are treated as ids. A product named only with digits
/// is therefore unreachable through [`ProductCatalog::resolve_by_id_or_name`].
pub fn looks_like_id(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

impl ProductCatalog {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self, req), fields(id = %req.id))]
    pub async fn add_product(&self, req: CreateProductRequest) -> Result<Product, CatalogError> {
        if req.id.trim().is_empty() {
            return Err(CatalogError::InvalidArgument("Product id is required".into()));
        }
        if req.name.trim().is_empty() {
            return Err(CatalogError::InvalidArgument("Product name is required".into()));
        }
        if req.price < Decimal::ZERO {
            return Err(CatalogError::InvalidArgument("Price cannot be negative".into()));
        }

        let product = Product::from(req);
        self.store.save(&product).await?;
        Ok(product)
    }

    pub async fn all_products(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.store.get_all().await?)
    }

    pub async fn product_by_id(&self, id: &str) -> Result<Product, CatalogError> {
        Ok(self.store.get_by_id(id).await?)
    }

    #[instrument(skip(self))]
    pub async fn resolve_by_id_or_name(&self, token: &str) -> Result<Vec<Product>, CatalogError> {
        if looks_like_id(token) {
            debug!("Resolving token as product id");
            let product = self.store.get_by_id(token).await?;
            Ok(vec![product])
        } else {
            debug!("Resolving token as name fragment");
            Ok(self.store.get_by_name_substring(token).await?)
        }
    }

    #[instrument(skip(self))]
    pub async fn search(
        &self,
        name: Option<&str>,
        category: Option<&str>,
    ) -> Result<Vec<Product>, CatalogError> {
        let products = match (name, category) {
            (Some(name), Some(category)) => {
                self.store.get_by_name_and_category(name, category).await?
            }
            (Some(name), None) => self.store.get_by_name_substring(name).await?,
            (None, Some(category)) => self.store.get_by_category(category).await?,
            (None, None) => self.store.get_all().await?,
        };
        Ok(products)
    }

    #[instrument(skip(self))]
    pub async fn sorted_products(&self, sort_by: Option<&str>) -> Result<Vec<Product>, CatalogError> {
        let mut products = self.store.get_all().await?;
        sort_products(&mut products, SortKey::parse(sort_by));
        Ok(products)
    }
}
