use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{instrument, warn};

use crate::models::product::Product;

use super::{ProductStore, StoreError};

/// In-process store. Rows are kept in insertion order.
#[derive(Debug, Default)]
pub struct MemoryProductStore {
    rows: RwLock<Vec<Product>>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn filter<F>(&self, predicate: F) -> Vec<Product>
    where
        F: Fn(&Product) -> bool,
    {
        self.rows
            .read()
            .await
            .iter()
            .filter(|p| predicate(*p))
            .cloned()
            .collect()
    }
}

fn name_contains(product: &Product, needle: &str) -> bool {
    product.name.to_lowercase().contains(needle)
}

fn category_equals(product: &Product, category: &str) -> bool {
    product
        .category
        .as_deref()
        .is_some_and(|c| c.to_lowercase() == category)
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    #[instrument(skip(self, product), fields(id = %product.id))]
    async fn save(&self, product: &Product) -> Result<(), StoreError> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|p| p.id == product.id) {
            warn!("Duplicate product id");
            return Err(StoreError::DuplicateKey(product.id.clone()));
        }
        rows.push(product.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_all(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.rows.read().await.clone())
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: &str) -> Result<Product, StoreError> {
        self.rows
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn get_by_name_substring(&self, text: &str) -> Result<Vec<Product>, StoreError> {
        let needle = text.to_lowercase();
        Ok(self.filter(|p| name_contains(p, &needle)).await)
    }

    async fn get_by_category(&self, category: &str) -> Result<Vec<Product>, StoreError> {
        let category = category.to_lowercase();
        Ok(self.filter(|p| category_equals(p, &category)).await)
    }

    async fn get_by_name_and_category(
        &self,
        text: &str,
        category: &str,
    ) -> Result<Vec<Product>, StoreError> {
        let needle = text.to_lowercase();
        let category = category.to_lowercase();
        Ok(self
            .filter(|p| name_contains(p, &needle) && category_equals(p, &category))
            .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::product::ProductType;
    use rust_decimal::Decimal;

    fn product(id: &str, name: &str, category: Option<&str>) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            category: category.map(str::to_string),
            price: Decimal::new(250, 2),
            stock_quantity: 10,
            product_type: ProductType::Product,
        }
    }

    async fn seeded() -> MemoryProductStore {
        let store = MemoryProductStore::new();
        for p in [
            product("1", "Whole Milk", Some("Grocery")),
            product("2", "Milk Chocolate", Some("grocery")),
            product("3", "Laptop", Some("Electronics")),
            product("4", "Mystery Box", None),
        ] {
            store.save(&p).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn get_by_id_returns_saved_row() {
        let store = seeded().await;
        let found = store.get_by_id("3").await.unwrap();
        assert_eq!(found, product("3", "Laptop", Some("Electronics")));
    }

    #[tokio::test]
    async fn get_by_id_missing_is_not_found() {
        let store = seeded().await;
        let err = store.get_by_id("99").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(id) if id == "99"));
    }

    #[tokio::test]
    async fn duplicate_save_keeps_original_row() {
        let store = seeded().await;
        let err = store
            .save(&product("1", "Impostor", Some("Clothing")))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey(id) if id == "1"));

        let original = store.get_by_id("1").await.unwrap();
        assert_eq!(original.name, "Whole Milk");
        assert_eq!(store.get_all().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn name_search_is_case_insensitive_substring() {
        let store = seeded().await;
        let ids: Vec<_> = store
            .get_by_name_substring("MILK")
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, ["1", "2"]);
    }

    #[tokio::test]
    async fn category_match_is_exact_and_skips_missing() {
        let store = seeded().await;
        assert_eq!(store.get_by_category("GROCERY").await.unwrap().len(), 2);
        assert!(store.get_by_category("Groc").await.unwrap().is_empty());
        assert!(store.get_by_category("").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn name_and_category_is_a_conjunction() {
        let store = seeded().await;
        let hits = store
            .get_by_name_and_category("chocolate", "Grocery")
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "2");
        assert!(store
            .get_by_name_and_category("laptop", "Grocery")
            .await
            .unwrap()
            .is_empty());
    }
}
