//! Product persistence.
//!
//! [`ProductStore`] is the seam between the catalog and the backing table.
//! [`PgProductStore`] talks to PostgreSQL; [`MemoryProductStore`] keeps rows
//! in process with the same matching rules.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::models::product::Product;

pub use memory::MemoryProductStore;
pub use postgres::PgProductStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("product {0} not found")]
    NotFound(String),
    #[error("product {0} already exists")]
    DuplicateKey(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Inserts a new row. Never overwrites an existing id.
    async fn save(&self, product: &Product) -> Result<(), StoreError>;

    async fn get_all(&self) -> Result<Vec<Product>, StoreError>;

    async fn get_by_id(&self, id: &str) -> Result<Product, StoreError>;

    /// Case-insensitive substring match on `name`.
    async fn get_by_name_substring(&self, text: &str) -> Result<Vec<Product>, StoreError>;

    /// Case-insensitive exact match on `category`.
    async fn get_by_category(&self, category: &str) -> Result<Vec<Product>, StoreError>;

    async fn get_by_name_and_category(
        &self,
        text: &str,
        category: &str,
    ) -> Result<Vec<Product>, StoreError>;
}
