use async_trait::async_trait;
use sqlx::{Error as SqlxError, PgPool};
use tracing::{error, instrument, warn};

use crate::models::product::Product;

use super::{ProductStore, StoreError};

const SELECT_PRODUCT: &str = "SELECT id, name, category, price, stock_quantity,
        COALESCE(dtype, 'Product') AS dtype
     FROM product";

#[derive(Debug, Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_where(
        &self,
        predicate: &str,
        binds: &[&str],
    ) -> Result<Vec<Product>, StoreError> {
        let sql = format!("{SELECT_PRODUCT} WHERE {predicate}");
        let mut query = sqlx::query_as::<_, Product>(&sql);
        for value in binds {
            query = query.bind(*value);
        }
        query.fetch_all(&self.pool).await.map_err(|e| {
            error!(?e, "Failed to query products");
            e.into()
        })
    }
}

fn map_unique_violation(err: SqlxError, id: &str) -> StoreError {
    match err {
        SqlxError::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
            warn!(id, "Duplicate product id");
            StoreError::DuplicateKey(id.to_string())
        }
        other => {
            error!(?other, "Failed to insert product");
            other.into()
        }
    }
}

/// Wraps `text` as a `%text%` LIKE pattern with wildcards in `text` escaped.
pub(crate) fn like_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl ProductStore for PgProductStore {
    #[instrument(skip(self, product), fields(id = %product.id))]
    async fn save(&self, product: &Product) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO product (id, name, category, price, stock_quantity, dtype)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.category)
        .bind(product.price)
        .bind(product.stock_quantity)
        .bind(product.product_type.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &product.id))?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_all(&self) -> Result<Vec<Product>, StoreError> {
        match sqlx::query_as::<_, Product>(SELECT_PRODUCT)
            .fetch_all(&self.pool)
            .await
        {
            Ok(products) => Ok(products),
            Err(e) => {
                error!(?e, "Failed to fetch products");
                Err(e.into())
            }
        }
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: &str) -> Result<Product, StoreError> {
        self.fetch_where("id = $1", &[id])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    async fn get_by_name_substring(&self, text: &str) -> Result<Vec<Product>, StoreError> {
        let pattern = like_pattern(text);
        self.fetch_where("LOWER(name) LIKE LOWER($1) ESCAPE '\\'", &[pattern.as_str()])
            .await
    }

    #[instrument(skip(self))]
    async fn get_by_category(&self, category: &str) -> Result<Vec<Product>, StoreError> {
        self.fetch_where("LOWER(category) = LOWER($1)", &[category])
            .await
    }

    #[instrument(skip(self))]
    async fn get_by_name_and_category(
        &self,
        text: &str,
        category: &str,
    ) -> Result<Vec<Product>, StoreError> {
        let pattern = like_pattern(text);
        self.fetch_where(
            "LOWER(name) LIKE LOWER($1) ESCAPE '\\' AND LOWER(category) = LOWER($2)",
            &[pattern.as_str(), category],
        )
        .await
    }
}
