// src/database.rs
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

// `price` keeps whatever scale the caller sent; a typmod would round on insert.
const CREATE_PRODUCT_TABLE: &str = "CREATE TABLE IF NOT EXISTS product (
    id             TEXT PRIMARY KEY,
    name           TEXT NOT NULL,
    category       TEXT,
    price          NUMERIC NOT NULL,
    stock_quantity INTEGER NOT NULL DEFAULT 0,
    dtype          TEXT
)";

pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Creates the `product` table if it is missing. Not a migration.
pub async fn bootstrap_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_PRODUCT_TABLE).execute(pool).await?;
    info!("Product table ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::CREATE_PRODUCT_TABLE;

    #[test]
    fn price_column_has_no_scale_limit() {
        let price = CREATE_PRODUCT_TABLE
            .lines()
            .find(|line| line.trim_start().starts_with("price"))
            .unwrap();
        assert_eq!(price.split_whitespace().collect::<Vec<_>>(), ["price", "NUMERIC", "NOT", "NULL,"]);
    }
}
