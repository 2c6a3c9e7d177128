//! PostgreSQL product store.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};

use super::errors::{StoreError, StoreResult};
use super::model::{NewProduct, Product, ProductOrder};
use super::ProductStore;

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS products (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL CHECK (name <> ''),
        price DOUBLE PRECISION NOT NULL CHECK (price > 0),
        availability BOOLEAN NOT NULL DEFAULT TRUE
    )
"#;

/// Store backed by a `sqlx` connection pool.
#[derive(Debug, Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    /// Wrap an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `database_url`
    pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self::new(pool))
    }

    /// Create the `products` table if it does not exist yet
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn find_all(&self, order: ProductOrder) -> StoreResult<Vec<Product>> {
        let sql = format!(
            "SELECT id, name, price, availability FROM products ORDER BY {}",
            order.sql()
        );
        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(products)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, price, availability FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(product)
    }

    async fn create(&self, product: NewProduct) -> StoreResult<Product> {
        let record = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, price)
            VALUES ($1, $2)
            RETURNING id, name, price, availability
            "#,
        )
        .bind(product.name)
        .bind(product.price)
        .fetch_one(&self.pool)
        .await?;
        Ok(record)
    }

    async fn save(&self, product: &Product) -> StoreResult<Product> {
        sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = $1, price = $2, availability = $3
            WHERE id = $4
            RETURNING id, name, price, availability
            "#,
        )
        .bind(&product.name)
        .bind(product.price)
        .bind(product.availability)
        .bind(product.id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::Missing(product.id))
    }

    async fn destroy(&self, product: &Product) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(product.id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Missing(product.id));
        }
        Ok(())
    }
}
