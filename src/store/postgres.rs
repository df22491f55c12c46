//! PostgreSQL-backed store over a shared `sqlx` connection pool.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::{debug, error, info};

use super::{CatalogStore, Result};
use crate::config::DatabaseConfig;
use crate::error::Error;
use crate::model::{Category, CategoryInput, NewProduct, Product, ProductListing, ProductUpdate};
use crate::page::Page;

const CREATE_CATEGORIES: &str = "
    CREATE TABLE IF NOT EXISTS categories (
        id SERIAL PRIMARY KEY,
        name VARCHAR(50) NOT NULL
    )";

const CREATE_PRODUCTS: &str = "
    CREATE TABLE IF NOT EXISTS products (
        id SERIAL PRIMARY KEY,
        name VARCHAR(50) NOT NULL,
        category_id INT REFERENCES categories(id)
    )";

const LIST_PRODUCTS: &str = "
    SELECT p.id AS product_id, p.name AS product_name,
           c.id AS category_id, c.name AS category_name
    FROM products p
    JOIN categories c ON p.category_id = c.id
    ORDER BY p.id
    LIMIT $1 OFFSET $2";

/// The production store. Cloning is cheap; clones share the pool.
#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Opens the connection pool described by `config`.
    pub async fn connect(config: &DatabaseConfig) -> std::result::Result<Self, Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(config.connect_options())
            .await?;
        info!(
            host = %config.host,
            port = config.port,
            database = %config.name,
            max_connections = config.max_connections,
            "connected to postgres"
        );
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates `categories` and then `products` if they do not exist yet.
    ///
    /// Safe to run on every start. Stops at the first failing statement.
    pub async fn init_schema(&self) -> std::result::Result<(), Error> {
        for (table, ddl) in [("categories", CREATE_CATEGORIES), ("products", CREATE_PRODUCTS)] {
            if let Err(e) = sqlx::query(ddl).execute(&self.pool).await {
                error!(table, error = %e, "failed to create table");
                return Err(e.into());
            }
            info!(table, "table checked/created");
        }
        Ok(())
    }

    /// Waits for checked-out connections to return, then closes the pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl CatalogStore for PgStore {
    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        let rows = sqlx::query_as::<_, Category>("SELECT id, name FROM categories")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn create_category(&self, input: CategoryInput) -> Result<Category> {
        let row = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name) VALUES ($1) RETURNING id, name",
        )
        .bind(input.name)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update_category(&self, id: i32, input: CategoryInput) -> Result<Option<Category>> {
        let row = sqlx::query_as::<_, Category>(
            "UPDATE categories SET name = $1 WHERE id = $2 RETURNING id, name",
        )
        .bind(input.name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete_category(&self, id: i32) -> Result<u64> {
        let done = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        debug!(id, rows = done.rows_affected(), "category delete");
        Ok(done.rows_affected())
    }

    async fn list_products(&self, page: Page) -> Result<Vec<ProductListing>> {
        let rows = sqlx::query_as::<_, ProductListing>(LIST_PRODUCTS)
            .bind(page.size)
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn create_product(&self, input: NewProduct) -> Result<Product> {
        let row = sqlx::query_as::<_, Product>(
            "INSERT INTO products (name, category_id) VALUES ($1, $2) \
             RETURNING id, name, category_id",
        )
        .bind(input.name)
        .bind(input.category_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update_product(&self, id: i32, input: ProductUpdate) -> Result<Option<Product>> {
        let row = sqlx::query_as::<_, Product>(
            "UPDATE products SET name = $1, category_id = $2 WHERE id = $3 \
             RETURNING id, name, category_id",
        )
        .bind(input.new_name())
        .bind(input.category_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete_product(&self, id: i32) -> Result<u64> {
        let done = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        debug!(id, rows = done.rows_affected(), "product delete");
        Ok(done.rows_affected())
    }
}
