//! Catalog store access.
//!
//! The update service only talks to the catalog through [`CatalogStore`].
//! [`Repository`] implements it on PostgreSQL; [`memory::MemoryCatalog`]
//! keeps everything in process for development and tests.

pub mod memory;
pub mod products;
pub mod tags;

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, Pool, Postgres};

use crate::{
    config::DatabaseConfig,
    error::AppResult,
    models::{Product, ProductId, TagId},
};

/// Product catalog operations needed by the update-by-SKU endpoint
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Check that the store can serve requests
    async fn ping(&self) -> AppResult<()>;

    /// Resolve a SKU to the product that currently owns it
    async fn product_id_by_sku(&self, sku: &str) -> AppResult<Option<ProductId>>;

    async fn load_product(&self, id: ProductId) -> AppResult<Option<Product>>;

    /// Persist every field of `product`
    async fn save_product(&self, product: &Product) -> AppResult<()>;

    /// Exact-name tag lookup, creating the tag when none exists
    async fn tag_id_by_name_or_create(&self, name: &str) -> AppResult<TagId>;
}

/// PostgreSQL-backed catalog store
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Connect to the database and apply pending migrations
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect(&config.url)
            .await?;

        tracing::info!("Connected to database");

        sqlx::migrate!("./migrations").run(&pool).await?;

        tracing::info!("Database migrations completed");

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl CatalogStore for Repository {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn product_id_by_sku(&self, sku: &str) -> AppResult<Option<ProductId>> {
        self.products_id_by_sku(sku).await
    }

    async fn load_product(&self, id: ProductId) -> AppResult<Option<Product>> {
        self.products_get_by_id(id).await
    }

    async fn save_product(&self, product: &Product) -> AppResult<()> {
        self.products_save(product).await
    }

    async fn tag_id_by_name_or_create(&self, name: &str) -> AppResult<TagId> {
        self.tags_get_or_create(name).await
    }
}
