//! In-process catalog store

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tokio::sync::RwLock;

use super::CatalogStore;
use crate::{
    error::{AppError, AppResult},
    models::{Product, ProductId, TagId},
};

/// Seed fixture layout
#[derive(Debug, Default, Deserialize)]
pub struct CatalogSeed {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub tags: Vec<SeedTag>,
}

#[derive(Debug, Deserialize)]
pub struct SeedTag {
    pub id: TagId,
    pub name: String,
}

#[derive(Default)]
struct CatalogData {
    products: HashMap<ProductId, Product>,
    tags: HashMap<TagId, String>,
    next_tag_id: TagId,
}

/// Catalog kept in memory; contents are lost on restart
#[derive(Default)]
pub struct MemoryCatalog {
    data: RwLock<CatalogData>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: CatalogSeed) -> Self {
        let next_tag_id = seed.tags.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let data = CatalogData {
            products: seed.products.into_iter().map(|p| (p.id, p)).collect(),
            tags: seed.tags.into_iter().map(|t| (t.id, t.name)).collect(),
            next_tag_id,
        };
        Self {
            data: RwLock::new(data),
        }
    }

    /// Build a catalog from a JSON fixture file
    pub async fn from_seed_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read(path).await.map_err(|e| {
            AppError::Internal(format!("Cannot read seed file {}: {}", path.display(), e))
        })?;
        let seed: CatalogSeed = serde_json::from_slice(&raw).map_err(|e| {
            AppError::Internal(format!("Invalid seed file {}: {}", path.display(), e))
        })?;
        tracing::info!(
            "Seeded memory catalog with {} products and {} tags",
            seed.products.len(),
            seed.tags.len()
        );
        Ok(Self::from_seed(seed))
    }

    pub async fn insert_product(&self, product: Product) {
        self.data.write().await.products.insert(product.id, product);
    }

    pub async fn product(&self, id: ProductId) -> Option<Product> {
        self.data.read().await.products.get(&id).cloned()
    }

    pub async fn tag_names(&self) -> Vec<(TagId, String)> {
        let data = self.data.read().await;
        let mut tags: Vec<_> = data.tags.iter().map(|(id, n)| (*id, n.clone())).collect();
        tags.sort();
        tags
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    async fn product_id_by_sku(&self, sku: &str) -> AppResult<Option<ProductId>> {
        let data = self.data.read().await;
        Ok(data
            .products
            .values()
            .find(|p| p.sku == sku)
            .map(|p| p.id))
    }

    async fn load_product(&self, id: ProductId) -> AppResult<Option<Product>> {
        Ok(self.product(id).await)
    }

    async fn save_product(&self, product: &Product) -> AppResult<()> {
        let mut data = self.data.write().await;
        match data.products.get_mut(&product.id) {
            Some(stored) => {
                *stored = product.clone();
                Ok(())
            }
            None => Err(AppError::Internal(format!(
                "Product {} vanished before save",
                product.id
            ))),
        }
    }

    async fn tag_id_by_name_or_create(&self, name: &str) -> AppResult<TagId> {
        let mut data = self.data.write().await;
        if let Some((id, _)) = data.tags.iter().find(|(_, n)| n.as_str() == name) {
            return Ok(*id);
        }
        let id = data.next_tag_id.max(1);
        data.next_tag_id = id + 1;
        data.tags.insert(id, name.to_string());
        tracing::info!("Created tag '{}' (id={})", name, id);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed() -> CatalogSeed {
        serde_json::from_str(
            r#"{
                "products": [
                    {"id": 1, "sku": "A1", "regular_price": "10.00"},
                    {"id": 2, "sku": "B2"}
                ],
                "tags": [{"id": 5, "name": "summer"}]
            }"#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_lookup_and_save() {
        let catalog = MemoryCatalog::from_seed(seed());
        assert_eq!(catalog.product_id_by_sku("B2").await.unwrap(), Some(2));
        assert_eq!(catalog.product_id_by_sku("nope").await.unwrap(), None);

        let mut product = catalog.load_product(1).await.unwrap().unwrap();
        assert_eq!(product.regular_price.as_deref(), Some("10.00"));
        product.set_sku("A1-NEW");
        catalog.save_product(&product).await.unwrap();

        assert_eq!(catalog.product_id_by_sku("A1").await.unwrap(), None);
        assert_eq!(catalog.product_id_by_sku("A1-NEW").await.unwrap(), Some(1));
    }

    #[tokio::test]
    async fn test_save_unknown_product_fails() {
        let catalog = MemoryCatalog::new();
        let product = Product {
            id: 99,
            ..Default::default()
        };
        assert!(catalog.save_product(&product).await.is_err());
    }

    #[tokio::test]
    async fn test_tags_reuse_exact_name() {
        let catalog = MemoryCatalog::from_seed(seed());
        assert_eq!(catalog.tag_id_by_name_or_create("summer").await.unwrap(), 5);

        let created = catalog.tag_id_by_name_or_create("Summer").await.unwrap();
        assert_eq!(created, 6);
        assert_eq!(catalog.tag_id_by_name_or_create("Summer").await.unwrap(), 6);
        assert_eq!(catalog.tag_names().await.len(), 2);
    }
}
