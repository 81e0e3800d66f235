//! Business logic services

pub mod fields;
pub mod sku_update;
pub mod urls;

use std::sync::Arc;

use crate::repository::CatalogStore;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub sku_update: sku_update::SkuUpdateService,
}

impl Services {
    /// Create all services on top of the given catalog store
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            sku_update: sku_update::SkuUpdateService::new(store),
        }
    }
}
