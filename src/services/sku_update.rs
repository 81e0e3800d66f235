//! Batch update of products addressed by SKU

use serde_json::Value;
use std::sync::Arc;

use super::fields;
use crate::{
    error::AppResult,
    models::{
        update::{
            requested_sku, BatchInput, BatchResponse, ItemResult, TagRef, UpdateRequestItem,
            PRODUCT_NOT_FOUND, SKU_NOT_SPECIFIED, SKU_TAKEN,
        },
        Product, TagId,
    },
    repository::CatalogStore,
};

#[derive(Clone)]
pub struct SkuUpdateService {
    store: Arc<dyn CatalogStore>,
}

impl SkuUpdateService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Check that the catalog store is reachable
    pub async fn ready(&self) -> AppResult<()> {
        self.store.ping().await
    }

    /// Apply every item of a batch, in order, and summarize the outcomes.
    ///
    /// Item-level problems become failure results; only store errors abort
    /// the call.
    pub async fn update_batch(&self, input: BatchInput) -> AppResult<BatchResponse> {
        let items = input.into_items();
        tracing::info!("Update by SKU: processing {} item(s)", items.len());

        let mut results = Vec::with_capacity(items.len());
        for raw in items {
            let result = self.update_item(raw).await?;
            if let ItemResult::Failed { sku, error } = &result {
                tracing::warn!("Update by SKU failed for {:?}: {}", sku, error);
            }
            results.push(result);
        }

        let response = BatchResponse::from(results);
        tracing::info!(
            "Update by SKU complete: {} updated, {} failed",
            response.updated,
            response.failed
        );
        Ok(response)
    }

    async fn update_item(&self, raw: Value) -> AppResult<ItemResult> {
        let Value::Object(fields) = raw else {
            return Ok(ItemResult::failed(None, SKU_NOT_SPECIFIED));
        };
        let Some(sku) = requested_sku(&fields) else {
            return Ok(ItemResult::failed(None, SKU_NOT_SPECIFIED));
        };

        let Some(id) = self.store.product_id_by_sku(&sku).await? else {
            return Ok(ItemResult::failed(Some(sku), PRODUCT_NOT_FOUND));
        };
        let Some(mut product) = self.store.load_product(id).await? else {
            return Ok(ItemResult::failed(Some(sku), PRODUCT_NOT_FOUND));
        };

        let (item, skipped) = UpdateRequestItem::from_fields(fields);
        if !skipped.is_empty() {
            tracing::debug!("Product {} ({}): ignored unreadable {:?}", id, sku, skipped);
        }

        if let Some(new_sku) = item.new_sku.as_deref().filter(|s| !s.is_empty()) {
            if new_sku != product.sku {
                let owner = self.store.product_id_by_sku(new_sku).await?;
                if owner.is_some_and(|owner| owner != id) {
                    return Ok(ItemResult::failed(Some(sku), SKU_TAKEN));
                }
                product.set_sku(new_sku);
                tracing::debug!("Product {}: SKU {} renamed to {}", id, sku, new_sku);
            }
        }

        let mut applied = fields::apply_scalar_fields(&item, &mut product);
        if fields::apply_on_sale(&item, &mut product) {
            applied.push("on_sale");
        }
        if fields::apply_media(&item, &mut product) {
            applied.push("images");
        }
        if fields::apply_categories(&item, &mut product) {
            applied.push("categories");
        }
        if self.apply_tags(&item, &mut product).await? {
            applied.push("tags");
        }
        tracing::debug!("Product {} ({}): applied {:?}", id, sku, applied);

        self.store.save_product(&product).await?;

        Ok(ItemResult::updated(id, sku))
    }

    /// A non-empty `tags` list replaces the tag set. Named tags are resolved
    /// (and created when missing) through the store.
    async fn apply_tags(&self, item: &UpdateRequestItem, product: &mut Product) -> AppResult<bool> {
        let Some(tags) = item.tags.as_ref().filter(|t| !t.is_empty()) else {
            return Ok(false);
        };

        let mut tag_ids: Vec<TagId> = Vec::with_capacity(tags.len());
        for tag in tags {
            match tag {
                TagRef { id: Some(id), .. } => tag_ids.push(*id),
                TagRef { name: Some(name), .. } if !name.is_empty() => {
                    tag_ids.push(self.store.tag_id_by_name_or_create(name).await?);
                }
                _ => {}
            }
        }

        product.set_tag_ids(tag_ids);
        Ok(true)
    }
}
