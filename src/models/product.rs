//! Product model as held by the catalog store.
//!
//! A `Product` is loaded from the store, mutated in memory through its setter
//! methods and written back with `CatalogStore::save_product`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

/// Internal numeric product identifier (distinct from the SKU)
pub type ProductId = i64;

/// Tag taxonomy term identifier
pub type TagId = i64;

/// Category taxonomy term identifier
pub type CategoryId = i64;

/// Publication status of a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Draft,
    Pending,
    Private,
    #[default]
    Publish,
    Future,
    Trash,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Draft => "draft",
            ProductStatus::Pending => "pending",
            ProductStatus::Private => "private",
            ProductStatus::Publish => "publish",
            ProductStatus::Future => "future",
            ProductStatus::Trash => "trash",
        }
    }
}

impl FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ProductStatus::Draft),
            "pending" => Ok(ProductStatus::Pending),
            "private" => Ok(ProductStatus::Private),
            "publish" => Ok(ProductStatus::Publish),
            "future" => Ok(ProductStatus::Future),
            "trash" => Ok(ProductStatus::Trash),
            other => Err(format!("unknown product status '{}'", other)),
        }
    }
}

/// Product record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Product {
    pub id: ProductId,
    pub sku: String,
    pub name: String,
    /// Decimal string as supplied by the caller; `None` when unset
    pub regular_price: Option<String>,
    pub sale_price: Option<String>,
    pub stock_quantity: Option<i32>,
    pub manage_stock: bool,
    pub description: String,
    pub short_description: String,
    pub status: ProductStatus,
    pub featured: bool,
    pub date_created: Option<DateTime<Utc>>,
    pub date_modified: Option<DateTime<Utc>>,
    pub date_on_sale_from: Option<DateTime<Utc>>,
    pub date_on_sale_to: Option<DateTime<Utc>>,
    /// Primary image reference
    pub image_id: Option<i64>,
    /// Ordered gallery image URLs
    pub gallery: Vec<String>,
    pub category_ids: Vec<CategoryId>,
    pub tag_ids: Vec<TagId>,
}

/// Empty price strings clear the price
fn price_value(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl Product {
    pub fn set_sku(&mut self, sku: &str) {
        self.sku = sku.to_string();
    }

    pub fn set_regular_price(&mut self, price: &str) {
        self.regular_price = price_value(price);
    }

    pub fn set_sale_price(&mut self, price: &str) {
        self.sale_price = price_value(price);
    }

    pub fn set_stock_quantity(&mut self, quantity: i32) {
        self.stock_quantity = Some(quantity);
    }

    pub fn set_manage_stock(&mut self, manage: bool) {
        self.manage_stock = manage;
    }

    pub fn set_description(&mut self, description: &str) {
        self.description = description.to_string();
    }

    pub fn set_short_description(&mut self, description: &str) {
        self.short_description = description.to_string();
    }

    pub fn set_status(&mut self, status: ProductStatus) {
        self.status = status;
    }

    pub fn set_featured(&mut self, featured: bool) {
        self.featured = featured;
    }

    pub fn set_date_created(&mut self, date: Option<DateTime<Utc>>) {
        self.date_created = date;
    }

    pub fn set_date_modified(&mut self, date: Option<DateTime<Utc>>) {
        self.date_modified = date;
    }

    pub fn set_date_on_sale_from(&mut self, date: Option<DateTime<Utc>>) {
        self.date_on_sale_from = date;
    }

    pub fn set_date_on_sale_to(&mut self, date: Option<DateTime<Utc>>) {
        self.date_on_sale_to = date;
    }

    /// Replace the image set with a single gallery entry, dropping the primary image
    pub fn replace_with_single_image(&mut self, url: String) {
        self.image_id = None;
        self.gallery = if url.is_empty() { Vec::new() } else { vec![url] };
    }

    pub fn set_gallery(&mut self, urls: Vec<String>) {
        self.gallery = urls;
    }

    pub fn set_category_ids(&mut self, ids: Vec<CategoryId>) {
        self.category_ids = ids;
    }

    pub fn set_tag_ids(&mut self, ids: Vec<TagId>) {
        self.tag_ids = ids;
    }
}
