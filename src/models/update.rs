//! Batch update-by-SKU request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use super::flexible;
use super::product::{ProductId, ProductStatus};
use crate::error::{AppError, AppResult};

pub const EMPTY_BODY_MESSAGE: &str = "at least one object with sku and data to update is required";
pub const SKU_NOT_SPECIFIED: &str = "SKU not specified";
pub const PRODUCT_NOT_FOUND: &str = "product not found";
pub const SKU_TAKEN: &str = "new SKU already exists on another product";
pub const PRODUCT_UPDATED: &str = "product updated successfully";

/// Gallery entry
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ImageRef {
    #[serde(default, deserialize_with = "flexible::opt_string")]
    pub src: Option<String>,
}

/// Category reference by id
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CategoryRef {
    #[serde(default, deserialize_with = "flexible::opt_i64")]
    pub id: Option<i64>,
}

/// Tag reference by id, or by name (created when missing)
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct TagRef {
    #[serde(default, deserialize_with = "flexible::opt_i64")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "flexible::opt_string")]
    pub name: Option<String>,
}

/// One product update. Only `sku` is required; every other field is applied
/// when present.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateRequestItem {
    #[serde(default, deserialize_with = "flexible::opt_string")]
    pub sku: Option<String>,
    #[serde(default, deserialize_with = "flexible::opt_string")]
    pub new_sku: Option<String>,
    #[serde(default, deserialize_with = "flexible::opt_string")]
    pub regular_price: Option<String>,
    /// Empty string clears the sale price
    #[serde(default, deserialize_with = "flexible::opt_string")]
    pub sale_price: Option<String>,
    #[serde(default, deserialize_with = "flexible::opt_i32")]
    pub stock_quantity: Option<i32>,
    #[serde(default, deserialize_with = "flexible::opt_bool")]
    pub manage_stock: Option<bool>,
    #[serde(default, deserialize_with = "flexible::opt_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "flexible::opt_string")]
    pub short_description: Option<String>,
    #[serde(default)]
    pub status: Option<ProductStatus>,
    #[serde(default, deserialize_with = "flexible::opt_bool")]
    pub featured: Option<bool>,
    #[serde(default, deserialize_with = "flexible::opt_datetime")]
    #[schema(value_type = Option<String>)]
    pub date_created: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "flexible::opt_datetime")]
    #[schema(value_type = Option<String>)]
    pub date_modified: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "flexible::opt_datetime")]
    #[schema(value_type = Option<String>)]
    pub date_on_sale_from: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "flexible::opt_datetime")]
    #[schema(value_type = Option<String>)]
    pub date_on_sale_to: Option<Option<DateTime<Utc>>>,
    /// `true` without `sale_price` puts the product on sale at its regular price
    #[serde(default, deserialize_with = "flexible::opt_bool")]
    pub on_sale: Option<bool>,
    /// Single image URL; takes precedence over `images`
    #[serde(default, deserialize_with = "flexible::opt_string")]
    pub image: Option<String>,
    /// Entries that are not objects with a readable `src` are ignored
    #[serde(default, deserialize_with = "flexible::opt_list")]
    pub images: Option<Vec<ImageRef>>,
    #[serde(default, deserialize_with = "flexible::opt_list")]
    pub categories: Option<Vec<CategoryRef>>,
    #[serde(default, deserialize_with = "flexible::opt_list")]
    pub tags: Option<Vec<TagRef>>,
}

impl UpdateRequestItem {
    /// Decode an item one field at a time. A field whose value cannot be read
    /// is left absent and its name returned alongside the item.
    pub fn from_fields(mut fields: Map<String, Value>) -> (Self, Vec<String>) {
        let mut skipped = Vec::new();
        fields.retain(|key, value| {
            let single = Map::from_iter([(key.clone(), value.clone())]);
            let readable = serde_json::from_value::<UpdateRequestItem>(Value::Object(single)).is_ok();
            if !readable {
                skipped.push(key.clone());
            }
            readable
        });

        let item = serde_json::from_value(Value::Object(fields)).unwrap_or_default();
        (item, skipped)
    }
}

/// Top-level request body: one item or an ordered list of items
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum BatchInput {
    Many(Vec<Value>),
    Single(Map<String, Value>),
}

impl BatchInput {
    /// Decode a raw request body. Empty, non-JSON, scalar and empty
    /// object/array bodies are rejected.
    pub fn parse(body: &[u8]) -> AppResult<Self> {
        let input: BatchInput = serde_json::from_slice(body)
            .map_err(|_| AppError::BadRequest(EMPTY_BODY_MESSAGE.to_string()))?;
        if input.is_empty() {
            return Err(AppError::BadRequest(EMPTY_BODY_MESSAGE.to_string()));
        }
        Ok(input)
    }

    pub fn is_empty(&self) -> bool {
        match self {
            BatchInput::Many(items) => items.is_empty(),
            BatchInput::Single(map) => map.is_empty(),
        }
    }

    /// Supply a SKU for a lone item (single object or one-element array)
    /// that carries none
    pub fn with_default_sku(mut self, sku: Option<&str>) -> Self {
        let Some(sku) = sku else {
            return self;
        };
        let lone = match &mut self {
            BatchInput::Single(map) => Some(map),
            BatchInput::Many(items) if items.len() == 1 => {
                items.first_mut().and_then(Value::as_object_mut)
            }
            BatchInput::Many(_) => None,
        };
        if let Some(map) = lone {
            if !map.contains_key("sku") {
                map.insert("sku".to_string(), Value::String(sku.to_string()));
            }
        }
        self
    }

    pub fn into_items(self) -> Vec<Value> {
        match self {
            BatchInput::Many(items) => items,
            BatchInput::Single(map) => vec![Value::Object(map)],
        }
    }
}

/// SKU an item asks to update, read before the rest of the item is decoded.
/// Empty strings, `"0"` and zero count as no SKU.
pub fn requested_sku(fields: &Map<String, Value>) -> Option<String> {
    match fields.get("sku")? {
        Value::String(s) if !s.is_empty() && s != "0" => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

/// Outcome of one item
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum ItemResult {
    Updated {
        message: String,
        id: ProductId,
        sku: String,
    },
    Failed {
        sku: Option<String>,
        error: String,
    },
}

impl ItemResult {
    pub fn updated(id: ProductId, sku: impl Into<String>) -> Self {
        ItemResult::Updated {
            message: PRODUCT_UPDATED.to_string(),
            id,
            sku: sku.into(),
        }
    }

    pub fn failed(sku: Option<String>, error: impl Into<String>) -> Self {
        ItemResult::Failed {
            sku,
            error: error.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ItemResult::Failed { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ItemResult::Failed { error, .. } => Some(error),
            ItemResult::Updated { .. } => None,
        }
    }
}

/// Summary of a batch call
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BatchResponse {
    pub updated: usize,
    pub failed: usize,
    pub results: Vec<ItemResult>,
}

impl From<Vec<ItemResult>> for BatchResponse {
    fn from(results: Vec<ItemResult>) -> Self {
        let failed = results.iter().filter(|r| r.is_failure()).count();
        Self {
            updated: results.len() - failed,
            failed,
            results,
        }
    }
}
