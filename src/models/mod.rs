//! Data models for the SKU sync server

pub mod flexible;
pub mod product;
pub mod update;

// Re-export commonly used types
pub use product::{Product, ProductId, ProductStatus, TagId};
pub use update::{BatchInput, BatchResponse, ItemResult, UpdateRequestItem};
