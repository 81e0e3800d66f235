//! API handlers for the SKU sync REST endpoints

pub mod health;
pub mod openapi;
pub mod products;
