//! Inventory catalog model (read-only).
//!
//! The assistant never owns inventory state. Hosts load records from their
//! store, wrap them in a [`CatalogSnapshot`] and hand that to the query
//! pipeline; this crate only describes and validates those records.

pub mod item;
pub mod snapshot;

pub use item::{CatalogItem, Category, Condition, DEFAULT_MINIMUM_STOCK_LEVEL};
pub use snapshot::{CatalogSnapshot, ItemRef};
