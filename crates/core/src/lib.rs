//! `stockquest-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! the error model, string-backed identifiers and the `Money` value object.

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::{Entity, find_by_id, upsert};
pub use error::{DomainError, DomainResult};
pub use id::{BinId, Sku, StockItemId};
pub use value_object::{Money, ValueObject};
