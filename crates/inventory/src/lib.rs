//! Inventory domain module.
//!
//! This crate contains the business rules for inventory records, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage):
//! - `codec`: wire payload <-> `InventoryItem`
//! - `coerce`: per-field typed coercion used by the codec and query parsing
//! - `filter`: single-predicate list filtering

pub mod codec;
pub mod coerce;
pub mod filter;
pub mod item;

pub use codec::{decode, encode};
pub use filter::{filter, ItemFilter, ItemQuery};
pub use item::{Condition, InventoryItem, SKU_MAX_LEN};
