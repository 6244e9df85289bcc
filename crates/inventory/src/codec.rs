//! Wire codec for inventory records.
//!
//! The wire shape is a JSON object with exactly seven keys:
//! `id`, `sku`, `count`, `condition`, `restock_level`, `restock_amount`, `in_stock`.
//! `condition` is always the symbolic member name.

use serde_json::{json, Map, Value};

use stockkeep_core::{ValidationError, ValidationResult};

use crate::coerce;
use crate::item::InventoryItem;

/// Render a record as its wire object. Total: never fails.
pub fn encode(item: &InventoryItem) -> Value {
    json!({
        "id": item.id,
        "sku": item.sku,
        "count": item.count,
        "condition": item.condition,
        "restock_level": item.restock_level,
        "restock_amount": item.restock_amount,
        "in_stock": item.in_stock,
    })
}

/// Decode an arbitrary payload into a fresh (unpersisted) record.
///
/// Fields are checked in a fixed order (`sku`, `count`, `condition`,
/// `restock_level`, `restock_amount`, `in_stock`) and the first failure is
/// returned. Any `id` in the payload is ignored.
pub fn decode(payload: &Value) -> ValidationResult<InventoryItem> {
    let map = payload.as_object().ok_or_else(ValidationError::not_a_mapping)?;

    let sku = coerce::to_sku(required(map, "sku")?)?;
    let count = coerce::to_int("count", required(map, "count")?)?;
    let condition = coerce::to_condition(required(map, "condition")?)?;
    let restock_level = coerce::to_int("restock_level", required(map, "restock_level")?)?;
    let restock_amount = coerce::to_int("restock_amount", required(map, "restock_amount")?)?;
    let in_stock = coerce::to_bool("in_stock", required(map, "in_stock")?)?;

    Ok(InventoryItem::new(
        sku,
        count,
        condition,
        restock_level,
        restock_amount,
        in_stock,
    ))
}

fn required<'a>(map: &'a Map<String, Value>, field: &'static str) -> ValidationResult<&'a Value> {
    map.get(field).ok_or(ValidationError::MissingField(field))
}

impl InventoryItem {
    /// Overwrite every field except `id` from a wire payload.
    ///
    /// All-or-nothing: on error the record is left exactly as it was.
    pub fn apply_payload(&mut self, payload: &Value) -> ValidationResult<()> {
        let decoded = decode(payload)?;
        *self = InventoryItem {
            id: self.id,
            ..decoded
        };
        Ok(())
    }
}
