use stockkeep_core::{ValidationError, ValidationResult};
use stockkeep_inventory::{coerce, ItemQuery};

// -------------------------
// Request DTOs
// -------------------------

/// Raw `GET /inventories` query string. Everything arrives as text; the
/// `in_stock` flag is parsed with the same rules as the payload field.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ListInventoryQuery {
    pub sku: Option<String>,
    pub condition: Option<String>,
    pub in_stock: Option<String>,
}

impl ListInventoryQuery {
    /// Collect the known keys from decoded query pairs.
    ///
    /// A repeated key keeps its first value; unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "sku" => &mut query.sku,
                "condition" => &mut query.condition,
                "in_stock" => &mut query.in_stock,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }

    pub fn into_item_query(self) -> ValidationResult<ItemQuery> {
        let in_stock = match self.in_stock.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(
                coerce::parse_bool(raw).ok_or_else(|| ValidationError::invalid_type("in_stock"))?,
            ),
        };
        Ok(ItemQuery {
            sku: self.sku,
            condition: self.condition,
            in_stock,
        })
    }
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn index_json() -> serde_json::Value {
    serde_json::json!({
        "name": "Inventory REST API Service",
        "version": env!("CARGO_PKG_VERSION"),
        "paths": {
            "inventories": "/inventories",
        },
    })
}
