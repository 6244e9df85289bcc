use core::str::FromStr;
use serde::Serialize;

use stockkeep_core::{Entity, InventoryItemId, ValidationError};

/// Maximum SKU length in bytes (matches the `VARCHAR(63)` column).
pub const SKU_MAX_LEN: usize = 63;

/// Physical condition of a stocked item.
///
/// Stored and transmitted by symbolic name (`"New"`, `"Used"`, `"OpenBox"`),
/// never by ordinal.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Condition {
    #[default]
    New,
    Used,
    OpenBox,
}

impl Condition {
    pub const ALL: [Condition; 3] = [Condition::New, Condition::Used, Condition::OpenBox];

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::New => "New",
            Condition::Used => "Used",
            Condition::OpenBox => "OpenBox",
        }
    }
}

impl core::fmt::Display for Condition {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Condition {
    type Err = ValidationError;

    /// Exact, case-sensitive match against the member names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Condition::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ValidationError::invalid_enum("condition", s))
    }
}

/// A stock-keeping record.
///
/// `id` is `None` until the store assigns one on create; callers cannot set it
/// directly; repositories attach it through [`InventoryItem::with_id`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InventoryItem {
    pub(crate) id: Option<InventoryItemId>,
    pub sku: String,
    pub count: i32,
    pub condition: Condition,
    pub restock_level: i32,
    pub restock_amount: i32,
    pub in_stock: bool,
}

impl InventoryItem {
    pub fn new(
        sku: impl Into<String>,
        count: i32,
        condition: Condition,
        restock_level: i32,
        restock_amount: i32,
        in_stock: bool,
    ) -> Self {
        Self {
            id: None,
            sku: sku.into(),
            count,
            condition,
            restock_level,
            restock_amount,
            in_stock,
        }
    }

    /// Attach a store-assigned identifier.
    pub fn with_id(mut self, id: InventoryItemId) -> Self {
        self.id = Some(id);
        self
    }

    /// Copy of this record with the identifier cleared.
    pub fn without_id(&self) -> Self {
        Self {
            id: None,
            ..self.clone()
        }
    }
}

impl Entity for InventoryItem {
    type Id = InventoryItemId;

    fn id(&self) -> Option<InventoryItemId> {
        self.id
    }
}

impl core::fmt::Display for InventoryItem {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.id {
            Some(id) => write!(f, "<Inventory item {} id={}>", self.sku, id),
            None => write!(f, "<Inventory item {} id=None>", self.sku),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn condition_parses_exact_names_only() {
        assert_eq!("New".parse::<Condition>(), Ok(Condition::New));
        assert_eq!("OpenBox".parse::<Condition>(), Ok(Condition::OpenBox));
        assert_eq!(
            "new".parse::<Condition>(),
            Err(ValidationError::invalid_enum("condition", "new"))
        );
        assert!("Refurbished".parse::<Condition>().is_err());
    }

    #[test]
    fn condition_serializes_by_name() {
        assert_eq!(serde_json::to_value(Condition::OpenBox).unwrap(), "OpenBox");
    }

    #[test]
    fn display_shows_sku_and_id() {
        let item = InventoryItem::new("FAKE1234", 10, Condition::New, 2, 20, true);
        assert_eq!(item.to_string(), "<Inventory item FAKE1234 id=None>");
        assert!(!item.is_persisted());

        let item = item.with_id(InventoryItemId::new(7));
        assert_eq!(item.to_string(), "<Inventory item FAKE1234 id=7>");
        assert_eq!(item.id(), Some(InventoryItemId::new(7)));
        assert_eq!(item.without_id().id(), None);
    }
}
