//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::Serialize;

/// Identifier of an inventory item, assigned by the store on create.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct InventoryItemId(i64);

impl InventoryItemId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for InventoryItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for InventoryItemId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<InventoryItemId> for i64 {
    fn from(value: InventoryItemId) -> Self {
        value.0
    }
}

impl FromStr for InventoryItemId {
    type Err = core::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_displays_as_plain_integer() {
        let id: InventoryItemId = "42".parse().unwrap();
        assert_eq!(id.get(), 42);
        assert_eq!(id.to_string(), "42");
        assert!("abc".parse::<InventoryItemId>().is_err());
    }

    #[test]
    fn serializes_as_bare_number() {
        let json = serde_json::to_value(InventoryItemId::new(42)).unwrap();
        assert_eq!(json, serde_json::json!(42));
    }
}
