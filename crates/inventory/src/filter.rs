//! List filtering.
//!
//! At most one predicate is active at a time. Precedence:
//! `sku` > `condition` > `in_stock` > none. Lower-precedence parameters are
//! ignored when a higher one is present.

use stockkeep_core::ValidationResult;

use crate::item::{Condition, InventoryItem};

/// Raw list parameters as supplied by the caller.
///
/// Empty `sku`/`condition` strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemQuery {
    pub sku: Option<String>,
    pub condition: Option<String>,
    pub in_stock: Option<bool>,
}

impl ItemQuery {
    pub fn by_sku(sku: impl Into<String>) -> Self {
        Self {
            sku: Some(sku.into()),
            ..Self::default()
        }
    }

    pub fn by_condition(condition: impl Into<String>) -> Self {
        Self {
            condition: Some(condition.into()),
            ..Self::default()
        }
    }

    pub fn by_in_stock(in_stock: bool) -> Self {
        Self {
            in_stock: Some(in_stock),
            ..Self::default()
        }
    }
}

/// The single predicate selected from an [`ItemQuery`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemFilter {
    All,
    /// Exact, case-sensitive SKU equality.
    BySku(String),
    ByCondition(Condition),
    ByInStock(bool),
}

impl ItemFilter {
    /// Select the highest-precedence predicate present in `query`.
    ///
    /// Fails only when the condition branch is selected and the value names
    /// no `Condition` member.
    pub fn from_query(query: &ItemQuery) -> ValidationResult<Self> {
        if let Some(sku) = query.sku.as_deref().filter(|s| !s.is_empty()) {
            return Ok(Self::BySku(sku.to_string()));
        }
        if let Some(condition) = query.condition.as_deref().filter(|s| !s.is_empty()) {
            return Ok(Self::ByCondition(condition.parse()?));
        }
        if let Some(in_stock) = query.in_stock {
            return Ok(Self::ByInStock(in_stock));
        }
        Ok(Self::All)
    }

    pub fn matches(&self, item: &InventoryItem) -> bool {
        match self {
            Self::All => true,
            Self::BySku(sku) => item.sku == *sku,
            Self::ByCondition(condition) => item.condition == *condition,
            Self::ByInStock(in_stock) => item.in_stock == *in_stock,
        }
    }

    /// Matching records, in input order.
    pub fn apply<'a, I>(&self, items: I) -> Vec<InventoryItem>
    where
        I: IntoIterator<Item = &'a InventoryItem>,
    {
        items
            .into_iter()
            .filter(|item| self.matches(item))
            .cloned()
            .collect()
    }
}

impl core::fmt::Display for ItemFilter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::BySku(sku) => write!(f, "sku={sku}"),
            Self::ByCondition(condition) => write!(f, "condition={condition}"),
            Self::ByInStock(in_stock) => write!(f, "in_stock={in_stock}"),
        }
    }
}

/// Filter `records` by the highest-precedence parameter in `query`.
pub fn filter(
    records: &[InventoryItem],
    query: &ItemQuery,
) -> ValidationResult<Vec<InventoryItem>> {
    Ok(ItemFilter::from_query(query)?.apply(records))
}
