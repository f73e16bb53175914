//! Shopping list models
//!
//! Entries are derived from budget items. Only the `found` flag is state of
//! its own; every other field is copied from the item and its category.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::category::Category;
use super::ids::{CategoryId, ItemId};
use super::item::BudgetItem;
use super::money::Money;

/// Which budget items appear on the shopping list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ShoppablePolicy {
    /// Every item is shoppable
    #[default]
    AllItems,
    /// Items whose own `shoppable` flag is set
    FlaggedItems,
    /// Items in categories whose `shoppable` flag is set
    FlaggedCategories,
    /// Both the item and its category must be flagged
    FlaggedItemsInFlaggedCategories,
}

impl ShoppablePolicy {
    /// Decide whether `item`, filed under `category`, belongs on the list
    pub fn is_shoppable(&self, item: &BudgetItem, category: &Category) -> bool {
        match self {
            Self::AllItems => true,
            Self::FlaggedItems => item.shoppable,
            Self::FlaggedCategories => category.shoppable,
            Self::FlaggedItemsInFlaggedCategories => item.shoppable && category.shoppable,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AllItems => "all-items",
            Self::FlaggedItems => "flagged-items",
            Self::FlaggedCategories => "flagged-categories",
            Self::FlaggedItemsInFlaggedCategories => "flagged-items-in-flagged-categories",
        }
    }
}

impl fmt::Display for ShoppablePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShoppablePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all-items" | "all" => Ok(Self::AllItems),
            "flagged-items" | "items" => Ok(Self::FlaggedItems),
            "flagged-categories" | "categories" => Ok(Self::FlaggedCategories),
            "flagged-items-in-flagged-categories" | "both" => {
                Ok(Self::FlaggedItemsInFlaggedCategories)
            }
            other => Err(format!("Unknown shoppable policy: {}", other)),
        }
    }
}

/// One line on the shopping list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListEntry {
    pub item_id: ItemId,
    pub found: bool,
    pub category_id: CategoryId,
    pub category_name: String,
    pub label: String,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,
    pub planned: Money,
}

impl ShoppingListEntry {
    /// Build an entry with a fresh (not found) flag
    pub fn from_item(item: &BudgetItem, category: &Category) -> Self {
        let mut entry = Self {
            item_id: item.id,
            found: false,
            category_id: category.id,
            category_name: String::new(),
            label: String::new(),
            quantity: 0,
            store: None,
            planned: Money::zero(),
        };
        entry.refresh(item, category);
        entry
    }

    /// Re-copy display fields from the source item, keeping `found`
    pub fn refresh(&mut self, item: &BudgetItem, category: &Category) {
        self.category_id = category.id;
        self.category_name = category.name.clone();
        self.label = item.label.clone();
        self.quantity = item.quantity;
        self.store = item.store.clone();
        self.planned = item.planned;
    }
}

/// Entries of one category, in display order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingGroup {
    pub category: Category,
    pub entries: Vec<ShoppingListEntry>,
}

impl ShoppingGroup {
    /// Number of entries already found
    pub fn found_count(&self) -> usize {
        self.entries.iter().filter(|e| e.found).count()
    }
}

/// Found / total counts over the whole list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingProgress {
    pub found: usize,
    pub total: usize,
}

impl ShoppingProgress {
    pub fn remaining(&self) -> usize {
        self.total - self.found
    }

    pub fn is_complete(&self) -> bool {
        self.found == self.total
    }
}
