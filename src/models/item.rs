//! Budget item model
//!
//! A budget item is a single planned/actual expense line belonging to exactly
//! one category. It stores the category's ID, never a copy of its data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, ItemId};
use super::money::Money;

/// Maximum length of an item label
pub const MAX_LABEL_LEN: usize = 100;

/// Largest amount accepted anywhere, in whole currency units
///
/// Keeps every sum of items far from the decimal range limit.
pub const MAX_AMOUNT_UNITS: i64 = 1_000_000_000_000;

/// A budget line item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetItem {
    /// Unique identifier
    pub id: ItemId,

    /// The category this item belongs to
    pub category_id: CategoryId,

    /// What is being bought (e.g., "Milk")
    pub label: String,

    /// Planned amount for the whole line
    pub planned: Money,

    /// Amount actually spent so far
    #[serde(default)]
    pub actual: Money,

    /// Free-form note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// How many units to buy; informational, `planned` is already the line total
    #[serde(default = "default_quantity")]
    pub quantity: u32,

    /// Where to buy it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,

    /// Explicit shopping-list marker, used by flag-based shoppable policies
    #[serde(default = "default_true")]
    pub shoppable: bool,

    /// When the item was created
    pub created_at: DateTime<Utc>,

    /// When the item was last modified
    pub updated_at: DateTime<Utc>,
}

fn default_quantity() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

impl BudgetItem {
    /// Create a new item from validated input
    pub fn new(category_id: CategoryId, input: NewItem) -> Self {
        let now = Utc::now();
        Self {
            id: ItemId::new(),
            category_id,
            label: input.label.trim().to_string(),
            planned: input.planned,
            actual: input.actual,
            note: input.note.filter(|n| !n.trim().is_empty()),
            quantity: input.quantity,
            store: input.store.filter(|s| !s.trim().is_empty()),
            shoppable: input.shoppable,
            created_at: now,
            updated_at: now,
        }
    }

    /// Validate the item
    pub fn validate(&self) -> Result<(), ItemValidationError> {
        validate_label(&self.label)?;
        validate_amount("planned", self.planned)?;
        validate_amount("actual", self.actual)?;
        Ok(())
    }

    /// Remaining planned amount not yet spent (negative when overspent)
    pub fn remaining(&self) -> Money {
        self.planned - self.actual
    }
}

impl fmt::Display for BudgetItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Check an item label
pub fn validate_label(label: &str) -> Result<(), ItemValidationError> {
    if label.trim().is_empty() {
        return Err(ItemValidationError::EmptyLabel);
    }
    let len = label.chars().count();
    if len > MAX_LABEL_LEN {
        return Err(ItemValidationError::LabelTooLong(len));
    }
    Ok(())
}

/// Check that an amount is neither negative nor above [`MAX_AMOUNT_UNITS`]
pub fn validate_amount(field: &'static str, amount: Money) -> Result<(), ItemValidationError> {
    if amount.is_negative() {
        return Err(ItemValidationError::NegativeAmount(field));
    }
    if amount > Money::from_cents(MAX_AMOUNT_UNITS * 100) {
        return Err(ItemValidationError::AmountTooLarge(field));
    }
    Ok(())
}

/// Input for creating an item
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub label: String,
    pub planned: Money,
    pub actual: Money,
    pub note: Option<String>,
    pub quantity: u32,
    pub store: Option<String>,
    pub shoppable: bool,
}

impl NewItem {
    /// An item with only a label and planned amount; everything else defaulted
    pub fn new(label: impl Into<String>, planned: Money) -> Self {
        Self {
            label: label.into(),
            planned,
            actual: Money::zero(),
            note: None,
            quantity: 1,
            store: None,
            shoppable: true,
        }
    }

    pub fn actual(mut self, actual: Money) -> Self {
        self.actual = actual;
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn store(mut self, store: impl Into<String>) -> Self {
        self.store = Some(store.into());
        self
    }

    pub fn shoppable(mut self, shoppable: bool) -> Self {
        self.shoppable = shoppable;
        self
    }
}

/// Partial update for an item; `None` leaves a field untouched.
///
/// `note` and `store` use a nested option so they can be cleared:
/// `Some(None)` removes the value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPatch {
    pub category_id: Option<CategoryId>,
    pub label: Option<String>,
    pub planned: Option<Money>,
    pub actual: Option<Money>,
    pub note: Option<Option<String>>,
    pub quantity: Option<u32>,
    pub store: Option<Option<String>>,
    pub shoppable: Option<bool>,
}

impl ItemPatch {
    /// Whether the patch touches any field
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether applying the patch can change category or grand totals
    pub fn touches_totals(&self) -> bool {
        self.category_id.is_some() || self.planned.is_some() || self.actual.is_some()
    }
}

/// Validation errors for items
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemValidationError {
    EmptyLabel,
    LabelTooLong(usize),
    NegativeAmount(&'static str),
    AmountTooLarge(&'static str),
}

impl fmt::Display for ItemValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLabel => write!(f, "Item label cannot be empty"),
            Self::LabelTooLong(len) => {
                write!(f, "Item label too long ({} chars, max {})", len, MAX_LABEL_LEN)
            }
            Self::NegativeAmount(field) => write!(f, "The {} amount cannot be negative", field),
            Self::AmountTooLarge(field) => write!(
                f,
                "The {} amount is too large (max {})",
                field,
                Money::from_cents(MAX_AMOUNT_UNITS * 100)
            ),
        }
    }
}

impl std::error::Error for ItemValidationError {}
