//! Category model
//!
//! Categories group budget items and shopping list entries. They are owned by
//! the budget store; items refer to them by ID only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;

/// Maximum length of a category name
pub const MAX_CATEGORY_NAME_LEN: usize = 50;

/// A named grouping for budget items (e.g., "Groceries", "Household")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name
    pub name: String,

    /// Sort key for display; duplicates are allowed
    pub sort_order: i32,

    /// Whether items in this category appear on the shopping list
    /// (consulted only by category-based shoppable policies)
    #[serde(default = "default_true")]
    pub shoppable: bool,

    /// When the category was created
    pub created_at: DateTime<Utc>,

    /// When the category was last modified
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

impl Category {
    /// Create a new category
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryId::new(),
            name: name.into(),
            sort_order: 0,
            shoppable: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a new category with a specific sort order
    pub fn with_sort_order(name: impl Into<String>, sort_order: i32) -> Self {
        let mut category = Self::new(name);
        category.sort_order = sort_order;
        category
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        validate_category_name(&self.name)
    }
}

/// Check a category name without constructing a category
pub fn validate_category_name(name: &str) -> Result<(), CategoryValidationError> {
    if name.trim().is_empty() {
        return Err(CategoryValidationError::EmptyName);
    }

    let len = name.chars().count();
    if len > MAX_CATEGORY_NAME_LEN {
        return Err(CategoryValidationError::NameTooLong(len));
    }

    Ok(())
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Partial update for a category; `None` leaves a field untouched
#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub sort_order: Option<i32>,
    pub shoppable: Option<bool>,
}

impl CategoryPatch {
    /// Whether the patch touches any field
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.sort_order.is_none() && self.shoppable.is_none()
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => write!(
                f,
                "Category name too long ({} chars, max {})",
                len, MAX_CATEGORY_NAME_LEN
            ),
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category() {
        let category = Category::new("Groceries");
        assert_eq!(category.name, "Groceries");
        assert_eq!(category.sort_order, 0);
        assert!(category.shoppable);
    }

    #[test]
    fn test_category_validation() {
        let mut category = Category::with_sort_order("Valid", 3);
        assert!(category.validate().is_ok());

        category.name = "   ".to_string();
        assert_eq!(category.validate(), Err(CategoryValidationError::EmptyName));

        category.name = "a".repeat(51);
        assert!(matches!(
            category.validate(),
            Err(CategoryValidationError::NameTooLong(51))
        ));
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(CategoryPatch::default().is_empty());
        let patch = CategoryPatch {
            sort_order: Some(2),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_missing_shoppable_defaults_true() {
        let category = Category::new("Household");
        let mut json = serde_json::to_value(&category).unwrap();
        json.as_object_mut().unwrap().remove("shoppable");
        let restored: Category = serde_json::from_value(json).unwrap();
        assert!(restored.shoppable);
        assert_eq!(restored.id, category.id);
    }
}
