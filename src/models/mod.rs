//! Core data models for basket
//!
//! This module contains the data structures of the budgeting domain:
//! categories, budget items, derived totals and shopping list entries.

pub mod category;
pub mod ids;
pub mod item;
pub mod money;
pub mod shopping;
pub mod totals;

pub use category::{Category, CategoryPatch};
pub use ids::{CategoryId, ItemId};
pub use item::{BudgetItem, ItemPatch, NewItem};
pub use money::Money;
pub use shopping::{ShoppablePolicy, ShoppingGroup, ShoppingListEntry, ShoppingProgress};
pub use totals::{BudgetStatus, CategoryTotal, GrandTotal};
