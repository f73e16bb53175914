//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the basket facade.

pub mod budget;
pub mod category;
pub mod export;
pub mod init;
pub mod item;
pub mod list;

pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use export::{handle_export_command, ExportCommands, ExportFormat};
pub use init::populate_sample_data;
pub use item::{handle_item_command, ItemCommands};
pub use list::{handle_list_command, ListCommands};

use crate::error::{BasketError, BasketResult};
use crate::models::{CategoryId, ItemId, Money};
use crate::services::Basket;

/// Parse a user-supplied amount such as "4.50" or "$1,200"
pub(crate) fn parse_amount(field: &str, input: &str) -> BasketResult<Money> {
    Money::parse(input)
        .map_err(|e| BasketError::Validation(format!("Invalid {} amount: {}", field, e)))
}

/// Resolve a category by name or ID
pub(crate) fn resolve_category(basket: &Basket, identifier: &str) -> BasketResult<CategoryId> {
    basket
        .store()
        .find_category(identifier)
        .map(|c| c.id)
}

/// Resolve an item by label or ID
pub(crate) fn resolve_item(basket: &Basket, identifier: &str) -> BasketResult<ItemId> {
    basket.store().find_item(identifier).map(|i| i.id)
}
