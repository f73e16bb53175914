//! Shopping list CLI commands

use clap::Subcommand;

use super::resolve_item;
use crate::display::{format_shopping_list, Currency};
use crate::error::BasketResult;
use crate::models::ItemId;
use crate::services::Basket;

/// Shopping list subcommands
#[derive(Subcommand, Debug)]
pub enum ListCommands {
    /// Show the shopping list grouped by category
    Show,

    /// Mark an item as found
    Found {
        /// Item label or ID
        item: String,
    },

    /// Mark an item as not found
    Unfound {
        /// Item label or ID
        item: String,
    },

    /// Flip an item's found flag
    Toggle {
        /// Item label or ID
        item: String,
    },

    /// Reset every found flag for a new trip
    Clear,
}

impl ListCommands {
    pub fn modifies_data(&self) -> bool {
        !matches!(self, Self::Show)
    }
}

/// Handle a shopping list command
pub fn handle_list_command(
    basket: &mut Basket,
    currency: &Currency,
    cmd: ListCommands,
) -> BasketResult<()> {
    match cmd {
        ListCommands::Show => {
            let groups = basket.shopping_list();
            print!(
                "{}",
                format_shopping_list(&groups, &basket.shopping_progress(), currency)
            );
        }

        ListCommands::Found { item } => set_found(basket, &item, true)?,

        ListCommands::Unfound { item } => set_found(basket, &item, false)?,

        ListCommands::Toggle { item } => {
            let id = resolve_item(basket, &item)?;
            let found = basket.toggle_found(id)?;
            print_flag(basket, &item, found, id);
        }

        ListCommands::Clear => {
            let cleared = basket.clear_found();
            println!("Cleared {} found item(s)", cleared);
        }
    }

    Ok(())
}

fn set_found(basket: &mut Basket, item: &str, found: bool) -> BasketResult<()> {
    let id = resolve_item(basket, item)?;
    basket.mark_found(id, found)?;
    print_flag(basket, item, found, id);
    Ok(())
}

fn print_flag(basket: &Basket, fallback: &str, found: bool, id: ItemId) {
    let label = basket
        .store()
        .item(id)
        .map(|i| i.label.as_str())
        .unwrap_or(fallback);
    let progress = basket.shopping_progress();
    println!(
        "{} {} ({}/{} found)",
        if found { "Found:" } else { "Not found:" },
        label,
        progress.found,
        progress.total
    );
}
