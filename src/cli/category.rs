//! Category CLI commands

use clap::Subcommand;

use super::resolve_category;
use crate::display::{format_category_details, format_category_totals, Currency};
use crate::error::BasketResult;
use crate::models::CategoryPatch;
use crate::services::Basket;

/// Category subcommands
#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// List categories with their totals
    List,

    /// Create a new category
    #[command(alias = "create")]
    Add {
        /// Category name
        name: String,
        /// Display position (defaults to last)
        #[arg(short, long)]
        order: Option<i32>,
    },

    /// Show category details
    Show {
        /// Category name or ID
        category: String,
    },

    /// Edit a category
    Edit {
        /// Category name or ID
        category: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New display position
        #[arg(short, long)]
        order: Option<i32>,
        /// Whether the category's items belong on the shopping list
        #[arg(long)]
        shoppable: Option<bool>,
    },

    /// Delete a category
    Delete {
        /// Category name or ID
        category: String,
        /// Also delete the category's items
        #[arg(long, conflicts_with = "keep_items")]
        cascade: bool,
        /// Refuse to delete while items remain, whatever the configured default
        #[arg(long)]
        keep_items: bool,
    },
}

impl CategoryCommands {
    pub fn modifies_data(&self) -> bool {
        !matches!(self, Self::List | Self::Show { .. })
    }
}

/// Handle a category command
pub fn handle_category_command(
    basket: &mut Basket,
    currency: &Currency,
    cmd: CategoryCommands,
) -> BasketResult<()> {
    match cmd {
        CategoryCommands::List => {
            let totals = basket.category_totals();
            print!(
                "{}",
                format_category_totals(&totals, &basket.grand_total(), currency)
            );
        }

        CategoryCommands::Add { name, order } => {
            let id = basket.create_category(&name, order)?;
            let category = basket.store().category(id);
            println!(
                "Created category: {}",
                category.map(|c| c.name.as_str()).unwrap_or(name.trim())
            );
            println!("  ID: {}", id);
        }

        CategoryCommands::Show { category } => {
            let id = resolve_category(basket, &category)?;
            let total = basket.store().category_total(id)?;
            if let Some(cat) = basket.store().category(id) {
                print!("{}", format_category_details(cat, &total, currency));
            }
        }

        CategoryCommands::Edit {
            category,
            name,
            order,
            shoppable,
        } => {
            let id = resolve_category(basket, &category)?;
            let patch = CategoryPatch {
                name,
                sort_order: order,
                shoppable,
            };

            if patch.is_empty() {
                println!("No changes specified. Use --name, --order, or --shoppable.");
                return Ok(());
            }

            basket.update_category(id, patch)?;
            if let Some(updated) = basket.store().category(id) {
                println!("Updated category: {}", updated.name);
            }
        }

        CategoryCommands::Delete {
            category,
            cascade,
            keep_items,
        } => {
            let id = resolve_category(basket, &category)?;
            let name = basket
                .store()
                .category(id)
                .map(|c| c.name.clone())
                .unwrap_or(category);
            let item_count = basket.store().items_in_category(id).count();

            if cascade {
                basket.delete_category(id, true)?;
            } else if keep_items {
                basket.delete_category(id, false)?;
            } else {
                basket.delete_category_default(id)?;
            }

            if item_count > 0 {
                println!("Deleted category: {} ({} items removed)", name, item_count);
            } else {
                println!("Deleted category: {}", name);
            }
        }
    }

    Ok(())
}
