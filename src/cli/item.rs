//! Budget item CLI commands

use clap::Subcommand;

use super::{parse_amount, resolve_category, resolve_item};
use crate::display::{format_item_details, format_item_list, Currency};
use crate::error::{BasketError, BasketResult};
use crate::models::item::validate_amount;
use crate::models::{ItemPatch, NewItem};
use crate::services::Basket;

/// Item subcommands
#[derive(Subcommand, Debug)]
pub enum ItemCommands {
    /// Add a budget item, creating its category if needed
    Add {
        /// What is being bought
        label: String,
        /// Planned amount for the whole line (e.g., "4.50")
        planned: String,
        /// Category name
        #[arg(short, long)]
        category: String,
        /// Amount already spent
        #[arg(short, long)]
        actual: Option<String>,
        /// Number of units
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
        /// Where to buy it
        #[arg(short, long)]
        store: Option<String>,
        /// Free-form note
        #[arg(short, long)]
        note: Option<String>,
        /// Keep the item off the shopping list under flag-based policies
        #[arg(long)]
        not_shoppable: bool,
    },

    /// List budget items
    List {
        /// Only items in this category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show item details
    Show {
        /// Item label or ID
        item: String,
    },

    /// Edit an item
    Edit {
        /// Item label or ID
        item: String,
        /// New label
        #[arg(short, long)]
        label: Option<String>,
        /// New planned amount
        #[arg(short, long)]
        planned: Option<String>,
        /// New actual amount
        #[arg(short, long)]
        actual: Option<String>,
        /// Move to another category (name or ID)
        #[arg(short, long)]
        category: Option<String>,
        /// New quantity
        #[arg(short, long)]
        quantity: Option<u32>,
        /// New store
        #[arg(short, long, conflicts_with = "clear_store")]
        store: Option<String>,
        /// Remove the store
        #[arg(long)]
        clear_store: bool,
        /// New note
        #[arg(short, long, conflicts_with = "clear_note")]
        note: Option<String>,
        /// Remove the note
        #[arg(long)]
        clear_note: bool,
        /// Whether the item belongs on the shopping list
        #[arg(long)]
        shoppable: Option<bool>,
    },

    /// Record spending against an item
    Spend {
        /// Item label or ID
        item: String,
        /// Amount spent, added to the actual amount
        amount: String,
    },

    /// Delete an item
    Delete {
        /// Item label or ID
        item: String,
    },
}

impl ItemCommands {
    pub fn modifies_data(&self) -> bool {
        !matches!(self, Self::List { .. } | Self::Show { .. })
    }
}

/// Handle an item command
pub fn handle_item_command(
    basket: &mut Basket,
    currency: &Currency,
    cmd: ItemCommands,
) -> BasketResult<()> {
    match cmd {
        ItemCommands::Add {
            label,
            planned,
            category,
            actual,
            quantity,
            store,
            note,
            not_shoppable,
        } => {
            let mut input = NewItem::new(label, parse_amount("planned", &planned)?)
                .quantity(quantity)
                .shoppable(!not_shoppable);
            if let Some(actual) = actual {
                input = input.actual(parse_amount("actual", &actual)?);
            }
            if let Some(store) = store {
                input = input.store(store);
            }
            if let Some(note) = note {
                input = input.note(note);
            }

            let id = basket.add_item_in_category_named(&category, input)?;
            if let Some(item) = basket.store().item(id) {
                println!("Added item: {} ({})", item.label, currency.format(item.planned));
                println!("  ID: {}", id);
            }
        }

        ItemCommands::List { category } => {
            let store = basket.store();
            let filter = category
                .as_deref()
                .map(|c| resolve_category(basket, c))
                .transpose()?;

            let mut rows = Vec::new();
            for cat in store.categories() {
                if filter.is_some_and(|id| id != cat.id) {
                    continue;
                }
                for item in store.items_in_category(cat.id) {
                    rows.push((item, cat));
                }
            }
            print!("{}", format_item_list(&rows, currency));
            if !rows.is_empty() {
                println!();
            }
        }

        ItemCommands::Show { item } => {
            let found = basket.store().find_item(&item)?;
            let category = basket
                .store()
                .category(found.category_id)
                .ok_or_else(|| BasketError::category_not_found(found.category_id.to_string()))?;
            print!("{}", format_item_details(found, category, currency));
        }

        ItemCommands::Edit {
            item,
            label,
            planned,
            actual,
            category,
            quantity,
            store,
            clear_store,
            note,
            clear_note,
            shoppable,
        } => {
            let id = resolve_item(basket, &item)?;
            let patch = ItemPatch {
                category_id: category
                    .as_deref()
                    .map(|c| resolve_category(basket, c))
                    .transpose()?,
                label,
                planned: planned.map(|p| parse_amount("planned", &p)).transpose()?,
                actual: actual.map(|a| parse_amount("actual", &a)).transpose()?,
                note: if clear_note { Some(None) } else { note.map(Some) },
                quantity,
                store: if clear_store { Some(None) } else { store.map(Some) },
                shoppable,
            };

            if patch.is_empty() {
                println!("No changes specified. See 'basket item edit --help'.");
                return Ok(());
            }

            basket.update_item(id, patch)?;
            if let Some(updated) = basket.store().item(id) {
                println!("Updated item: {}", updated.label);
            }
        }

        ItemCommands::Spend { item, amount } => {
            let id = resolve_item(basket, &item)?;
            let spent = parse_amount("spent", &amount)?;
            validate_amount("spent", spent).map_err(|e| BasketError::Validation(e.to_string()))?;
            let current = basket
                .store()
                .item(id)
                .map(|i| i.actual)
                .ok_or_else(|| BasketError::item_not_found(item.clone()))?;

            basket.update_item(
                id,
                ItemPatch {
                    actual: Some(current + spent),
                    ..Default::default()
                },
            )?;
            if let Some(updated) = basket.store().item(id) {
                println!(
                    "Recorded {} on {} (spent {} of {})",
                    currency.format(spent),
                    updated.label,
                    currency.format(updated.actual),
                    currency.format(updated.planned)
                );
            }
        }

        ItemCommands::Delete { item } => {
            let id = resolve_item(basket, &item)?;
            let label = basket
                .store()
                .item(id)
                .map(|i| i.label.clone())
                .unwrap_or(item);
            basket.delete_item(id)?;
            println!("Deleted item: {}", label);
        }
    }

    Ok(())
}
