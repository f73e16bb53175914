//! CSV export of budget items and the shopping list

use std::io::Write;

use crate::error::{BasketError, BasketResult};
use crate::services::Basket;

fn export_err(e: impl std::fmt::Display) -> BasketError {
    BasketError::Export(e.to_string())
}

/// Export every budget item, in category display order
pub fn export_items_csv<W: Write>(basket: &Basket, writer: W) -> BasketResult<()> {
    let store = basket.store();
    let precision = store.precision();
    let mut csv = ::csv::Writer::from_writer(writer);

    csv.write_record([
        "ID", "Category", "Label", "Quantity", "Store", "Planned", "Actual", "Note",
    ])
    .map_err(export_err)?;

    for category in store.categories() {
        for item in store.items_in_category(category.id) {
            csv.write_record([
                item.id.as_uuid().to_string().as_str(),
                category.name.as_str(),
                item.label.as_str(),
                item.quantity.to_string().as_str(),
                item.store.as_deref().unwrap_or(""),
                item.planned.format_with("", precision).as_str(),
                item.actual.format_with("", precision).as_str(),
                item.note.as_deref().unwrap_or(""),
            ])
            .map_err(export_err)?;
        }
    }

    csv.flush().map_err(export_err)?;
    Ok(())
}

/// Export the shopping list as it is displayed
pub fn export_shopping_list_csv<W: Write>(basket: &Basket, writer: W) -> BasketResult<()> {
    let precision = basket.store().precision();
    let mut csv = ::csv::Writer::from_writer(writer);

    csv.write_record(["Category", "Label", "Quantity", "Store", "Planned", "Found"])
        .map_err(export_err)?;

    for group in basket.shopping_list() {
        for entry in &group.entries {
            csv.write_record([
                entry.category_name.as_str(),
                entry.label.as_str(),
                entry.quantity.to_string().as_str(),
                entry.store.as_deref().unwrap_or(""),
                entry.planned.format_with("", precision).as_str(),
                if entry.found { "true" } else { "false" },
            ])
            .map_err(export_err)?;
        }
    }

    csv.flush().map_err(export_err)?;
    Ok(())
}
