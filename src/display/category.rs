//! Category display formatting
//!
//! Formats per-category totals as a table and single categories as a card.

use super::Currency;
use crate::models::{Category, CategoryTotal, GrandTotal};

/// Format category totals as a table with a grand total row
pub fn format_category_totals(
    totals: &[CategoryTotal],
    grand: &GrandTotal,
    currency: &Currency,
) -> String {
    if totals.is_empty() {
        return "No categories found.\n\nRun 'basket category add <NAME>' to create one.\n"
            .to_string();
    }

    let name_width = totals
        .iter()
        .map(|t| t.category_name.chars().count())
        .max()
        .unwrap_or(8)
        .max(8);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:>5}  {:>12}  {:>12}  {:>12}\n",
        "Category",
        "Items",
        "Planned",
        "Actual",
        "Remaining",
        name_width = name_width,
    ));
    output.push_str(&separator(name_width));

    for total in totals {
        output.push_str(&format!(
            "{:<name_width$}  {:>5}  {:>12}  {:>12}  {:>12}\n",
            total.category_name,
            total.item_count,
            currency.format(total.planned),
            currency.format(total.actual),
            currency.format(total.remaining()),
            name_width = name_width,
        ));
    }

    output.push_str(&separator(name_width));
    output.push_str(&format!(
        "{:<name_width$}  {:>5}  {:>12}  {:>12}  {:>12}\n",
        "TOTAL",
        grand.item_count,
        currency.format(grand.planned),
        currency.format(grand.actual),
        currency.format(grand.remaining()),
        name_width = name_width,
    ));

    output
}

fn separator(name_width: usize) -> String {
    format!(
        "{:-<name_width$}  {:->5}  {:->12}  {:->12}  {:->12}\n",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
    )
}

/// Format a single category's details
pub fn format_category_details(
    category: &Category,
    total: &CategoryTotal,
    currency: &Currency,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Category: {}\n", category.name));
    output.push_str(&format!("  ID:         {}\n", category.id));
    output.push_str(&format!("  Order:      {}\n", category.sort_order));
    output.push_str(&format!(
        "  Shoppable:  {}\n",
        if category.shoppable { "Yes" } else { "No" }
    ));
    output.push_str(&format!("  Items:      {}\n", total.item_count));
    output.push_str(&format!("  Planned:    {}\n", currency.format(total.planned)));
    output.push_str(&format!("  Actual:     {}\n", currency.format(total.actual)));
    output.push_str(&format!("  Remaining:  {}\n", currency.format(total.remaining())));

    output
}
