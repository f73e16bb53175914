//! Budget item display formatting

use super::Currency;
use crate::models::{BudgetItem, Category};

/// Format items with their category names as a table
pub fn format_item_list(rows: &[(&BudgetItem, &Category)], currency: &Currency) -> String {
    if rows.is_empty() {
        return "No items found.".to_string();
    }

    let label_width = rows
        .iter()
        .map(|(item, _)| item.label.chars().count())
        .max()
        .unwrap_or(5)
        .max(5);
    let category_width = rows
        .iter()
        .map(|(_, category)| category.name.chars().count())
        .max()
        .unwrap_or(8)
        .max(8);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<label_width$}  {:<category_width$}  {:>3}  {:>12}  {:>12}\n",
        "ID",
        "Label",
        "Category",
        "Qty",
        "Planned",
        "Actual",
        label_width = label_width,
        category_width = category_width,
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<label_width$}  {:-<category_width$}  {:->3}  {:->12}  {:->12}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        label_width = label_width,
        category_width = category_width,
    ));

    for (item, category) in rows {
        output.push_str(&format!(
            "{:<12}  {:<label_width$}  {:<category_width$}  {:>3}  {:>12}  {:>12}\n",
            item.id.short(),
            item.label,
            category.name,
            item.quantity,
            currency.format(item.planned),
            currency.format(item.actual),
            label_width = label_width,
            category_width = category_width,
        ));
    }

    output
}

/// Format a single item's details
pub fn format_item_details(item: &BudgetItem, category: &Category, currency: &Currency) -> String {
    let mut output = String::new();

    output.push_str(&format!("Item: {}\n", item.label));
    output.push_str(&format!("  ID:         {}\n", item.id));
    output.push_str(&format!("  Category:   {}\n", category.name));
    output.push_str(&format!("  Planned:    {}\n", currency.format(item.planned)));
    output.push_str(&format!("  Actual:     {}\n", currency.format(item.actual)));
    output.push_str(&format!("  Remaining:  {}\n", currency.format(item.remaining())));
    output.push_str(&format!("  Quantity:   {}\n", item.quantity));
    if let Some(store) = &item.store {
        output.push_str(&format!("  Store:      {}\n", store));
    }
    output.push_str(&format!(
        "  Shoppable:  {}\n",
        if item.shoppable { "Yes" } else { "No" }
    ));
    if let Some(note) = &item.note {
        output.push_str(&format!("  Note:       {}\n", note));
    }
    output.push_str(&format!(
        "  Created:    {}\n",
        item.created_at.format("%Y-%m-%d %H:%M")
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, NewItem};

    #[test]
    fn test_item_table() {
        let category = Category::new("Groceries");
        let milk = BudgetItem::new(
            category.id,
            NewItem::new("Milk", Money::from_cents(450)).quantity(2),
        );
        let output = format_item_list(&[(&milk, &category)], &Currency::default());

        assert!(output.contains(&milk.id.short()));
        assert!(output.contains("Groceries"));
        assert!(output.contains("$4.50"));
        assert!(output.contains("$0.00"));
    }

    #[test]
    fn test_details_optional_fields() {
        let category = Category::new("Groceries");
        let plain = BudgetItem::new(category.id, NewItem::new("Bread", Money::from_cents(300)));
        let output = format_item_details(&plain, &category, &Currency::default());
        assert!(!output.contains("Store:"));
        assert!(!output.contains("Note:"));

        let detailed = BudgetItem::new(
            category.id,
            NewItem::new("Eggs", Money::from_cents(600))
                .store("Market")
                .note("free range"),
        );
        let output = format_item_details(&detailed, &category, &Currency::default());
        assert!(output.contains("Store:      Market"));
        assert!(output.contains("Note:       free range"));
    }
}
