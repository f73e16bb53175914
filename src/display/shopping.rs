//! Shopping list display formatting
//!
//! One block per category; found entries are checked off.

use super::Currency;
use crate::models::{ShoppingGroup, ShoppingProgress};

/// Format the grouped shopping list with a progress footer
pub fn format_shopping_list(
    groups: &[ShoppingGroup],
    progress: &ShoppingProgress,
    currency: &Currency,
) -> String {
    if groups.is_empty() {
        return "Shopping list is empty.\n".to_string();
    }

    let label_width = groups
        .iter()
        .flat_map(|g| g.entries.iter())
        .map(|e| e.label.chars().count() + quantity_suffix(e.quantity).len())
        .max()
        .unwrap_or(0);

    let mut output = String::new();

    for (i, group) in groups.iter().enumerate() {
        output.push_str(&format!(
            "{} ({}/{})\n",
            group.category.name,
            group.found_count(),
            group.entries.len()
        ));

        for entry in &group.entries {
            let mark = if entry.found { "[x]" } else { "[ ]" };
            let label = format!("{}{}", entry.label, quantity_suffix(entry.quantity));
            let store = entry
                .store
                .as_deref()
                .map(|s| format!("  @ {}", s))
                .unwrap_or_default();

            output.push_str(&format!(
                "  {} {:<label_width$}  {:>10}  {}{}\n",
                mark,
                label,
                currency.format(entry.planned),
                entry.item_id.short(),
                store,
                label_width = label_width,
            ));
        }

        if i < groups.len() - 1 {
            output.push('\n');
        }
    }

    output.push_str(&format!(
        "\nFound {} of {} ({} to go)\n",
        progress.found,
        progress.total,
        progress.remaining()
    ));

    output
}

fn quantity_suffix(quantity: u32) -> String {
    if quantity > 1 {
        format!(" x{}", quantity)
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money, ShoppingListEntry};

    fn entry(category: &Category, label: &str, found: bool) -> ShoppingListEntry {
        let item = crate::models::BudgetItem::new(
            category.id,
            crate::models::NewItem::new(label, Money::from_cents(450)).quantity(2),
        );
        let mut entry = ShoppingListEntry::from_item(&item, category);
        entry.found = found;
        entry
    }

    #[test]
    fn test_empty_list() {
        let output = format_shopping_list(&[], &ShoppingProgress::default(), &Currency::default());
        assert_eq!(output, "Shopping list is empty.\n");
    }

    #[test]
    fn test_groups_and_checkboxes() {
        let category = Category::new("Groceries");
        let groups = vec![ShoppingGroup {
            entries: vec![entry(&category, "Milk", true), entry(&category, "Bread", false)],
            category,
        }];
        let progress = ShoppingProgress { found: 1, total: 2 };
        let output = format_shopping_list(&groups, &progress, &Currency::default());

        assert!(output.starts_with("Groceries (1/2)\n"));
        assert!(output.contains("[x] Milk x2"));
        assert!(output.contains("[ ] Bread x2"));
        assert!(output.contains("Found 1 of 2 (1 to go)"));
    }
}
