//! JSON export
//!
//! The full export is the persisted snapshot plus the derived views, so a
//! reader does not have to recompute totals or the shopping list.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BasketError, BasketResult};
use crate::models::{BudgetStatus, CategoryTotal, GrandTotal, ShoppingGroup, ShoppingProgress};
use crate::services::Basket;
use crate::storage::Snapshot;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Everything in a basket, with derived views
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    /// Application version that created the export
    pub app_version: String,
    pub data: Snapshot,
    pub category_totals: Vec<CategoryTotal>,
    pub grand_total: GrandTotal,
    pub budget_status: BudgetStatus,
    pub shopping_list: Vec<ShoppingGroup>,
    pub shopping_progress: ShoppingProgress,
}

impl FullExport {
    pub fn from_basket(basket: &Basket) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            data: basket.snapshot(),
            category_totals: basket.category_totals(),
            grand_total: basket.grand_total(),
            budget_status: basket.budget_status(),
            shopping_list: basket.shopping_list(),
            shopping_progress: basket.shopping_progress(),
        }
    }
}

/// Export the basket to JSON
pub fn export_full_json<W: Write>(basket: &Basket, writer: W, pretty: bool) -> BasketResult<()> {
    let export = FullExport::from_basket(basket);

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| BasketError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, NewItem};

    #[test]
    fn test_export_contains_derived_views() {
        let mut basket = Basket::default();
        let milk = basket
            .add_item_in_category_named("Groceries", NewItem::new("Milk", Money::from_cents(450)))
            .unwrap();
        basket.mark_found(milk, true).unwrap();

        let mut buffer = Vec::new();
        export_full_json(&basket, &mut buffer, false).unwrap();
        let export: FullExport = serde_json::from_slice(&buffer).unwrap();

        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.data.items.len(), 1);
        assert_eq!(export.data.found, vec![milk]);
        assert_eq!(export.grand_total.planned, Money::from_cents(450));
        assert_eq!(export.shopping_progress, ShoppingProgress { found: 1, total: 1 });
        assert_eq!(export.shopping_list[0].category.name, "Groceries");
    }
}
