//! Sample data for `basket init --sample`
//!
//! A painting project: supplies grouped by category, each with a unit price
//! and the shop to get it from.

use crate::error::BasketResult;
use crate::models::{Money, NewItem};
use crate::services::Basket;

/// Spending limit set along with the sample data, in cents
pub const SAMPLE_SPENDING_LIMIT_CENTS: i64 = 100_000;

/// (category, label, quantity, unit price in cents, note, store)
const SAMPLE_ITEMS: &[(&str, &str, u32, i64, &str, &str)] = &[
    ("Spray Equipment", "Paint sprayer (airless)", 1, 4000, "Consider renting if one-time use", "Home Depot"),
    ("Spray Equipment", "Spray tips", 3, 2000, "Different sizes for walls vs. trim", "Home Depot"),
    ("Spray Equipment", "Extension wand", 1, 3000, "For reaching high areas", "Home Depot"),
    ("Spray Equipment", "Filters", 6, 500, "Replace as needed", "Home Depot"),
    ("Spray Equipment", "Hose", 1, 2500, "Usually comes with sprayer", "Home Depot"),
    ("Paint", "Interior latex paint", 10, 3750, "Account for overspray", "Lowe's"),
    ("Paint", "Primer", 8, 3000, "If needed", "Lowe's"),
    ("Paint", "Paint strainer", 6, 200, "To prevent sprayer clogs", "Lowe's"),
    ("Protection", "Plastic sheeting", 5, 1000, "Cover everything", "Walmart"),
    ("Protection", "Painter's tape", 10, 500, "More needed for spray painting", "Walmart"),
    ("Protection", "Rosin paper", 3, 1500, "Floor protection", "Home Depot"),
    ("Protection", "Drop cloths", 6, 1500, "Heavy-duty type", "Home Depot"),
    ("Safety Equipment", "Full respirator", 1, 3000, "Not just dust masks", "Lowe's"),
    ("Safety Equipment", "Safety goggles", 2, 1000, "Sealed type", "Lowe's"),
    ("Safety Equipment", "Disposable coveralls", 3, 1000, "Full body protection", "Lowe's"),
    ("Safety Equipment", "Heavy duty gloves", 2, 800, "Per pair", "Lowe's"),
    ("Surface Prep", "Sandpaper", 1, 1000, "Various grits: 120, 180, 220", "Walmart"),
    ("Surface Prep", "Spackle", 1, 800, "For repairs", "Walmart"),
    ("Surface Prep", "TSP cleaner", 1, 1000, "Wall preparation", "Walmart"),
    ("Clean-up", "5-gallon buckets", 3, 500, "For clean-up", "Home Depot"),
    ("Clean-up", "Paint thinner", 2, 1500, "For equipment cleaning", "Home Depot"),
    ("Clean-up", "Clean rags", 1, 1000, "Large pack", "Walmart"),
    ("Tools", "Multi-position ladder", 1, 15000, "For stairwell and high areas", "Lowe's"),
    ("Tools", "Step ladder", 1, 5000, "For standard height walls", "Lowe's"),
    ("Tools", "Utility knife", 1, 1000, "With extra blades", "Walmart"),
];

/// Fill a basket with the sample project and set its spending limit
///
/// Runs as one batch: either every sample item is added or none is.
/// Returns the number of items added.
pub fn populate_sample_data(basket: &mut Basket) -> BasketResult<usize> {
    basket.batch(|tx| {
        for &(category, label, quantity, unit_cents, note, store) in SAMPLE_ITEMS {
            let planned = Money::from_cents(unit_cents * i64::from(quantity));
            tx.add_item_in_category_named(
                category,
                NewItem::new(label, planned)
                    .quantity(quantity)
                    .note(note)
                    .store(store),
            )?;
        }
        tx.set_spending_limit(Some(Money::from_cents(SAMPLE_SPENDING_LIMIT_CENTS)))?;
        Ok(SAMPLE_ITEMS.len())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_data() {
        let mut basket = Basket::default();
        let added = populate_sample_data(&mut basket).unwrap();

        assert_eq!(added, SAMPLE_ITEMS.len());
        assert_eq!(basket.store().item_count(), SAMPLE_ITEMS.len());
        assert_eq!(basket.store().category_count(), 7);
        assert_eq!(basket.shopping_progress().total, SAMPLE_ITEMS.len());

        let paint = basket.store().find_item("Interior latex paint").unwrap();
        assert_eq!(paint.planned, Money::from_cents(37500));
        assert_eq!(paint.quantity, 10);

        let status = basket.budget_status();
        assert_eq!(status.limit, Some(Money::from_cents(SAMPLE_SPENDING_LIMIT_CENTS)));
        assert!(status.is_over_budget());
    }

    #[test]
    fn test_sample_data_adds_alongside_existing_items() {
        let mut basket = Basket::default();
        basket
            .add_item_in_category_named("Paint", NewItem::new("Primer", Money::from_cents(100)))
            .unwrap();

        populate_sample_data(&mut basket).unwrap();
        assert_eq!(basket.store().item_count(), SAMPLE_ITEMS.len() + 1);
        assert!(basket.store().find_item("Primer").unwrap_err().is_validation());
    }
}
