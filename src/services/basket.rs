//! Basket: the single owner of a budget and its shopping list
//!
//! Every mutation goes through here. The store's change notifications are
//! forwarded to the projector before the call returns, and an audit entry is
//! journalled for each successful change.

use tracing::info;

use crate::audit::{AuditEntry, EntityType};
use crate::config::BasketConfig;
use crate::error::{BasketError, BasketResult};
use crate::models::{
    BudgetItem, BudgetStatus, Category, CategoryId, CategoryPatch, CategoryTotal, GrandTotal,
    ItemId, ItemPatch, Money, NewItem, ShoppablePolicy, ShoppingGroup, ShoppingProgress,
};
use crate::storage::{Snapshot, SNAPSHOT_SCHEMA_VERSION};

use super::budget::BudgetStore;
use super::shopping::ShoppingListProjector;

/// A budget store and its shopping list, kept consistent
#[derive(Debug, Clone)]
pub struct Basket {
    config: BasketConfig,
    store: BudgetStore,
    projector: ShoppingListProjector,
    journal: Vec<AuditEntry>,
}

impl Basket {
    /// Create an empty basket
    pub fn new(config: BasketConfig) -> Self {
        Self {
            store: BudgetStore::new(config.amount_precision),
            projector: ShoppingListProjector::new(config.shoppable_policy, config.found_last),
            journal: Vec::new(),
            config,
        }
    }

    /// Rebuild a basket from a saved snapshot
    pub fn from_snapshot(config: BasketConfig, snapshot: Snapshot) -> BasketResult<Self> {
        if snapshot.schema_version > SNAPSHOT_SCHEMA_VERSION {
            return Err(BasketError::Storage(format!(
                "Unsupported snapshot schema {}",
                snapshot.schema_version
            )));
        }

        let store = BudgetStore::from_parts(
            config.amount_precision,
            snapshot.categories,
            snapshot.items,
            snapshot.spending_limit,
        )?;
        let mut projector = ShoppingListProjector::new(config.shoppable_policy, config.found_last);
        projector.restore(&store, &snapshot.found);

        Ok(Self {
            config,
            store,
            projector,
            journal: Vec::new(),
        })
    }

    /// Capture the current state for persistence
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            categories: self.store.categories_by_creation().cloned().collect(),
            items: self.store.items().cloned().collect(),
            found: self.projector.found_items(&self.store),
            spending_limit: self.store.spending_limit(),
            saved_at: None,
        }
    }

    pub fn config(&self) -> &BasketConfig {
        &self.config
    }

    /// Read-only view of the budget
    pub fn store(&self) -> &BudgetStore {
        &self.store
    }

    /// Read-only view of the shopping list state
    pub fn projector(&self) -> &ShoppingListProjector {
        &self.projector
    }

    // === Categories ===

    pub fn create_category(&mut self, name: &str, sort_order: Option<i32>) -> BasketResult<CategoryId> {
        let id = self.store.create_category(name, sort_order)?;
        self.record_category_created(id);
        Ok(id)
    }

    pub fn update_category(&mut self, id: CategoryId, patch: CategoryPatch) -> BasketResult<()> {
        let before = self.category_or_err(id)?.clone();
        self.store.update_category(id, patch)?;
        self.sync();

        let after = self.category_or_err(id)?;
        self.journal.push(AuditEntry::update(
            EntityType::Category,
            id.short(),
            Some(after.name.clone()),
            &before,
            after,
        ));
        Ok(())
    }

    /// Delete a category, cascading to its items if `cascade` is set
    pub fn delete_category(&mut self, id: CategoryId, cascade: bool) -> BasketResult<()> {
        let category = self.category_or_err(id)?.clone();
        let dependents: Vec<BudgetItem> = self.store.items_in_category(id).cloned().collect();

        self.store.delete_category(id, cascade)?;
        self.sync();

        for item in &dependents {
            self.journal.push(AuditEntry::delete(
                EntityType::BudgetItem,
                item.id.short(),
                Some(item.label.clone()),
                item,
            ));
        }
        self.journal.push(AuditEntry::delete(
            EntityType::Category,
            id.short(),
            Some(category.name.clone()),
            &category,
        ));
        info!(category = %category.name, items = dependents.len(), "deleted category");
        Ok(())
    }

    /// Delete a category using the configured cascade policy
    pub fn delete_category_default(&mut self, id: CategoryId) -> BasketResult<()> {
        self.delete_category(id, self.config.cascade_delete_default)
    }

    // === Items ===

    pub fn add_item(&mut self, category_id: CategoryId, input: NewItem) -> BasketResult<ItemId> {
        let id = self.store.add_item(category_id, input)?;
        self.sync();
        self.record_item_created(id);
        Ok(id)
    }

    /// Add an item, creating its category by name if needed
    pub fn add_item_in_category_named(
        &mut self,
        category_name: &str,
        input: NewItem,
    ) -> BasketResult<ItemId> {
        let existing = self.store.category_by_name(category_name).map(|c| c.id);
        let id = self.store.add_item_in_category_named(category_name, input)?;
        self.sync();

        if existing.is_none() {
            if let Some(category_id) = self.store.item(id).map(|i| i.category_id) {
                self.record_category_created(category_id);
            }
        }
        self.record_item_created(id);
        Ok(id)
    }

    pub fn update_item(&mut self, id: ItemId, patch: ItemPatch) -> BasketResult<()> {
        let before = self.item_or_err(id)?.clone();
        self.store.update_item(id, patch)?;
        self.sync();

        let after = self.item_or_err(id)?;
        self.journal.push(AuditEntry::update(
            EntityType::BudgetItem,
            id.short(),
            Some(after.label.clone()),
            &before,
            after,
        ));
        Ok(())
    }

    pub fn delete_item(&mut self, id: ItemId) -> BasketResult<()> {
        let item = self.item_or_err(id)?.clone();
        self.store.delete_item(id)?;
        self.sync();

        self.journal.push(AuditEntry::delete(
            EntityType::BudgetItem,
            id.short(),
            Some(item.label.clone()),
            &item,
        ));
        Ok(())
    }

    pub fn set_spending_limit(&mut self, limit: Option<Money>) -> BasketResult<()> {
        let before = self.store.spending_limit();
        self.store.set_spending_limit(limit)?;
        let after = self.store.spending_limit();

        if before != after {
            self.journal.push(AuditEntry::update(
                EntityType::SpendingLimit,
                "limit",
                None,
                &before,
                &after,
            ));
        }
        Ok(())
    }

    // === Shopping list ===

    pub fn mark_found(&mut self, id: ItemId, found: bool) -> BasketResult<()> {
        if self.projector.mark_found(id, found)? {
            self.record_found_change(id, !found, found);
        }
        Ok(())
    }

    /// Flip an entry's found flag and return the new value
    pub fn toggle_found(&mut self, id: ItemId) -> BasketResult<bool> {
        let found = self.projector.toggle_found(id)?;
        self.record_found_change(id, !found, found);
        Ok(found)
    }

    /// Start a new trip: nothing is found any more
    pub fn clear_found(&mut self) -> usize {
        let cleared = self.projector.clear_found();
        if cleared > 0 {
            info!(cleared, "cleared found flags");
        }
        cleared
    }

    pub fn set_shoppable_policy(&mut self, policy: ShoppablePolicy) {
        self.config.shoppable_policy = policy;
        self.projector.set_policy(policy, &self.store);
    }

    pub fn shopping_list(&self) -> Vec<ShoppingGroup> {
        self.projector.project(&self.store)
    }

    pub fn shopping_progress(&self) -> ShoppingProgress {
        self.projector.progress()
    }

    // === Totals ===

    pub fn category_totals(&self) -> Vec<CategoryTotal> {
        self.store.category_totals()
    }

    pub fn grand_total(&self) -> GrandTotal {
        self.store.grand_total()
    }

    pub fn budget_status(&self) -> BudgetStatus {
        self.store.budget_status()
    }

    // === Batches ===

    /// Apply several mutations as one unit
    ///
    /// The closure works on a copy; if it returns an error the basket is left
    /// exactly as it was, otherwise the copy replaces it.
    pub fn batch<T, F>(&mut self, f: F) -> BasketResult<T>
    where
        F: FnOnce(&mut Basket) -> BasketResult<T>,
    {
        let mut working = self.clone();
        let output = f(&mut working)?;
        *self = working;
        Ok(output)
    }

    /// Drain audit entries recorded since the last call
    pub fn take_audit_entries(&mut self) -> Vec<AuditEntry> {
        std::mem::take(&mut self.journal)
    }

    // === Internals ===

    fn sync(&mut self) {
        for change in self.store.take_changes() {
            self.projector.on_budget_changed(&change);
        }
    }

    fn category_or_err(&self, id: CategoryId) -> BasketResult<&Category> {
        self.store
            .category(id)
            .ok_or_else(|| BasketError::category_not_found(id.to_string()))
    }

    fn item_or_err(&self, id: ItemId) -> BasketResult<&BudgetItem> {
        self.store
            .item(id)
            .ok_or_else(|| BasketError::item_not_found(id.to_string()))
    }

    fn record_category_created(&mut self, id: CategoryId) {
        if let Some(category) = self.store.category(id) {
            self.journal.push(AuditEntry::create(
                EntityType::Category,
                id.short(),
                Some(category.name.clone()),
                category,
            ));
        }
    }

    fn record_item_created(&mut self, id: ItemId) {
        if let Some(item) = self.store.item(id) {
            self.journal.push(AuditEntry::create(
                EntityType::BudgetItem,
                id.short(),
                Some(item.label.clone()),
                item,
            ));
        }
    }

    fn record_found_change(&mut self, id: ItemId, before: bool, after: bool) {
        let label = self.store.item(id).map(|i| i.label.clone());
        self.journal.push(AuditEntry::update(
            EntityType::ShoppingEntry,
            id.short(),
            label,
            &serde_json::json!({ "found": before }),
            &serde_json::json!({ "found": after }),
        ));
    }
}

impl Default for Basket {
    fn default() -> Self {
        Self::new(BasketConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use rust_decimal_macros::dec;

    fn money(cents: i64) -> Money {
        Money::from_cents(cents)
    }

    fn assert_consistent(basket: &Basket) {
        let store = basket.store();
        let planned: Money = store.items().map(|i| i.planned).sum();
        let actual: Money = store.items().map(|i| i.actual).sum();
        assert_eq!(basket.grand_total().planned, planned);
        assert_eq!(basket.grand_total().actual, actual);

        let shoppable: Vec<ItemId> = store
            .items()
            .filter(|i| {
                let category = store.category(i.category_id).unwrap();
                basket.config().shoppable_policy.is_shoppable(i, category)
            })
            .map(|i| i.id)
            .collect();
        assert_eq!(basket.projector().len(), shoppable.len());
        for id in shoppable {
            assert!(basket.projector().entry(id).is_some());
        }
    }

    #[test]
    fn test_groceries_walkthrough() {
        let mut basket = Basket::default();
        let groceries = basket.create_category("Groceries", Some(0)).unwrap();
        let milk = basket
            .add_item(groceries, NewItem::new("Milk", Money::new(dec!(4.50))))
            .unwrap();
        basket
            .add_item(groceries, NewItem::new("Bread", Money::new(dec!(3.00))))
            .unwrap();
        assert_eq!(basket.grand_total().planned, Money::new(dec!(7.50)));

        basket.mark_found(milk, true).unwrap();
        basket
            .update_item(
                milk,
                ItemPatch {
                    planned: Some(Money::new(dec!(5.00))),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(basket.projector().is_found(milk));
        assert_eq!(basket.grand_total().planned, Money::new(dec!(8.00)));

        basket.delete_item(milk).unwrap();
        let err = basket.mark_found(milk, true).unwrap_err();
        assert!(err.is_not_found());
        assert_consistent(&basket);
    }

    #[test]
    fn test_cascade_delete_through_basket() {
        let mut basket = Basket::default();
        let groceries = basket.create_category("Groceries", None).unwrap();
        let milk = basket.add_item(groceries, NewItem::new("Milk", money(450))).unwrap();
        basket.mark_found(milk, true).unwrap();

        assert!(basket.delete_category(groceries, false).unwrap_err().is_conflict());
        assert!(basket.projector().is_found(milk));
        assert_consistent(&basket);

        basket.delete_category(groceries, true).unwrap();
        assert!(basket.store().category(groceries).is_none());
        assert!(basket.projector().is_empty());
        assert!(basket.shopping_list().is_empty());
        assert_consistent(&basket);
    }

    #[test]
    fn test_delete_category_default_uses_config() {
        let config = BasketConfig {
            cascade_delete_default: true,
            ..BasketConfig::default()
        };
        let mut basket = Basket::new(config);
        let groceries = basket.create_category("Groceries", None).unwrap();
        basket.add_item(groceries, NewItem::new("Milk", money(450))).unwrap();

        basket.delete_category_default(groceries).unwrap();
        assert_eq!(basket.store().item_count(), 0);

        let mut strict = Basket::default();
        let groceries = strict.create_category("Groceries", None).unwrap();
        strict.add_item(groceries, NewItem::new("Milk", money(450))).unwrap();
        assert!(strict.delete_category_default(groceries).unwrap_err().is_conflict());
    }

    #[test]
    fn test_batch_is_all_or_nothing() {
        let mut basket = Basket::default();
        let groceries = basket.create_category("Groceries", None).unwrap();
        let milk = basket.add_item(groceries, NewItem::new("Milk", money(450))).unwrap();
        basket.take_audit_entries();

        let err = basket
            .batch(|tx| {
                tx.add_item(groceries, NewItem::new("Bread", money(300)))?;
                tx.mark_found(milk, true)?;
                tx.add_item(groceries, NewItem::new("Eggs", money(-1)))
            })
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(basket.store().item_count(), 1);
        assert!(!basket.projector().is_found(milk));
        assert!(basket.take_audit_entries().is_empty());

        let bread = basket
            .batch(|tx| {
                let bread = tx.add_item(groceries, NewItem::new("Bread", money(300)))?;
                tx.mark_found(milk, true)?;
                Ok(bread)
            })
            .unwrap();
        assert!(basket.store().item(bread).is_some());
        assert!(basket.projector().is_found(milk));
        assert_eq!(basket.take_audit_entries().len(), 2);
        assert_consistent(&basket);
    }

    #[test]
    fn test_snapshot_round_trip_keeps_found_flags() {
        let mut basket = Basket::default();
        let household = basket.create_category("Household", Some(1)).unwrap();
        let groceries = basket.create_category("Groceries", Some(0)).unwrap();
        let soap = basket.add_item(household, NewItem::new("Soap", money(250))).unwrap();
        let milk = basket.add_item(groceries, NewItem::new("Milk", money(450))).unwrap();
        basket.mark_found(soap, true).unwrap();
        basket.set_spending_limit(Some(money(100000))).unwrap();

        let snapshot = basket.snapshot();
        assert_eq!(snapshot.found, vec![soap]);

        let restored = Basket::from_snapshot(BasketConfig::default(), snapshot).unwrap();
        assert!(restored.projector().is_found(soap));
        assert!(!restored.projector().is_found(milk));
        assert_eq!(restored.grand_total(), basket.grand_total());
        assert_eq!(restored.shopping_list(), basket.shopping_list());
        assert_eq!(restored.budget_status(), basket.budget_status());
        assert_consistent(&restored);
    }

    #[test]
    fn test_implicit_category_is_audited() {
        let mut basket = Basket::default();
        basket
            .add_item_in_category_named("Produce", NewItem::new("Apples", money(299)))
            .unwrap();
        basket
            .add_item_in_category_named("Produce", NewItem::new("Pears", money(199)))
            .unwrap();

        let kinds: Vec<_> = basket
            .take_audit_entries()
            .into_iter()
            .map(|e| (e.operation, e.entity_type))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (Operation::Create, EntityType::Category),
                (Operation::Create, EntityType::BudgetItem),
                (Operation::Create, EntityType::BudgetItem),
            ]
        );
    }

    #[test]
    fn test_audit_journal_for_found_flags() {
        let mut basket = Basket::default();
        let groceries = basket.create_category("Groceries", None).unwrap();
        let milk = basket.add_item(groceries, NewItem::new("Milk", money(450))).unwrap();
        basket.take_audit_entries();

        basket.mark_found(milk, true).unwrap();
        basket.mark_found(milk, true).unwrap();
        assert!(!basket.toggle_found(milk).unwrap());

        let entries = basket.take_audit_entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].entity_type, EntityType::ShoppingEntry);
        assert_eq!(entries[0].diff_summary.as_deref(), Some("found: false -> true"));
        assert_eq!(entries[1].diff_summary.as_deref(), Some("found: true -> false"));
    }

    #[test]
    fn test_policy_switch_reprojects() {
        let mut basket = Basket::default();
        let bills = basket.create_category("Bills", None).unwrap();
        let rent = basket
            .add_item(bills, NewItem::new("Rent", money(120000)).shoppable(false))
            .unwrap();
        assert!(basket.projector().entry(rent).is_some());

        basket.set_shoppable_policy(ShoppablePolicy::FlaggedItems);
        assert!(basket.projector().entry(rent).is_none());
        assert_consistent(&basket);
    }

    #[test]
    fn test_randomised_sequence_stays_consistent() {
        let mut basket = Basket::default();
        let cats: Vec<CategoryId> = (0..3)
            .map(|i| basket.create_category(&format!("C{}", i), None).unwrap())
            .collect();
        let mut live: Vec<ItemId> = Vec::new();

        // small LCG so the sequence is deterministic
        let mut seed: u64 = 42;
        let mut next = || {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (seed >> 33) as usize
        };

        for step in 0..200 {
            match next() % 5 {
                0 | 1 => {
                    let cat = cats[next() % cats.len()];
                    let id = basket
                        .add_item(cat, NewItem::new(format!("i{}", step), money((next() % 5000) as i64)))
                        .unwrap();
                    live.push(id);
                }
                2 if !live.is_empty() => {
                    let id = live[next() % live.len()];
                    basket
                        .update_item(
                            id,
                            ItemPatch {
                                actual: Some(money((next() % 3000) as i64)),
                                category_id: Some(cats[next() % cats.len()]),
                                ..Default::default()
                            },
                        )
                        .unwrap();
                }
                3 if !live.is_empty() => {
                    let id = live.swap_remove(next() % live.len());
                    basket.delete_item(id).unwrap();
                }
                _ if !live.is_empty() => {
                    let id = live[next() % live.len()];
                    basket.toggle_found(id).unwrap();
                }
                _ => {}
            }
            assert_consistent(&basket);
        }
    }
}
