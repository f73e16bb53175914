//! Shopping list projector
//!
//! Keeps one entry per shoppable budget item. The entries' `found` flags are
//! the projector's own state; everything else is copied from the budget and
//! refreshed whenever the store reports a change.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{BasketError, BasketResult};
use crate::models::{
    ItemId, ShoppablePolicy, ShoppingGroup, ShoppingListEntry, ShoppingProgress,
};

use super::budget::{BudgetChange, BudgetStore};

/// Derives the shopping list from a [`BudgetStore`]
#[derive(Debug, Clone)]
pub struct ShoppingListProjector {
    policy: ShoppablePolicy,
    found_last: bool,
    entries: HashMap<ItemId, ShoppingListEntry>,
}

impl ShoppingListProjector {
    /// Create an empty projector
    ///
    /// With `found_last`, entries already found are listed after the rest of
    /// their category.
    pub fn new(policy: ShoppablePolicy, found_last: bool) -> Self {
        Self {
            policy,
            found_last,
            entries: HashMap::new(),
        }
    }

    pub fn policy(&self) -> ShoppablePolicy {
        self.policy
    }

    /// Switch policy and rebuild the entries; flags of items that stay on
    /// the list are kept
    pub fn set_policy(&mut self, policy: ShoppablePolicy, store: &BudgetStore) {
        self.policy = policy;
        self.reconcile(store);
    }

    /// The shopping list grouped by category in display order
    ///
    /// Entries within a group follow the store's insertion order. Categories
    /// without shoppable items are left out.
    pub fn project(&self, store: &BudgetStore) -> Vec<ShoppingGroup> {
        let mut groups = Vec::new();

        for category in store.categories() {
            let mut entries: Vec<ShoppingListEntry> = store
                .items_in_category(category.id)
                .filter(|item| self.policy.is_shoppable(item, category))
                .map(|item| {
                    let mut entry = ShoppingListEntry::from_item(item, category);
                    entry.found = self.is_found(item.id);
                    entry
                })
                .collect();

            if entries.is_empty() {
                continue;
            }
            if self.found_last {
                // stable, so each half keeps insertion order
                entries.sort_by_key(|e| e.found);
            }

            groups.push(ShoppingGroup {
                category: category.clone(),
                entries,
            });
        }

        groups
    }

    /// Set the found flag of a live entry
    ///
    /// Returns whether the flag actually changed.
    pub fn mark_found(&mut self, item_id: ItemId, found: bool) -> BasketResult<bool> {
        let entry = self
            .entries
            .get_mut(&item_id)
            .ok_or_else(|| BasketError::entry_not_found(item_id.to_string()))?;

        let changed = entry.found != found;
        entry.found = found;
        debug!(item = %item_id, found, changed, "marked entry");
        Ok(changed)
    }

    /// Flip the found flag and return its new value
    pub fn toggle_found(&mut self, item_id: ItemId) -> BasketResult<bool> {
        let entry = self
            .entries
            .get_mut(&item_id)
            .ok_or_else(|| BasketError::entry_not_found(item_id.to_string()))?;

        entry.found = !entry.found;
        debug!(item = %item_id, found = entry.found, "toggled entry");
        Ok(entry.found)
    }

    /// Reset every flag for a new trip; returns how many were set
    pub fn clear_found(&mut self) -> usize {
        let mut cleared = 0;
        for entry in self.entries.values_mut().filter(|e| e.found) {
            entry.found = false;
            cleared += 1;
        }
        cleared
    }

    /// Follow a single budget mutation
    pub fn on_budget_changed(&mut self, change: &BudgetChange) {
        match change {
            BudgetChange::Added { item, category } => {
                if self.policy.is_shoppable(item, category) {
                    self.entries
                        .insert(item.id, ShoppingListEntry::from_item(item, category));
                }
            }
            BudgetChange::Updated { item, category } => {
                if self.policy.is_shoppable(item, category) {
                    self.entries
                        .entry(item.id)
                        .and_modify(|entry| entry.refresh(item, category))
                        .or_insert_with(|| ShoppingListEntry::from_item(item, category));
                } else {
                    self.entries.remove(&item.id);
                }
            }
            BudgetChange::Removed { item_id } => {
                self.entries.remove(item_id);
            }
        }
    }

    /// Rebuild the entries from the whole store
    ///
    /// Flags of surviving entries are merged back in; entries whose items are
    /// gone or no longer shoppable are dropped.
    pub fn reconcile(&mut self, store: &BudgetStore) {
        let mut previous = std::mem::take(&mut self.entries);

        for item in store.items() {
            let Some(category) = store.category(item.category_id) else {
                continue;
            };
            if !self.policy.is_shoppable(item, category) {
                continue;
            }
            let entry = match previous.remove(&item.id) {
                Some(mut entry) => {
                    entry.refresh(item, category);
                    entry
                }
                None => ShoppingListEntry::from_item(item, category),
            };
            self.entries.insert(item.id, entry);
        }

        debug!(entries = self.entries.len(), dropped = previous.len(), "reconciled shopping list");
    }

    /// Rebuild from the store and set the given items as found
    ///
    /// IDs without a live entry are ignored.
    pub fn restore(&mut self, store: &BudgetStore, found: &[ItemId]) {
        self.entries.clear();
        self.reconcile(store);
        for id in found {
            if let Some(entry) = self.entries.get_mut(id) {
                entry.found = true;
            }
        }
    }

    /// IDs of found entries, in store order
    pub fn found_items(&self, store: &BudgetStore) -> Vec<ItemId> {
        store
            .items()
            .map(|item| item.id)
            .filter(|id| self.is_found(*id))
            .collect()
    }

    pub fn entry(&self, item_id: ItemId) -> Option<&ShoppingListEntry> {
        self.entries.get(&item_id)
    }

    pub fn is_found(&self, item_id: ItemId) -> bool {
        self.entries.get(&item_id).is_some_and(|e| e.found)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn progress(&self) -> ShoppingProgress {
        ShoppingProgress {
            found: self.entries.values().filter(|e| e.found).count(),
            total: self.entries.len(),
        }
    }
}

impl Default for ShoppingListProjector {
    fn default() -> Self {
        Self::new(ShoppablePolicy::default(), false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, CategoryPatch, ItemPatch, Money, NewItem};

    struct Fixture {
        store: BudgetStore,
        projector: ShoppingListProjector,
    }

    impl Fixture {
        fn new(policy: ShoppablePolicy) -> Self {
            Self {
                store: BudgetStore::new(2),
                projector: ShoppingListProjector::new(policy, false),
            }
        }

        fn sync(&mut self) {
            for change in self.store.take_changes() {
                self.projector.on_budget_changed(&change);
            }
        }

        fn add(&mut self, category: CategoryId, input: NewItem) -> ItemId {
            let id = self.store.add_item(category, input).unwrap();
            self.sync();
            id
        }

        fn labels(&self) -> Vec<(String, Vec<String>)> {
            self.projector
                .project(&self.store)
                .into_iter()
                .map(|g| {
                    (
                        g.category.name,
                        g.entries.into_iter().map(|e| e.label).collect(),
                    )
                })
                .collect()
        }
    }

    fn money(cents: i64) -> Money {
        Money::from_cents(cents)
    }

    #[test]
    fn test_projection_grouping_and_order() {
        let mut fx = Fixture::new(ShoppablePolicy::AllItems);
        let household = fx.store.create_category("Household", Some(1)).unwrap();
        let groceries = fx.store.create_category("Groceries", Some(0)).unwrap();
        let _empty = fx.store.create_category("Empty", Some(2)).unwrap();

        fx.add(household, NewItem::new("Soap", money(250)));
        fx.add(groceries, NewItem::new("Milk", money(450)));
        fx.add(groceries, NewItem::new("Bread", money(300)));

        let expected = vec![
            ("Groceries".to_string(), vec!["Milk".to_string(), "Bread".to_string()]),
            ("Household".to_string(), vec!["Soap".to_string()]),
        ];
        assert_eq!(fx.labels(), expected);
        // stable across calls
        assert_eq!(fx.labels(), expected);
    }

    #[test]
    fn test_mark_found_is_idempotent() {
        let mut fx = Fixture::new(ShoppablePolicy::AllItems);
        let groceries = fx.store.create_category("Groceries", None).unwrap();
        let milk = fx.add(groceries, NewItem::new("Milk", money(450)));

        assert!(fx.projector.mark_found(milk, true).unwrap());
        let once = fx.projector.project(&fx.store);
        assert!(!fx.projector.mark_found(milk, true).unwrap());
        let twice = fx.projector.project(&fx.store);

        assert_eq!(once, twice);
        assert!(fx.projector.is_found(milk));
    }

    #[test]
    fn test_update_preserves_found() {
        let mut fx = Fixture::new(ShoppablePolicy::AllItems);
        let groceries = fx.store.create_category("Groceries", Some(0)).unwrap();
        let milk = fx.add(groceries, NewItem::new("Milk", money(450)));
        fx.add(groceries, NewItem::new("Bread", money(300)));

        fx.projector.mark_found(milk, true).unwrap();
        fx.store
            .update_item(
                milk,
                ItemPatch {
                    label: Some("Oat milk".into()),
                    planned: Some(money(500)),
                    ..Default::default()
                },
            )
            .unwrap();
        fx.sync();

        let entry = fx.projector.entry(milk).unwrap();
        assert!(entry.found);
        assert_eq!(entry.label, "Oat milk");
        assert_eq!(entry.planned, money(500));
        assert_eq!(fx.store.grand_total().planned, money(800));
    }

    #[test]
    fn test_delete_removes_entry() {
        let mut fx = Fixture::new(ShoppablePolicy::AllItems);
        let groceries = fx.store.create_category("Groceries", None).unwrap();
        let milk = fx.add(groceries, NewItem::new("Milk", money(450)));
        fx.projector.mark_found(milk, true).unwrap();

        fx.store.delete_item(milk).unwrap();
        fx.sync();

        assert!(fx.projector.entry(milk).is_none());
        let err = fx.projector.mark_found(milk, true).unwrap_err();
        assert!(err.is_not_found());
        assert!(fx.projector.toggle_found(milk).unwrap_err().is_not_found());
    }

    #[test]
    fn test_cascade_delete_removes_entries() {
        let mut fx = Fixture::new(ShoppablePolicy::AllItems);
        let groceries = fx.store.create_category("Groceries", None).unwrap();
        let household = fx.store.create_category("Household", None).unwrap();
        let milk = fx.add(groceries, NewItem::new("Milk", money(450)));
        let bread = fx.add(groceries, NewItem::new("Bread", money(300)));
        let soap = fx.add(household, NewItem::new("Soap", money(250)));

        fx.store.delete_category(groceries, true).unwrap();
        fx.sync();

        assert!(fx.projector.entry(milk).is_none());
        assert!(fx.projector.entry(bread).is_none());
        assert!(fx.projector.entry(soap).is_some());
        assert_eq!(fx.projector.len(), 1);
    }

    #[test]
    fn test_flagged_items_policy() {
        let mut fx = Fixture::new(ShoppablePolicy::FlaggedItems);
        let bills = fx.store.create_category("Bills", None).unwrap();
        let rent = fx.add(bills, NewItem::new("Rent", money(120000)).shoppable(false));
        let stamps = fx.add(bills, NewItem::new("Stamps", money(1100)));

        assert!(fx.projector.entry(rent).is_none());
        assert!(fx.projector.entry(stamps).is_some());

        fx.projector.mark_found(stamps, true).unwrap();

        // Leaving the shoppable state drops the entry and its flag
        fx.store
            .update_item(
                stamps,
                ItemPatch {
                    shoppable: Some(false),
                    ..Default::default()
                },
            )
            .unwrap();
        fx.sync();
        assert!(fx.projector.entry(stamps).is_none());

        // Coming back starts fresh
        fx.store
            .update_item(
                stamps,
                ItemPatch {
                    shoppable: Some(true),
                    ..Default::default()
                },
            )
            .unwrap();
        fx.sync();
        assert!(!fx.projector.is_found(stamps));
        assert!(fx.projector.entry(rent).is_none());
    }

    #[test]
    fn test_flagged_categories_policy_follows_category_updates() {
        let mut fx = Fixture::new(ShoppablePolicy::FlaggedCategories);
        let groceries = fx.store.create_category("Groceries", None).unwrap();
        let milk = fx.add(groceries, NewItem::new("Milk", money(450)));
        assert!(fx.projector.entry(milk).is_some());

        fx.store
            .update_category(
                groceries,
                CategoryPatch {
                    shoppable: Some(false),
                    ..Default::default()
                },
            )
            .unwrap();
        fx.sync();
        assert!(fx.projector.is_empty());

        fx.store
            .update_category(
                groceries,
                CategoryPatch {
                    shoppable: Some(true),
                    name: Some("Food".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        fx.sync();
        assert_eq!(fx.projector.entry(milk).unwrap().category_name, "Food");
    }

    #[test]
    fn test_reconcile_keeps_flags_and_drops_orphans() {
        let mut fx = Fixture::new(ShoppablePolicy::AllItems);
        let groceries = fx.store.create_category("Groceries", None).unwrap();
        let milk = fx.add(groceries, NewItem::new("Milk", money(450)));
        let bread = fx.add(groceries, NewItem::new("Bread", money(300)));
        fx.projector.mark_found(milk, true).unwrap();
        fx.projector.mark_found(bread, true).unwrap();

        // Mutate without forwarding changes, then rescan
        fx.store.delete_item(bread).unwrap();
        fx.store.take_changes();
        fx.projector.reconcile(&fx.store);

        assert!(fx.projector.is_found(milk));
        assert!(fx.projector.entry(bread).is_none());
        assert_eq!(fx.projector.progress(), ShoppingProgress { found: 1, total: 1 });
    }

    #[test]
    fn test_found_last_ordering() {
        let mut fx = Fixture::new(ShoppablePolicy::AllItems);
        fx.projector = ShoppingListProjector::new(ShoppablePolicy::AllItems, true);
        let groceries = fx.store.create_category("Groceries", None).unwrap();
        let milk = fx.add(groceries, NewItem::new("Milk", money(450)));
        fx.add(groceries, NewItem::new("Bread", money(300)));
        fx.add(groceries, NewItem::new("Eggs", money(399)));

        fx.projector.mark_found(milk, true).unwrap();
        assert_eq!(
            fx.labels()[0].1,
            vec!["Bread".to_string(), "Eggs".to_string(), "Milk".to_string()]
        );
    }

    #[test]
    fn test_toggle_and_clear() {
        let mut fx = Fixture::new(ShoppablePolicy::AllItems);
        let groceries = fx.store.create_category("Groceries", None).unwrap();
        let milk = fx.add(groceries, NewItem::new("Milk", money(450)));
        let bread = fx.add(groceries, NewItem::new("Bread", money(300)));

        assert!(fx.projector.toggle_found(milk).unwrap());
        assert!(!fx.projector.toggle_found(milk).unwrap());
        fx.projector.mark_found(milk, true).unwrap();
        fx.projector.mark_found(bread, true).unwrap();

        assert!(fx.projector.progress().is_complete());
        assert_eq!(fx.projector.found_items(&fx.store), vec![milk, bread]);
        assert_eq!(fx.projector.clear_found(), 2);
        assert_eq!(fx.projector.progress().remaining(), 2);
    }

    #[test]
    fn test_restore_and_policy_switch() {
        let mut fx = Fixture::new(ShoppablePolicy::AllItems);
        let groceries = fx.store.create_category("Groceries", None).unwrap();
        let milk = fx.add(groceries, NewItem::new("Milk", money(450)));
        let rent = fx.add(groceries, NewItem::new("Rent", money(100000)).shoppable(false));

        let mut restored = ShoppingListProjector::new(ShoppablePolicy::AllItems, false);
        restored.restore(&fx.store, &[milk, ItemId::new()]);
        assert!(restored.is_found(milk));
        assert_eq!(restored.len(), 2);

        restored.set_policy(ShoppablePolicy::FlaggedItems, &fx.store);
        assert!(restored.is_found(milk));
        assert!(restored.entry(rent).is_none());
    }
}
