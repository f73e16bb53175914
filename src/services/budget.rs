//! Budget store
//!
//! Owns categories and budget items, validates every mutation and keeps
//! per-category aggregates in step with the items. Each successful item
//! mutation queues a [`BudgetChange`] so that the shopping list can follow
//! along without rescanning the whole budget.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{BasketError, BasketResult};
use crate::models::category::validate_category_name;
use crate::models::item::{validate_amount, validate_label};
use crate::models::{
    BudgetItem, BudgetStatus, Category, CategoryId, CategoryPatch, CategoryTotal, GrandTotal,
    ItemId, ItemPatch, Money, NewItem,
};

/// Notification emitted for every item whose derived state may have changed
#[derive(Debug, Clone, PartialEq)]
pub enum BudgetChange {
    Added { item: BudgetItem, category: Category },
    Updated { item: BudgetItem, category: Category },
    Removed { item_id: ItemId },
}

impl BudgetChange {
    pub fn item_id(&self) -> ItemId {
        match self {
            Self::Added { item, .. } | Self::Updated { item, .. } => item.id,
            Self::Removed { item_id } => *item_id,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Aggregate {
    planned: Money,
    actual: Money,
    count: usize,
}

impl Aggregate {
    fn include(&mut self, item: &BudgetItem) {
        self.planned += item.planned;
        self.actual += item.actual;
        self.count += 1;
    }

    fn exclude(&mut self, item: &BudgetItem) {
        self.planned -= item.planned;
        self.actual -= item.actual;
        self.count -= 1;
    }
}

/// In-memory owner of the budget
#[derive(Debug, Clone)]
pub struct BudgetStore {
    precision: u32,
    categories: HashMap<CategoryId, Category>,
    /// Category IDs in creation order
    category_order: Vec<CategoryId>,
    items: HashMap<ItemId, BudgetItem>,
    /// Item IDs in creation order
    item_order: Vec<ItemId>,
    aggregates: HashMap<CategoryId, Aggregate>,
    spending_limit: Option<Money>,
    pending: Vec<BudgetChange>,
}

impl BudgetStore {
    /// Create an empty store that rounds amounts to `precision` decimal places
    pub fn new(precision: u32) -> Self {
        Self {
            precision,
            categories: HashMap::new(),
            category_order: Vec::new(),
            items: HashMap::new(),
            item_order: Vec::new(),
            aggregates: HashMap::new(),
            spending_limit: None,
            pending: Vec::new(),
        }
    }

    /// Rebuild a store from loaded records
    ///
    /// Categories and items are taken in the given (creation) order and
    /// amounts are rounded to `precision`. Fails on an invalid record, a
    /// repeated ID or category name, or an item naming a missing category.
    pub fn from_parts(
        precision: u32,
        categories: Vec<Category>,
        items: Vec<BudgetItem>,
        spending_limit: Option<Money>,
    ) -> BasketResult<Self> {
        let mut store = Self::new(precision);

        for category in categories {
            category
                .validate()
                .map_err(|e| BasketError::Validation(e.to_string()))?;
            if store.categories.contains_key(&category.id) {
                return Err(BasketError::Validation(format!(
                    "Duplicate category ID: {}",
                    category.id
                )));
            }
            store.ensure_unique_name(&category.name, None)?;
            store.category_order.push(category.id);
            store.categories.insert(category.id, category);
        }

        for mut item in items {
            item.planned = item.planned.round_to(precision);
            item.actual = item.actual.round_to(precision);
            item.validate()
                .map_err(|e| BasketError::Validation(e.to_string()))?;
            if !store.categories.contains_key(&item.category_id) {
                return Err(BasketError::category_not_found(item.category_id.to_string()));
            }
            if store.items.contains_key(&item.id) {
                return Err(BasketError::Validation(format!(
                    "Duplicate item ID: {}",
                    item.id
                )));
            }
            store.item_order.push(item.id);
            store.items.insert(item.id, item);
        }

        store.spending_limit = match spending_limit {
            Some(limit) => Some(store.checked_amount("limit", limit)?),
            None => None,
        };
        store.recompute_totals();
        Ok(store)
    }

    /// Decimal places kept for amounts
    pub fn precision(&self) -> u32 {
        self.precision
    }

    // === Categories ===

    /// Create a category; without a sort order it goes after the last one
    pub fn create_category(&mut self, name: &str, sort_order: Option<i32>) -> BasketResult<CategoryId> {
        let name = name.trim();
        validate_category_name(name).map_err(|e| BasketError::Validation(e.to_string()))?;
        self.ensure_unique_name(name, None)?;

        let sort_order = sort_order.unwrap_or_else(|| {
            self.categories
                .values()
                .map(|c| c.sort_order)
                .max()
                .map_or(0, |max| max.saturating_add(1))
        });

        let category = Category::with_sort_order(name, sort_order);
        let id = category.id;
        debug!(category = %id, name, sort_order, "created category");

        self.category_order.push(id);
        self.aggregates.insert(id, Aggregate::default());
        self.categories.insert(id, category);
        Ok(id)
    }

    /// Rename, reorder or (un)flag a category
    pub fn update_category(&mut self, id: CategoryId, patch: CategoryPatch) -> BasketResult<()> {
        let mut category = self
            .categories
            .get(&id)
            .cloned()
            .ok_or_else(|| BasketError::category_not_found(id.to_string()))?;

        if let Some(name) = patch.name {
            let name = name.trim();
            validate_category_name(name).map_err(|e| BasketError::Validation(e.to_string()))?;
            self.ensure_unique_name(name, Some(id))?;
            category.name = name.to_string();
        }
        if let Some(sort_order) = patch.sort_order {
            category.sort_order = sort_order;
        }
        if let Some(shoppable) = patch.shoppable {
            category.shoppable = shoppable;
        }
        category.updated_at = chrono::Utc::now();

        debug!(category = %id, "updated category");
        self.categories.insert(id, category.clone());

        // Display name and shoppability flow through to every entry in the category
        for item_id in &self.item_order {
            let item = &self.items[item_id];
            if item.category_id == id {
                self.pending.push(BudgetChange::Updated {
                    item: item.clone(),
                    category: category.clone(),
                });
            }
        }
        Ok(())
    }

    /// Delete a category
    ///
    /// Without `cascade`, a category that still has items is left alone and
    /// a conflict is reported. With `cascade`, its items go first.
    pub fn delete_category(&mut self, id: CategoryId, cascade: bool) -> BasketResult<()> {
        let category = self
            .categories
            .get(&id)
            .ok_or_else(|| BasketError::category_not_found(id.to_string()))?;

        let dependents: Vec<ItemId> = self
            .item_order
            .iter()
            .copied()
            .filter(|item_id| self.items[item_id].category_id == id)
            .collect();

        if !dependents.is_empty() && !cascade {
            return Err(BasketError::Conflict(format!(
                "Category '{}' still has {} item(s); delete with cascade or move them first",
                category.name,
                dependents.len()
            )));
        }

        debug!(category = %id, cascade, removed_items = dependents.len(), "deleting category");
        for item_id in dependents {
            self.remove_item_unchecked(item_id);
        }

        self.categories.remove(&id);
        self.category_order.retain(|c| *c != id);
        self.aggregates.remove(&id);
        Ok(())
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.get(&id)
    }

    /// Find a category by name (case-insensitive)
    pub fn category_by_name(&self, name: &str) -> Option<&Category> {
        let name = name.trim().to_lowercase();
        self.categories
            .values()
            .find(|c| c.name.to_lowercase() == name)
    }

    /// Find a category by name or ID string
    ///
    /// A short ID shared by several categories is ambiguous and is rejected.
    pub fn find_category(&self, identifier: &str) -> BasketResult<&Category> {
        if let Some(category) = self.category_by_name(identifier) {
            return Ok(category);
        }
        let matches = self.categories_by_creation().filter(|c| c.id.matches(identifier));
        single_match(matches, identifier, "categories")?
            .ok_or_else(|| BasketError::category_not_found(identifier.trim()))
    }

    /// Categories in display order: sort order, then creation order
    pub fn categories(&self) -> Vec<&Category> {
        let mut ordered: Vec<&Category> = self
            .category_order
            .iter()
            .map(|id| &self.categories[id])
            .collect();
        // stable: equal sort orders keep creation order
        ordered.sort_by_key(|c| c.sort_order);
        ordered
    }

    /// Categories in creation order
    pub fn categories_by_creation(&self) -> impl Iterator<Item = &Category> {
        self.category_order.iter().map(|id| &self.categories[id])
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    // === Items ===

    /// Add an item to an existing category
    pub fn add_item(&mut self, category_id: CategoryId, input: NewItem) -> BasketResult<ItemId> {
        let input = self.checked_new_item(input)?;
        let category = self
            .categories
            .get(&category_id)
            .cloned()
            .ok_or_else(|| BasketError::category_not_found(category_id.to_string()))?;

        let item = BudgetItem::new(category_id, input);
        let id = item.id;
        debug!(item = %id, category = %category_id, label = %item.label, planned = %item.planned, "added item");

        self.aggregates.entry(category_id).or_default().include(&item);
        self.item_order.push(id);
        self.items.insert(id, item.clone());
        self.pending.push(BudgetChange::Added { item, category });
        Ok(id)
    }

    /// Add an item, creating its category on first use
    pub fn add_item_in_category_named(
        &mut self,
        category_name: &str,
        input: NewItem,
    ) -> BasketResult<ItemId> {
        // Validate the item before a category can be created for it
        let input = self.checked_new_item(input)?;
        let category_id = match self.category_by_name(category_name) {
            Some(category) => category.id,
            None => self.create_category(category_name, None)?,
        };
        self.add_item(category_id, input)
    }

    /// Apply a partial update to an item
    ///
    /// Only the touched fields are validated. Moving an item to another
    /// category moves its amounts between the two category totals.
    pub fn update_item(&mut self, id: ItemId, patch: ItemPatch) -> BasketResult<()> {
        let before = self
            .items
            .get(&id)
            .ok_or_else(|| BasketError::item_not_found(id.to_string()))?;
        let mut after = before.clone();
        let moves_totals = patch.touches_totals();

        if let Some(category_id) = patch.category_id {
            if !self.categories.contains_key(&category_id) {
                return Err(BasketError::category_not_found(category_id.to_string()));
            }
            after.category_id = category_id;
        }
        if let Some(label) = patch.label {
            validate_label(&label).map_err(|e| BasketError::Validation(e.to_string()))?;
            after.label = label.trim().to_string();
        }
        if let Some(planned) = patch.planned {
            after.planned = self.checked_amount("planned", planned)?;
        }
        if let Some(actual) = patch.actual {
            after.actual = self.checked_amount("actual", actual)?;
        }
        if let Some(note) = patch.note {
            after.note = note.filter(|n| !n.trim().is_empty());
        }
        if let Some(quantity) = patch.quantity {
            after.quantity = quantity;
        }
        if let Some(store) = patch.store {
            after.store = store.filter(|s| !s.trim().is_empty());
        }
        if let Some(shoppable) = patch.shoppable {
            after.shoppable = shoppable;
        }
        after.updated_at = chrono::Utc::now();

        if moves_totals {
            if let Some(aggregate) = self.aggregates.get_mut(&before.category_id) {
                aggregate.exclude(before);
            }
            self.aggregates
                .entry(after.category_id)
                .or_default()
                .include(&after);
        }

        debug!(item = %id, category = %after.category_id, planned = %after.planned, actual = %after.actual, "updated item");
        let category = self.categories[&after.category_id].clone();
        self.items.insert(id, after.clone());
        self.pending.push(BudgetChange::Updated {
            item: after,
            category,
        });
        Ok(())
    }

    /// Delete an item
    pub fn delete_item(&mut self, id: ItemId) -> BasketResult<()> {
        if !self.items.contains_key(&id) {
            return Err(BasketError::item_not_found(id.to_string()));
        }
        debug!(item = %id, "deleting item");
        self.remove_item_unchecked(id);
        Ok(())
    }

    pub fn item(&self, id: ItemId) -> Option<&BudgetItem> {
        self.items.get(&id)
    }

    /// Find an item by label (case-insensitive) or ID string
    ///
    /// A label shared by several items is ambiguous and must be given as an ID.
    pub fn find_item(&self, identifier: &str) -> BasketResult<&BudgetItem> {
        let wanted = identifier.trim().to_lowercase();
        let mut by_label = self.items().filter(|i| i.label.to_lowercase() == wanted);

        match (by_label.next(), by_label.next()) {
            (Some(item), None) => return Ok(item),
            (Some(_), Some(_)) => {
                return Err(BasketError::Validation(format!(
                    "Several items are labelled '{}'; use the item ID instead",
                    identifier.trim()
                )))
            }
            _ => {}
        }

        let matches = self.items().filter(|i| i.id.matches(identifier));
        single_match(matches, identifier, "items")?
            .ok_or_else(|| BasketError::item_not_found(identifier.trim()))
    }

    /// Items in creation order
    pub fn items(&self) -> impl Iterator<Item = &BudgetItem> {
        self.item_order.iter().map(|id| &self.items[id])
    }

    /// Items of one category in creation order
    pub fn items_in_category(&self, category_id: CategoryId) -> impl Iterator<Item = &BudgetItem> {
        self.items().filter(move |i| i.category_id == category_id)
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    // === Totals ===

    /// Per-category sums in display order; empty categories report zeros
    pub fn category_totals(&self) -> Vec<CategoryTotal> {
        self.categories()
            .into_iter()
            .map(|category| self.total_for(category))
            .collect()
    }

    /// Sums for one category
    pub fn category_total(&self, id: CategoryId) -> BasketResult<CategoryTotal> {
        let category = self
            .categories
            .get(&id)
            .ok_or_else(|| BasketError::category_not_found(id.to_string()))?;
        Ok(self.total_for(category))
    }

    /// Sums over every item
    pub fn grand_total(&self) -> GrandTotal {
        self.aggregates.values().fold(GrandTotal::default(), |acc, a| GrandTotal {
            planned: acc.planned + a.planned,
            actual: acc.actual + a.actual,
            item_count: acc.item_count + a.count,
        })
    }

    /// Set or clear the overall spending limit
    pub fn set_spending_limit(&mut self, limit: Option<Money>) -> BasketResult<()> {
        let limit = match limit {
            Some(amount) => Some(self.checked_amount("limit", amount)?),
            None => None,
        };
        debug!(?limit, "spending limit changed");
        self.spending_limit = limit;
        Ok(())
    }

    pub fn spending_limit(&self) -> Option<Money> {
        self.spending_limit
    }

    /// Spending limit against the planned total
    pub fn budget_status(&self) -> BudgetStatus {
        let total = self.grand_total();
        BudgetStatus {
            limit: self.spending_limit,
            planned: total.planned,
            actual: total.actual,
        }
    }

    /// Rebuild every aggregate from the items
    pub fn recompute_totals(&mut self) {
        let mut aggregates: HashMap<CategoryId, Aggregate> = self
            .category_order
            .iter()
            .map(|id| (*id, Aggregate::default()))
            .collect();
        for item in self.items.values() {
            aggregates.entry(item.category_id).or_default().include(item);
        }
        self.aggregates = aggregates;
    }

    /// Drain the change notifications queued since the last call
    pub fn take_changes(&mut self) -> Vec<BudgetChange> {
        std::mem::take(&mut self.pending)
    }

    // === Internals ===

    fn total_for(&self, category: &Category) -> CategoryTotal {
        let aggregate = self.aggregates.get(&category.id).copied().unwrap_or_default();
        CategoryTotal {
            category_id: category.id,
            category_name: category.name.clone(),
            planned: aggregate.planned,
            actual: aggregate.actual,
            item_count: aggregate.count,
        }
    }

    fn remove_item_unchecked(&mut self, id: ItemId) {
        if let Some(item) = self.items.remove(&id) {
            if let Some(aggregate) = self.aggregates.get_mut(&item.category_id) {
                aggregate.exclude(&item);
            }
            self.item_order.retain(|i| *i != id);
            self.pending.push(BudgetChange::Removed { item_id: id });
        }
    }

    fn ensure_unique_name(&self, name: &str, except: Option<CategoryId>) -> BasketResult<()> {
        match self.category_by_name(name) {
            Some(existing) if Some(existing.id) != except => Err(BasketError::Conflict(format!(
                "A category named '{}' already exists",
                existing.name
            ))),
            _ => Ok(()),
        }
    }

    fn checked_amount(&self, field: &'static str, amount: Money) -> BasketResult<Money> {
        validate_amount(field, amount).map_err(|e| BasketError::Validation(e.to_string()))?;
        let rounded = amount.round_to(self.precision);
        validate_amount(field, rounded).map_err(|e| BasketError::Validation(e.to_string()))?;
        Ok(rounded)
    }

    fn checked_new_item(&self, mut input: NewItem) -> BasketResult<NewItem> {
        validate_label(&input.label).map_err(|e| BasketError::Validation(e.to_string()))?;
        input.planned = self.checked_amount("planned", input.planned)?;
        input.actual = self.checked_amount("actual", input.actual)?;
        Ok(input)
    }
}

/// The only element of `matches`, or an error when there are several
fn single_match<'a, T>(
    mut matches: impl Iterator<Item = &'a T>,
    identifier: &str,
    what: &str,
) -> BasketResult<Option<&'a T>> {
    match (matches.next(), matches.next()) {
        (Some(_), Some(_)) => Err(BasketError::Validation(format!(
            "ID '{}' matches several {}; give more of it",
            identifier.trim(),
            what
        ))),
        (first, _) => Ok(first),
    }
}

impl Default for BudgetStore {
    fn default() -> Self {
        Self::new(2)
    }
}
