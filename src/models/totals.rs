//! Derived totals
//!
//! These are computed by the budget store from its items and handed out by
//! value. Callers cannot mutate the store's aggregates through them.

use serde::{Deserialize, Serialize};

use super::ids::CategoryId;
use super::money::Money;

/// Sums for a single category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category_id: CategoryId,
    pub category_name: String,
    pub planned: Money,
    pub actual: Money,
    pub item_count: usize,
}

impl CategoryTotal {
    /// Planned minus actual for the category
    pub fn remaining(&self) -> Money {
        self.planned - self.actual
    }
}

/// Sums over every item in the store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrandTotal {
    pub planned: Money,
    pub actual: Money,
    pub item_count: usize,
}

impl GrandTotal {
    /// Planned minus actual across the whole budget
    pub fn remaining(&self) -> Money {
        self.planned - self.actual
    }
}

impl<'a> std::iter::Sum<&'a CategoryTotal> for GrandTotal {
    fn sum<I: Iterator<Item = &'a CategoryTotal>>(iter: I) -> Self {
        iter.fold(GrandTotal::default(), |acc, t| GrandTotal {
            planned: acc.planned + t.planned,
            actual: acc.actual + t.actual,
            item_count: acc.item_count + t.item_count,
        })
    }
}

/// The budget card: spending limit against what is planned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetStatus {
    /// Overall amount available, if one has been set
    pub limit: Option<Money>,
    pub planned: Money,
    pub actual: Money,
}

impl BudgetStatus {
    /// Limit minus planned total, or `None` without a limit
    pub fn remaining(&self) -> Option<Money> {
        self.limit.map(|limit| limit - self.planned)
    }

    /// Whether the planned total exceeds the limit
    pub fn is_over_budget(&self) -> bool {
        self.remaining().is_some_and(|r| r.is_negative())
    }
}
