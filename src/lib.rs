//! basket - household budget tracker with a derived shopping list
//!
//! Budget items are planned and actual expenses grouped into categories.
//! The shopping list is computed from those items; the only state it adds
//! is a "found" flag per entry.
//!
//! # Architecture
//!
//! - `models`: categories, items, money, totals and shopping list entries
//! - `services`: `BudgetStore`, `ShoppingListProjector` and the `Basket`
//!   facade that keeps them consistent
//! - `storage`: whole-state JSON snapshots with atomic writes
//! - `audit`: append-only JSONL audit log
//! - `config`: paths and user settings
//! - `cli`, `display`, `export`: the command line surface
//!
//! # Example
//!
//! ```rust,ignore
//! use basket::config::BasketConfig;
//! use basket::models::{Money, NewItem};
//! use basket::services::Basket;
//!
//! let mut basket = Basket::new(BasketConfig::default());
//! let milk = basket.add_item_in_category_named("Groceries", NewItem::new("Milk", Money::from_cents(450)))?;
//! basket.mark_found(milk, true)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{BasketError, BasketResult};
