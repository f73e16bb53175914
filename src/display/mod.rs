//! Display formatting for terminal output
//!
//! Every formatter returns a `String`; the CLI decides where it goes.

pub mod budget;
pub mod category;
pub mod item;
pub mod shopping;

pub use budget::format_budget_status;
pub use category::{format_category_details, format_category_totals};
pub use item::{format_item_details, format_item_list};
pub use shopping::format_shopping_list;

use crate::config::Settings;
use crate::models::Money;

/// How amounts are printed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Currency {
    pub symbol: String,
    pub precision: u32,
}

impl Currency {
    pub fn new(symbol: impl Into<String>, precision: u32) -> Self {
        Self {
            symbol: symbol.into(),
            precision,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.currency_symbol.clone(), settings.amount_precision)
    }

    pub fn format(&self, amount: Money) -> String {
        amount.format_with(&self.symbol, self.precision)
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::new("$", 2)
    }
}
