//! Budget status card

use super::Currency;
use crate::models::BudgetStatus;

/// Format the spending limit against planned and actual totals
pub fn format_budget_status(status: &BudgetStatus, currency: &Currency) -> String {
    let mut output = String::new();

    output.push_str("Budget\n");
    match status.limit {
        Some(limit) => output.push_str(&format!("  Limit:      {}\n", currency.format(limit))),
        None => output.push_str("  Limit:      (not set)\n"),
    }
    output.push_str(&format!("  Planned:    {}\n", currency.format(status.planned)));
    output.push_str(&format!("  Actual:     {}\n", currency.format(status.actual)));

    if let Some(remaining) = status.remaining() {
        output.push_str(&format!("  Remaining:  {}\n", currency.format(remaining)));
        if status.is_over_budget() {
            output.push_str(&format!(
                "\n  Over budget by {}\n",
                currency.format(remaining.abs())
            ));
        }
    }

    output
}
