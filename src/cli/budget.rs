//! Budget CLI commands
//!
//! The overall spending limit and the totals card.

use clap::Subcommand;

use super::parse_amount;
use crate::display::{format_budget_status, Currency};
use crate::error::BasketResult;
use crate::services::Basket;

/// Budget subcommands
#[derive(Subcommand, Debug)]
pub enum BudgetCommands {
    /// Show the spending limit against planned and actual totals
    Status,

    /// Set the overall spending limit
    Limit {
        /// Amount (e.g., "1000" or "1,000.00")
        amount: String,
    },

    /// Remove the spending limit
    #[command(name = "clear-limit")]
    ClearLimit,
}

impl BudgetCommands {
    pub fn modifies_data(&self) -> bool {
        !matches!(self, Self::Status)
    }
}

/// Handle a budget command
pub fn handle_budget_command(
    basket: &mut Basket,
    currency: &Currency,
    cmd: BudgetCommands,
) -> BasketResult<()> {
    match cmd {
        BudgetCommands::Status => {
            print!("{}", format_budget_status(&basket.budget_status(), currency));
        }

        BudgetCommands::Limit { amount } => {
            basket.set_spending_limit(Some(parse_amount("limit", &amount)?))?;
            if let Some(limit) = basket.budget_status().limit {
                println!("Spending limit set to {}", currency.format(limit));
            }
        }

        BudgetCommands::ClearLimit => {
            basket.set_spending_limit(None)?;
            println!("Spending limit cleared");
        }
    }

    Ok(())
}
