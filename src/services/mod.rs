//! Service layer for basket
//!
//! The budget store and the shopping list projector hold the domain logic;
//! [`Basket`] wires them together behind one mutable owner.

pub mod basket;
pub mod budget;
pub mod shopping;

pub use basket::Basket;
pub use budget::{BudgetChange, BudgetStore};
pub use shopping::ShoppingListProjector;
