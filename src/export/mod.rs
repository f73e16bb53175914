//! Export module for basket
//!
//! - CSV: budget items or the shopping list, one row per line
//! - JSON: everything, including derived totals, machine-readable
//! - YAML: the same document as JSON, for people

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::{export_items_csv, export_shopping_list_csv};
pub use json::{export_full_json, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_full_yaml;
