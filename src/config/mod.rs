//! Configuration module for basket
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence
//! - The core configuration derived from settings

pub mod paths;
pub mod settings;

pub use paths::BasketPaths;
pub use settings::{BasketConfig, Settings};
