//! Path management for basket
//!
//! Provides XDG-compliant path resolution for configuration and data.
//!
//! ## Path Resolution Order
//!
//! 1. `BASKET_CLI_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/basket-cli` or `~/.config/basket-cli`
//! 3. Windows: `%APPDATA%\basket-cli`

use std::path::{Path, PathBuf};

use crate::error::BasketError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "BASKET_CLI_DATA_DIR";

/// Manages all paths used by basket
#[derive(Debug, Clone)]
pub struct BasketPaths {
    /// Base directory for all basket data
    base_dir: PathBuf,
}

impl BasketPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home or application-data directory can be
    /// determined.
    pub fn new() -> Result<Self, BasketError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create BasketPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the data directory (~/.config/basket-cli/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to basket.json (budget, items and found flags)
    pub fn snapshot_file(&self) -> PathBuf {
        self.data_dir().join("basket.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), BasketError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| BasketError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| BasketError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if basket has been initialized (snapshot file exists)
    pub fn is_initialized(&self) -> bool {
        self.snapshot_file().exists()
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, BasketError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => {
            let home = std::env::var("HOME").map_err(|_| {
                BasketError::Config("Could not determine HOME directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("basket-cli"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, BasketError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| BasketError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("basket-cli"))
}
