//! Whole-state snapshots
//!
//! The core never does partial persistence: it is loaded from one
//! [`Snapshot`] at startup and handed back as one at each save point.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BasketError, BasketResult};
use crate::models::{BudgetItem, Category, ItemId, Money};

use super::file_io::{read_json, write_json_atomic};

/// Current on-disk schema version
pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// Everything needed to rebuild a basket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub schema_version: u32,
    /// Categories in creation order
    pub categories: Vec<Category>,
    /// Items in creation order
    pub items: Vec<BudgetItem>,
    /// Items whose shopping list entry is marked found
    #[serde(default)]
    pub found: Vec<ItemId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spending_limit: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    pub fn empty() -> Self {
        Self {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            categories: Vec::new(),
            items: Vec::new(),
            found: Vec::new(),
            spending_limit: None,
            saved_at: None,
        }
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::empty()
    }
}

/// Load/save collaborator for snapshots
pub trait SnapshotStore {
    /// The last saved snapshot, or `None` if nothing was saved yet
    fn load_all(&self) -> BasketResult<Option<Snapshot>>;

    /// Replace the stored snapshot
    fn save_all(&self, snapshot: &Snapshot) -> BasketResult<()>;
}

/// Stores the snapshot as a single pretty-printed JSON file
#[derive(Debug, Clone)]
pub struct JsonSnapshotStore {
    path: PathBuf,
}

impl JsonSnapshotStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl SnapshotStore for JsonSnapshotStore {
    fn load_all(&self) -> BasketResult<Option<Snapshot>> {
        let snapshot: Option<Snapshot> = read_json(&self.path)?;
        if let Some(snapshot) = &snapshot {
            if snapshot.schema_version > SNAPSHOT_SCHEMA_VERSION {
                return Err(BasketError::Storage(format!(
                    "{} was written by a newer version (schema {}, supported {})",
                    self.path.display(),
                    snapshot.schema_version,
                    SNAPSHOT_SCHEMA_VERSION
                )));
            }
            debug!(
                path = %self.path.display(),
                categories = snapshot.categories.len(),
                items = snapshot.items.len(),
                "loaded snapshot"
            );
        }
        Ok(snapshot)
    }

    fn save_all(&self, snapshot: &Snapshot) -> BasketResult<()> {
        let mut stamped = snapshot.clone();
        stamped.saved_at = Some(Utc::now());
        write_json_atomic(&self.path, &stamped)?;
        debug!(path = %self.path.display(), "saved snapshot");
        Ok(())
    }
}
