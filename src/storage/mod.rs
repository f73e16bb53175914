//! Storage layer for basket
//!
//! Persists the whole basket as one JSON snapshot with atomic writes.

pub mod file_io;
pub mod snapshot;

pub use file_io::{read_json, write_json_atomic};
pub use snapshot::{JsonSnapshotStore, Snapshot, SnapshotStore, SNAPSHOT_SCHEMA_VERSION};
