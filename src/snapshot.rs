//! Whole-database snapshots: export every collection to one JSON document
//! and restore from one.
//!
//! Snapshots operate directly on the [`KeyValue`] substrate rather than going
//! through a per-collection store, so they capture every collection present
//! regardless of which record types the application registered.

use crate::core::entity::Entity;
use crate::core::events::ChangeNotifier;
use crate::storage::KeyValue;
use anyhow::Result;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A point-in-time dump of every collection, suitable for download/backup.
///
/// Collections keep a deterministic order (sorted by name at export time) so
/// two exports of the same data produce the same document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// When the export was taken
    pub exported_at: DateTime<Utc>,

    /// Collection name → its entities, in stored order
    pub collections: IndexMap<String, Vec<Entity>>,
}

impl Snapshot {
    /// Serialize to a pretty-printed JSON document
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a previously exported document
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Total number of entities across all collections
    pub fn entity_count(&self) -> usize {
        self.collections.values().map(Vec::len).sum()
    }
}

/// Export every collection on the backend.
///
/// Keys whose value does not parse as an entity array are not collections
/// (or are corrupt) and are skipped with a warning.
pub fn export(backend: &dyn KeyValue) -> Result<Snapshot> {
    let mut keys = backend.keys()?;
    keys.sort();

    let mut collections = IndexMap::new();
    for key in keys {
        let Some(raw) = backend.get(&key)? else {
            continue;
        };
        match serde_json::from_str::<Vec<Entity>>(&raw) {
            Ok(entities) => {
                collections.insert(key, entities);
            }
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "skipping non-collection key during export");
            }
        }
    }

    Ok(Snapshot {
        exported_at: Utc::now(),
        collections,
    })
}

/// Restore a snapshot, rewriting each contained collection wholesale.
///
/// Collections not named in the snapshot are left alone. Fires a single
/// change notification once everything is written.
pub fn restore(
    backend: &dyn KeyValue,
    snapshot: &Snapshot,
    notifier: &ChangeNotifier,
) -> Result<()> {
    for (name, entities) in &snapshot.collections {
        backend.set(name, &serde_json::to_string(entities)?)?;
    }

    tracing::debug!(
        collections = snapshot.collections.len(),
        entities = snapshot.entity_count(),
        "snapshot restored"
    );
    notifier.notify();

    Ok(())
}
