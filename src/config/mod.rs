//! Seed-data configuration
//!
//! First-run initialization: a YAML document naming collections and the rows
//! they start with. Applying a seed never overwrites a collection the user
//! already has data in — only absent collections are filled.
//!
//! ```yaml
//! collections:
//!   stores:
//!     - name: Boutique Centrale
//!       address: 123 Avenue Pompidou, Dakar
//!       zone: Dakar
//!   products:
//!     - name: Bisko Original
//!       price: 2500
//!       category: Biscuits
//! ```

use crate::core::entity::{Entity, FieldMap};
use crate::core::events::ChangeNotifier;
use crate::storage::KeyValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a seed document
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file '{path}'")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse seed document")]
    Parse(#[from] serde_yaml::Error),
}

/// Initial rows per collection, applied once on an empty substrate
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Collection name → rows to create. Rows are plain field maps; ids and
    /// timestamps are assigned at apply time like any other create.
    #[serde(default)]
    pub collections: IndexMap<String, Vec<FieldMap>>,
}

impl SeedConfig {
    /// Load seed data from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SeedError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load seed data from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, SeedError> {
        let content = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Fill in every collection whose key is absent on the backend.
    ///
    /// A collection that exists — even as an empty array — is left alone, so
    /// user data survives repeated application at startup. Fires one change
    /// notification when anything was seeded. Returns the number of
    /// collections seeded.
    pub fn apply(
        &self,
        backend: &dyn KeyValue,
        notifier: &ChangeNotifier,
    ) -> anyhow::Result<usize> {
        let mut seeded = 0;
        for (name, rows) in &self.collections {
            if backend.get(name)?.is_some() {
                continue;
            }

            let entities: Vec<Entity> = rows.iter().cloned().map(Entity::new).collect();
            backend.set(name, &serde_json::to_string(&entities)?)?;
            seeded += 1;

            tracing::debug!(collection = %name, rows = rows.len(), "seeded collection");
        }

        if seeded > 0 {
            notifier.notify();
        }
        Ok(seeded)
    }
}
