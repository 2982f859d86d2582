//! LMDB key-value backend using heed (memory-mapped B-tree).
//!
//! LMDB is an embedded key-value store — no external server required.
//! All operations are synchronous (memory-mapped I/O), which matches the
//! store's fully synchronous execution model.
//!
//! # Layout
//!
//! One named LMDB sub-database, `collections`, holding each collection's
//! JSON array under its collection-name key — the same layout the in-memory
//! backend keeps in its map.
//!
//! # Feature flag
//!
//! Enable with `--features lmdb`. Requires the `heed` crate.

use crate::storage::KeyValue;
use anyhow::Result;
use heed::types::Str;
use heed::{Database, Env, EnvOpenOptions};
use std::path::Path;
use std::sync::Arc;

/// LMDB-backed [`KeyValue`] implementation.
///
/// The `Env` is wrapped in an `Arc` for cheap cloning; clones share the same
/// environment and observe the same data.
#[derive(Clone)]
pub struct LmdbBackend {
    env: Arc<Env>,
    db: Database<Str, Str>,
}

impl LmdbBackend {
    /// Open (or create) an LMDB environment at `path` and initialise the
    /// `collections` named database.
    ///
    /// The map size defaults to 256 MB which is plenty for typical use-cases.
    /// LMDB will not actually allocate that much — it is a virtual address
    /// space reservation.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        std::fs::create_dir_all(path.as_ref())?;

        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(256 * 1024 * 1024)
                .max_dbs(4)
                .max_readers(126)
                .open(path.as_ref())?
        };

        let mut wtxn = env.write_txn()?;
        let db: Database<Str, Str> = env.create_database(&mut wtxn, Some("collections"))?;
        wtxn.commit()?;

        Ok(Self {
            env: Arc::new(env),
            db,
        })
    }
}

impl KeyValue for LmdbBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let rtxn = self.env.read_txn()?;
        Ok(self.db.get(&rtxn, key)?.map(str::to_owned))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut wtxn = self.env.write_txn()?;
        self.db.put(&mut wtxn, key, value)?;
        wtxn.commit()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut wtxn = self.env.write_txn()?;
        self.db.delete(&mut wtxn, key)?;
        wtxn.commit()?;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let rtxn = self.env.read_txn()?;
        let mut keys = Vec::new();
        for item in self.db.iter(&rtxn)? {
            let (key, _value) = item?;
            keys.push(key.to_owned());
        }
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_temp() -> (tempfile::TempDir, LmdbBackend) {
        let dir = tempfile::tempdir().expect("tempdir");
        let backend = LmdbBackend::open(dir.path()).expect("open lmdb");
        (dir, backend)
    }

    #[test]
    fn test_get_missing_key_returns_none() {
        let (_dir, backend) = open_temp();
        assert_eq!(backend.get("stores").unwrap(), None);
    }

    #[test]
    fn test_set_get_remove() {
        let (_dir, backend) = open_temp();
        backend.set("stores", "[]").unwrap();
        assert_eq!(backend.get("stores").unwrap().as_deref(), Some("[]"));

        backend.remove("stores").unwrap();
        assert_eq!(backend.get("stores").unwrap(), None);
    }

    #[test]
    fn test_value_survives_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        {
            let backend = LmdbBackend::open(dir.path()).expect("open lmdb");
            backend.set("visits", r#"[{"id":"v1"}]"#).unwrap();
        }
        let backend = LmdbBackend::open(dir.path()).expect("reopen lmdb");
        assert_eq!(
            backend.get("visits").unwrap().as_deref(),
            Some(r#"[{"id":"v1"}]"#)
        );
    }

    #[test]
    fn test_keys_iterates_all_collections() {
        let (_dir, backend) = open_temp();
        backend.set("stores", "[]").unwrap();
        backend.set("visits", "[]").unwrap();
        backend.set("products", "[]").unwrap();

        let mut keys = backend.keys().unwrap();
        keys.sort();
        assert_eq!(keys, vec!["products", "stores", "visits"]);
    }
}
