//! Key-value substrates the store persists into

pub mod memory;

#[cfg(feature = "lmdb")]
pub mod lmdb;

pub use memory::MemoryBackend;

#[cfg(feature = "lmdb")]
pub use lmdb::LmdbBackend;

use anyhow::Result;

/// The durable substrate: a synchronous string-keyed, string-valued store.
///
/// Each collection persists as one JSON array under its collection-name key.
/// Implementations are shared process-wide via `Arc`, so every store bound to
/// the same key observes the same data. Individual get/set calls are atomic;
/// the read-modify-write cycle built on top of them is not — last write wins
/// at whole-value granularity.
pub trait KeyValue: Send + Sync {
    /// Read the value under `key`, or `None` if the key was never written
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key` entirely. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Every key currently present, in unspecified order
    fn keys(&self) -> Result<Vec<String>>;
}
