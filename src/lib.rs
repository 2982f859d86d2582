//! # Bisko Store
//!
//! Embedded entity store for the Bisko field-sales app: named collections of
//! JSON entities over a pluggable key-value substrate, with synchronous CRUD,
//! linear text search, and a change-notification registry so independent
//! views can react to mutations made elsewhere.
//!
//! ## Features
//!
//! - **Named collections**: each collection persists as one JSON array under
//!   its name; insertion order is preserved
//! - **Automatic bookkeeping**: ids and `createdAt`/`updatedAt` timestamps
//!   are store-assigned, never client-supplied
//! - **Change notifications**: every mutation fires a payload-less signal;
//!   subscribers re-fetch what they care about
//! - **Typed repositories**: `Repository<T>` exposes list/filter/insert/
//!   update/delete/search over concrete record types
//! - **Pluggable substrate**: in-memory backend for tests and demos, LMDB
//!   behind the `lmdb` feature for durable data
//! - **Snapshots and seeding**: whole-database export/restore, plus YAML
//!   seed data applied only to absent collections
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bisko_store::prelude::*;
//! use std::sync::Arc;
//!
//! let backend: Arc<dyn KeyValue> = Arc::new(MemoryBackend::new());
//! let notifier = ChangeNotifier::new();
//!
//! let stores: LocalRepository<Store> =
//!     LocalRepository::new(Arc::clone(&backend), notifier.clone());
//!
//! let _sub = notifier.subscribe(|| {
//!     // something changed — re-fetch
//! });
//!
//! let created = stores.insert_one(Store {
//!     name: "Boutique Centrale".into(),
//!     address: "123 Avenue Pompidou, Dakar".into(),
//!     latitude: None,
//!     longitude: None,
//!     phone: None,
//!     contact_name: Some("Moussa Diop".into()),
//!     zone: Some("Dakar".into()),
//! })?;
//! let found = stores.search("centrale")?;
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod snapshot;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        entity::{Entity, FieldMap},
        events::{ChangeNotifier, Subscription},
        repository::{Filter, LocalRepository, Record, Repository, Stored},
        store::EntityStore,
    };

    // === Storage ===
    pub use crate::storage::{KeyValue, MemoryBackend};
    #[cfg(feature = "lmdb")]
    pub use crate::storage::LmdbBackend;

    // === Seed data ===
    pub use crate::config::{SeedConfig, SeedError};

    // === Snapshots ===
    pub use crate::snapshot::Snapshot;

    // === Domain records ===
    pub use crate::entities::{
        Assignment, AssignmentStatus, Invoice, InvoiceItem, InvoiceStatus, PaymentMethod,
        Product, Sale, Store, User, UserRole, UserStatus, Visit, VisitStatus,
    };

    // === External dependencies ===
    pub use anyhow::Result;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
