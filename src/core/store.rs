//! The local entity store: CRUD + search over one named collection

use crate::core::entity::{Entity, FieldMap};
use crate::core::events::ChangeNotifier;
use crate::storage::KeyValue;
use anyhow::Result;
use std::sync::Arc;
use uuid::Uuid;

/// Durable, synchronous CRUD and search over one named collection.
///
/// Each distinct collection name maps to an independent collection on the
/// backend; multiple stores with the same name over the same backend observe
/// the same data, because every operation re-reads and re-writes the full
/// collection rather than caching anything in memory.
///
/// Every successful mutation (create, update, delete, clear) fires one
/// signal on the shared [`ChangeNotifier`]. A failed lookup on update or
/// delete is a normal negative result — no write, no signal.
///
/// All operations are O(n) in collection size: the whole collection is read
/// and rewritten each call. Intended collection sizes are small (local demo
/// data), and full rewrites keep instances trivially consistent.
pub struct EntityStore {
    collection: String,
    backend: Arc<dyn KeyValue>,
    notifier: ChangeNotifier,
}

impl EntityStore {
    /// Bind a store to a collection name on the given backend.
    ///
    /// The backend and notifier are injected so tests can substitute an
    /// in-memory substrate and count signals.
    pub fn new(
        collection: impl Into<String>,
        backend: Arc<dyn KeyValue>,
        notifier: ChangeNotifier,
    ) -> Self {
        Self {
            collection: collection.into(),
            backend,
            notifier,
        }
    }

    /// The collection name this store is bound to
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// The notifier mutations are signalled on
    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    /// Return every entity in the collection, in stored order.
    ///
    /// A collection that has never been written reads as empty, and so does
    /// one whose backing payload no longer parses — malformed data is not an
    /// error at this layer.
    pub fn get_all(&self) -> Result<Vec<Entity>> {
        let Some(raw) = self.backend.get(&self.collection)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(entities) => Ok(entities),
            Err(err) => {
                tracing::warn!(
                    collection = %self.collection,
                    error = %err,
                    "corrupt collection payload, reading as empty"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Find an entity by id. Absent is a normal result, not an error.
    pub fn get_by_id(&self, id: Uuid) -> Result<Option<Entity>> {
        Ok(self.get_all()?.into_iter().find(|entity| entity.id == id))
    }

    /// Create an entity from caller-supplied fields.
    ///
    /// Generates the id and timestamps, appends to the end of the
    /// collection, persists, and notifies. Returns the full created entity
    /// so the caller can use the id immediately.
    pub fn create(&self, fields: FieldMap) -> Result<Entity> {
        let mut entities = self.get_all()?;
        let entity = Entity::new(fields);
        entities.push(entity.clone());
        self.persist(&entities)?;

        tracing::debug!(collection = %self.collection, id = %entity.id, "entity created");
        self.notifier.notify();

        Ok(entity)
    }

    /// Merge a partial update over the entity with the given id.
    ///
    /// Patch fields win per-field; `id` and `createdAt` stay untouched and
    /// `updatedAt` is refreshed. Returns `None` without side effects when no
    /// entity matches.
    pub fn update(&self, id: Uuid, patch: FieldMap) -> Result<Option<Entity>> {
        let mut entities = self.get_all()?;
        let Some(entity) = entities.iter_mut().find(|entity| entity.id == id) else {
            return Ok(None);
        };

        entity.apply_patch(patch);
        let updated = entity.clone();
        self.persist(&entities)?;

        tracing::debug!(collection = %self.collection, id = %id, "entity updated");
        self.notifier.notify();

        Ok(Some(updated))
    }

    /// Remove the entity with the given id.
    ///
    /// Returns true iff an entity was actually removed; a miss leaves the
    /// collection untouched and fires no signal.
    pub fn delete(&self, id: Uuid) -> Result<bool> {
        let entities = self.get_all()?;
        let before = entities.len();
        let remaining: Vec<Entity> = entities
            .into_iter()
            .filter(|entity| entity.id != id)
            .collect();

        if remaining.len() == before {
            return Ok(false);
        }

        self.persist(&remaining)?;

        tracing::debug!(collection = %self.collection, id = %id, "entity deleted");
        self.notifier.notify();

        Ok(true)
    }

    /// Case-insensitive substring search of `term` against the named fields,
    /// OR-combined. An empty term returns the full collection unfiltered;
    /// non-string field values never match.
    pub fn search(&self, term: &str, fields: &[&str]) -> Result<Vec<Entity>> {
        let entities = self.get_all()?;
        if term.is_empty() {
            return Ok(entities);
        }

        let needle = term.to_lowercase();
        Ok(entities
            .into_iter()
            .filter(|entity| entity.matches(&needle, fields))
            .collect())
    }

    /// Remove the entire collection, back to its never-written state
    pub fn clear(&self) -> Result<()> {
        self.backend.remove(&self.collection)?;

        tracing::debug!(collection = %self.collection, "collection cleared");
        self.notifier.notify();

        Ok(())
    }

    fn persist(&self, entities: &[Entity]) -> Result<()> {
        let raw = serde_json::to_string(entities)?;
        self.backend.set(&self.collection, &raw)
    }
}
