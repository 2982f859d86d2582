//! Typed repository boundary over the raw entity store
//!
//! UI-facing code works with concrete record types, not raw JSON maps. A
//! [`Record`] names its collection and searchable fields; a [`Repository`]
//! exposes the narrow CRUD+search surface those callers consume, independent
//! of which persistence provider sits behind it. [`LocalRepository`] is the
//! provider backed by the local [`EntityStore`].

use crate::core::entity::{Entity, FieldMap};
use crate::core::events::ChangeNotifier;
use crate::core::store::EntityStore;
use crate::storage::KeyValue;
use anyhow::{Result, anyhow};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use uuid::Uuid;

/// A domain record that lives in one named collection.
///
/// Records must serialize to a JSON object; the serialized field names are
/// what `searchable_fields` and [`Repository::filter`] match against.
pub trait Record: Serialize + serde::de::DeserializeOwned + Clone + Send + Sync + 'static {
    /// The collection name this record type persists under (e.g., "stores")
    fn collection() -> &'static str;

    /// Serialized names of the fields text search runs over
    fn searchable_fields() -> &'static [&'static str] {
        &[]
    }
}

/// A record together with its store-assigned bookkeeping fields
#[derive(Debug, Clone, PartialEq)]
pub struct Stored<T> {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub record: T,
}

/// Field filter for [`Repository::filter`]: equality against one value, or
/// membership in a set of values
#[derive(Debug, Clone)]
pub enum Filter {
    Eq(Value),
    In(Vec<Value>),
}

impl Filter {
    fn accepts(&self, value: Option<&Value>) -> bool {
        match (self, value) {
            (Filter::Eq(expected), Some(actual)) => actual == expected,
            (Filter::In(allowed), Some(actual)) => allowed.contains(actual),
            (_, None) => false,
        }
    }
}

/// The CRUD+search surface exposed to callers, independent of any specific
/// backend. Swapping the persistence provider means swapping the
/// implementation behind this trait, nothing above it.
pub trait Repository<T: Record>: Send + Sync {
    /// Every stored record, in stored order
    fn list(&self) -> Result<Vec<Stored<T>>>;

    /// Look up one record by id; absent is a normal result
    fn get(&self, id: Uuid) -> Result<Option<Stored<T>>>;

    /// Records whose named field passes the filter
    fn filter(&self, field: &str, filter: &Filter) -> Result<Vec<Stored<T>>>;

    /// Persist a new record; the store assigns id and timestamps
    fn insert_one(&self, record: T) -> Result<Stored<T>>;

    /// Overwrite the domain fields of the record with the given id,
    /// refreshing its update timestamp. `None` when the id is absent.
    fn update_one(&self, id: Uuid, record: &T) -> Result<Option<Stored<T>>>;

    /// Delete by id; true iff a record was removed
    fn delete_one(&self, id: Uuid) -> Result<bool>;

    /// Text search over the record type's searchable fields
    fn search(&self, term: &str) -> Result<Vec<Stored<T>>>;
}

/// [`Repository`] implementation over the local entity store
pub struct LocalRepository<T: Record> {
    store: EntityStore,
    _marker: PhantomData<T>,
}

impl<T: Record> LocalRepository<T> {
    /// Bind a repository to `T`'s collection on the given backend
    pub fn new(backend: Arc<dyn KeyValue>, notifier: ChangeNotifier) -> Self {
        Self {
            store: EntityStore::new(T::collection(), backend, notifier),
            _marker: PhantomData,
        }
    }

    /// The underlying untyped store
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// Decode a raw entity into a typed record, or skip it.
    ///
    /// Rows written under an older field layout may no longer match `T`;
    /// reads stay lenient and drop them rather than failing the whole list.
    fn decode(entity: Entity) -> Option<Stored<T>> {
        let Entity {
            id,
            created_at,
            updated_at,
            fields,
        } = entity;

        match serde_json::from_value(Value::Object(fields)) {
            Ok(record) => Some(Stored {
                id,
                created_at,
                updated_at,
                record,
            }),
            Err(err) => {
                tracing::warn!(
                    collection = T::collection(),
                    id = %id,
                    error = %err,
                    "skipping row that no longer matches the record schema"
                );
                None
            }
        }
    }

    fn decode_strict(entity: Entity) -> Result<Stored<T>> {
        let id = entity.id;
        Self::decode(entity).ok_or_else(|| {
            anyhow!(
                "row {} in '{}' does not match the record schema",
                id,
                T::collection()
            )
        })
    }

    fn encode(record: &T) -> Result<FieldMap> {
        match serde_json::to_value(record)? {
            Value::Object(fields) => Ok(fields),
            other => Err(anyhow!(
                "record for '{}' must serialize to a JSON object, got {}",
                T::collection(),
                other
            )),
        }
    }
}

impl<T: Record> Repository<T> for LocalRepository<T> {
    fn list(&self) -> Result<Vec<Stored<T>>> {
        Ok(self
            .store
            .get_all()?
            .into_iter()
            .filter_map(Self::decode)
            .collect())
    }

    fn get(&self, id: Uuid) -> Result<Option<Stored<T>>> {
        Ok(self.store.get_by_id(id)?.and_then(Self::decode))
    }

    fn filter(&self, field: &str, filter: &Filter) -> Result<Vec<Stored<T>>> {
        Ok(self
            .store
            .get_all()?
            .into_iter()
            .filter(|entity| filter.accepts(entity.field(field)))
            .filter_map(Self::decode)
            .collect())
    }

    fn insert_one(&self, record: T) -> Result<Stored<T>> {
        let created = self.store.create(Self::encode(&record)?)?;
        Self::decode_strict(created)
    }

    fn update_one(&self, id: Uuid, record: &T) -> Result<Option<Stored<T>>> {
        match self.store.update(id, Self::encode(record)?)? {
            Some(updated) => Ok(Some(Self::decode_strict(updated)?)),
            None => Ok(None),
        }
    }

    fn delete_one(&self, id: Uuid) -> Result<bool> {
        self.store.delete(id)
    }

    fn search(&self, term: &str) -> Result<Vec<Stored<T>>> {
        Ok(self
            .store
            .search(term, T::searchable_fields())?
            .into_iter()
            .filter_map(Self::decode)
            .collect())
    }
}
