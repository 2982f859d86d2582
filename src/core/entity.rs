//! The entity shape shared by every collection

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Arbitrary domain fields of an entity, keyed by serialized field name.
pub type FieldMap = serde_json::Map<String, Value>;

/// Bookkeeping keys owned by the store. They are assigned at creation time
/// and silently ignored when they appear in a create payload or a patch.
pub const RESERVED_FIELDS: &[&str] = &["id", "createdAt", "updatedAt"];

/// One record in a collection.
///
/// Every entity carries a store-assigned id and creation/update timestamps;
/// everything else is an open set of domain fields supplied by the caller.
/// The serialized form uses camelCase bookkeeping keys (`id`, `createdAt`,
/// `updatedAt`) with the domain fields flattened alongside them, so a
/// collection persists as a plain JSON array of flat objects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Unique identifier within the collection, assigned at creation
    pub id: Uuid,

    /// When this entity was created (immutable)
    pub created_at: DateTime<Utc>,

    /// When this entity was last updated
    pub updated_at: DateTime<Utc>,

    /// Domain fields, passed through untouched
    #[serde(flatten)]
    pub fields: FieldMap,
}

impl Entity {
    /// Build a fresh entity from caller-supplied fields.
    ///
    /// Generates a new id and sets `created_at == updated_at` to the current
    /// time. Reserved keys in `fields` are dropped — the id and timestamps
    /// are never client-supplied on create.
    pub fn new(mut fields: FieldMap) -> Self {
        strip_reserved(&mut fields);
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            fields,
        }
    }

    /// Get a domain field by its serialized name
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Get a domain field as a string, if it is string-valued
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Value::as_str)
    }

    /// Merge a partial update over the existing fields.
    ///
    /// Patch values win per-field. `id` and `created_at` are untouched even
    /// if the patch names them; `updated_at` is refreshed.
    pub fn apply_patch(&mut self, mut patch: FieldMap) {
        strip_reserved(&mut patch);
        for (key, value) in patch {
            self.fields.insert(key, value);
        }
        self.updated_at = Utc::now();
    }

    /// Case-insensitive substring match of `needle_lower` (already
    /// lowercased) against the named fields, OR-combined. Only string-valued
    /// fields participate.
    pub fn matches(&self, needle_lower: &str, fields: &[&str]) -> bool {
        fields.iter().any(|field| {
            self.str_field(field)
                .is_some_and(|value| value.to_lowercase().contains(needle_lower))
        })
    }
}

fn strip_reserved(fields: &mut FieldMap) {
    for key in RESERVED_FIELDS {
        fields.remove(*key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> FieldMap {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_new_assigns_id_and_equal_timestamps() {
        let entity = Entity::new(fields(json!({"name": "Boutique A"})));
        assert!(!entity.id.is_nil());
        assert_eq!(entity.created_at, entity.updated_at);
        assert_eq!(entity.str_field("name"), Some("Boutique A"));
    }

    #[test]
    fn test_new_ignores_client_supplied_bookkeeping_fields() {
        let entity = Entity::new(fields(json!({
            "id": "not-a-real-id",
            "createdAt": "2001-01-01T00:00:00Z",
            "updatedAt": "2001-01-01T00:00:00Z",
            "name": "Boutique A"
        })));
        assert!(entity.field("id").is_none());
        assert!(entity.field("createdAt").is_none());
        assert!(entity.field("updatedAt").is_none());
        assert_eq!(entity.str_field("name"), Some("Boutique A"));
    }

    #[test]
    fn test_apply_patch_merges_and_refreshes_updated_at() {
        let mut entity = Entity::new(fields(json!({"name": "Boutique A", "zone": "Dakar"})));
        let created_at = entity.created_at;
        let updated_before = entity.updated_at;

        entity.apply_patch(fields(json!({"name": "Boutique A+"})));

        assert_eq!(entity.str_field("name"), Some("Boutique A+"));
        assert_eq!(entity.str_field("zone"), Some("Dakar"));
        assert_eq!(entity.created_at, created_at);
        assert!(entity.updated_at >= updated_before);
    }

    #[test]
    fn test_apply_patch_cannot_overwrite_id_or_created_at() {
        let mut entity = Entity::new(fields(json!({"name": "Boutique A"})));
        let id = entity.id;
        let created_at = entity.created_at;

        entity.apply_patch(fields(json!({
            "id": Uuid::new_v4().to_string(),
            "createdAt": "1999-01-01T00:00:00Z"
        })));

        assert_eq!(entity.id, id);
        assert_eq!(entity.created_at, created_at);
        assert!(entity.field("id").is_none());
    }

    #[test]
    fn test_serialized_form_is_flat_camel_case() {
        let entity = Entity::new(fields(json!({"contactName": "Moussa Diop"})));
        let value = serde_json::to_value(&entity).unwrap();

        assert_eq!(value["id"], json!(entity.id.to_string()));
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert_eq!(value["contactName"], json!("Moussa Diop"));
        // No nested "fields" object — domain fields sit next to the bookkeeping keys
        assert!(value.get("fields").is_none());
    }

    #[test]
    fn test_serde_roundtrip() {
        let entity = Entity::new(fields(json!({"name": "Krispo", "price": 1800})));
        let raw = serde_json::to_string(&entity).unwrap();
        let back: Entity = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, entity);
    }

    #[test]
    fn test_matches_is_case_insensitive_and_or_combined() {
        let entity = Entity::new(fields(json!({
            "name": "Mini-Market Sébikotane",
            "zone": "Dakar",
            "rating": 5
        })));

        assert!(entity.matches("market", &["name"]));
        assert!(entity.matches("dakar", &["name", "zone"]));
        assert!(!entity.matches("thiès", &["name", "zone"]));
        // Non-string values never match, even when their text form would
        assert!(!entity.matches("5", &["rating"]));
    }
}
