//! Canonical Bisko domain records
//!
//! One schema for the records the app persists — earlier revisions of the UI
//! drifted between camelCase and snake_case field names and between mock and
//! remote backing stores; these types are the single source of truth. All
//! records serialize with camelCase field names, matching the persisted JSON
//! layout, and each names the collection it lives in plus the fields text
//! search runs over.

use crate::core::repository::Record;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A retail store a commercial visits ("boutique")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub name: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
}

impl Record for Store {
    fn collection() -> &'static str {
        "stores"
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["name", "address", "zone", "contactName"]
    }
}

/// Outcome of a store visit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisitStatus {
    Pending,
    Completed,
    Cancelled,
}

/// One commercial's visit to a store, usually logged by scanning the
/// store's QR code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    pub store_id: Uuid,
    /// Denormalized for list views — the store name at visit time
    pub store_name: String,
    pub date: DateTime<Utc>,
    pub status: VisitStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub agent_id: Uuid,
    pub agent_name: String,
}

impl Record for Visit {
    fn collection() -> &'static str {
        "visits"
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["storeName", "agentName", "notes"]
    }
}

/// A catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub name: String,
    /// Unit price in CFA francs
    pub price: f64,
    pub category: String,
}

impl Record for Product {
    fn collection() -> &'static str {
        "products"
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["name", "category"]
    }
}

/// How an invoice or sale was settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Mobile,
    Transfer,
    Other,
}

/// Lifecycle of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Sent,
    Paid,
    Pending,
}

/// One invoice line, denormalized from the product at invoicing time so the
/// invoice stays stable when the catalog changes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    pub product_id: Uuid,
    pub product_name: String,
    pub unit_price: f64,
    pub quantity: u32,
    /// Per-line discount as an absolute amount
    pub discount: f64,
    pub total: f64,
}

/// An invoice issued to a store during a visit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub store_id: Uuid,
    pub store_name: String,
    pub date: DateTime<Utc>,
    pub items: Vec<InvoiceItem>,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    pub payment_method: PaymentMethod,
    pub status: InvoiceStatus,
}

impl Record for Invoice {
    fn collection() -> &'static str {
        "invoices"
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["storeName"]
    }
}

/// What a user is allowed to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Commercial,
}

/// Whether a user may sign in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
}

/// An app user managed from the admin screens; commercials are created
/// here before they can be assigned store visits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub zone: String,
    pub status: UserStatus,
    /// Refreshed on sign-in, distinct from the store-kept `updatedAt`
    pub last_active: DateTime<Utc>,
}

impl Record for User {
    fn collection() -> &'static str {
        "users"
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["name", "email", "zone"]
    }
}

/// Progress of an assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    Pending,
    Completed,
}

/// A batch of stores an admin assigns to one commercial for a date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub commercial_id: Uuid,
    /// Denormalized for list views — the commercial's name at assignment time
    pub commercial_name: String,
    pub store_ids: Vec<Uuid>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: AssignmentStatus,
    pub created_by: String,
}

impl Record for Assignment {
    fn collection() -> &'static str {
        "visit_assignments"
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["commercialName", "notes"]
    }
}

/// A recorded sale, aggregated for dashboards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub store_id: Uuid,
    pub store_name: String,
    pub date: DateTime<Utc>,
    pub amount: f64,
    pub payment_method: PaymentMethod,
}

impl Record for Sale {
    fn collection() -> &'static str {
        "sales"
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["storeName"]
    }
}
