//! Data-access layer for the hosted backend
//!
//! `ContentBackend` is the seam between the content provider and the
//! backend-as-a-service. `RestBackend` is the HTTP implementation.

pub mod error;
pub mod query;
pub mod rest;

#[cfg(test)]
pub(crate) mod fake;

pub use error::BackendError;
pub use query::{Direction, SelectQuery};
pub use rest::RestBackend;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Raw row as returned by the backend
pub type Row = serde_json::Map<String, Value>;

/// The six collections the site reads and writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    /// Offered services and prices
    Services,
    /// Event photos
    GalleryItems,
    /// Client quotes
    Testimonials,
    /// Staff shown on the about page
    TeamMembers,
    /// Platform name to profile URL
    SocialLinks,
    /// Key/value settings (hero and about-us images)
    SiteContent,
}

impl Collection {
    /// Every collection, in the order the site loads them
    pub const ALL: [Collection; 6] = [
        Collection::Services,
        Collection::GalleryItems,
        Collection::Testimonials,
        Collection::TeamMembers,
        Collection::SocialLinks,
        Collection::SiteContent,
    ];

    /// Table name on the backend
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Services => "services",
            Collection::GalleryItems => "gallery_items",
            Collection::Testimonials => "testimonials",
            Collection::TeamMembers => "team_members",
            Collection::SocialLinks => "social_links",
            Collection::SiteContent => "site_content",
        }
    }

    /// Column that identifies a row (used for deletes and upsert conflicts)
    pub fn key_column(&self) -> &'static str {
        match self {
            Collection::SiteContent => "key",
            _ => "id",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Collection-style CRUD against the hosted backend
#[async_trait]
pub trait ContentBackend: Send + Sync {
    /// Read rows matching `query`
    async fn select(&self, collection: Collection, query: &SelectQuery)
        -> Result<Vec<Row>, BackendError>;

    /// Insert `rows` (a no-op for an empty slice)
    async fn insert(&self, collection: Collection, rows: &[Value]) -> Result<(), BackendError>;

    /// Delete every row in the collection
    async fn delete_all(&self, collection: Collection) -> Result<(), BackendError>;

    /// Insert `row`, or update it when its key column already exists
    async fn upsert(&self, collection: Collection, row: &Value) -> Result<(), BackendError>;
}

/// Serialize typed records into backend rows
pub fn to_rows<T: Serialize>(records: &[T]) -> Result<Vec<Value>, BackendError> {
    records
        .iter()
        .map(|r| serde_json::to_value(r).map_err(BackendError::from))
        .collect()
}
