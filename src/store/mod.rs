//! Generic record storage keyed by (collection, user_id, date).
//!
//! Every resource (journal, todo, affirmation, gratitude) persists the same
//! way: one document per user per day, replaced wholesale on save. The
//! [`RecordStore`] trait is the only seam between the resource services and
//! the storage engine; [`postgres::PgRecordStore`] is the production
//! implementation.

use std::future::Future;

use chrono::NaiveDate;
use serde_json::{Map, Value};

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgRecordStore;

/// A stored document body: the resource-specific fields of one record.
pub type Fields = Map<String, Value>;

/// Any storage engine fault, opaque to callers. The operation and collection
/// give enough context for logs; the driver detail stays in `source`.
#[derive(Debug, thiserror::Error)]
#[error("{operation} failed for collection {collection}: {source}")]
pub struct StorageError {
    operation: &'static str,
    collection: String,
    source: Box<dyn std::error::Error + Send + Sync + 'static>,
}

impl StorageError {
    pub fn new(
        operation: &'static str,
        collection: &str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    ) -> Self {
        Self {
            operation,
            collection: collection.to_string(),
            source: source.into(),
        }
    }
}

/// Document persistence for dated, per-user records.
///
/// `upsert` must be atomic per key: concurrent saves to the same
/// (collection, user_id, date) resolve last-write-wins with no interleaved
/// partial state. Absence is never an error: `find_one` returns `None`,
/// `delete_one` of a missing record is a silent no-op.
pub trait RecordStore: Clone + Send + Sync + 'static {
    /// Replace the full field set of the record at the key, inserting if absent.
    fn upsert(
        &self,
        collection: &str,
        user_id: &str,
        date: NaiveDate,
        fields: Fields,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Fetch the record as a document (key fields included), or `None`.
    fn find_one(
        &self,
        collection: &str,
        user_id: &str,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Option<Fields>, StorageError>> + Send;

    /// Remove the record if present.
    fn delete_one(
        &self,
        collection: &str,
        user_id: &str,
        date: NaiveDate,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// All dates for which the user has a record, most recent first.
    fn list_dates(
        &self,
        collection: &str,
        user_id: &str,
    ) -> impl Future<Output = Result<Vec<NaiveDate>, StorageError>> + Send;
}

/// Rebuild the outward-facing document: stored fields plus the composite key.
/// The row identity itself (table internals) never crosses this boundary.
pub(crate) fn document(user_id: &str, date: NaiveDate, fields: Fields) -> Fields {
    let mut doc = fields;
    doc.insert("user_id".into(), Value::String(user_id.to_string()));
    doc.insert("date".into(), Value::String(date.to_string()));
    doc
}
