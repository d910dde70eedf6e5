//! In-memory [`RecordStore`] used by the test suites. Mirrors the Postgres
//! store's observable behavior, including descending date ordering.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use super::{document, Fields, RecordStore, StorageError};

type Key = (String, String, NaiveDate);

#[derive(Clone, Default)]
pub struct MemoryRecordStore {
    records: Arc<Mutex<BTreeMap<Key, Fields>>>,
    failing: Arc<AtomicBool>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail, to exercise StorageFailure paths.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self, operation: &'static str, collection: &str) -> Result<(), StorageError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::new(operation, collection, "simulated outage"));
        }
        Ok(())
    }

    fn key(collection: &str, user_id: &str, date: NaiveDate) -> Key {
        (collection.to_string(), user_id.to_string(), date)
    }
}

impl RecordStore for MemoryRecordStore {
    async fn upsert(
        &self,
        collection: &str,
        user_id: &str,
        date: NaiveDate,
        fields: Fields,
    ) -> Result<(), StorageError> {
        self.check("upsert", collection)?;
        self.records
            .lock()
            .unwrap()
            .insert(Self::key(collection, user_id, date), fields);
        Ok(())
    }

    async fn find_one(
        &self,
        collection: &str,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Option<Fields>, StorageError> {
        self.check("find_one", collection)?;
        let records = self.records.lock().unwrap();
        Ok(records
            .get(&Self::key(collection, user_id, date))
            .cloned()
            .map(|fields| document(user_id, date, fields)))
    }

    async fn delete_one(
        &self,
        collection: &str,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<(), StorageError> {
        self.check("delete_one", collection)?;
        self.records
            .lock()
            .unwrap()
            .remove(&Self::key(collection, user_id, date));
        Ok(())
    }

    async fn list_dates(
        &self,
        collection: &str,
        user_id: &str,
    ) -> Result<Vec<NaiveDate>, StorageError> {
        self.check("list_dates", collection)?;
        let records = self.records.lock().unwrap();
        let mut dates: Vec<NaiveDate> = records
            .keys()
            .filter(|(c, u, _)| c == collection && u == user_id)
            .map(|(_, _, d)| *d)
            .collect();
        dates.sort_unstable_by(|a, b| b.cmp(a));
        Ok(dates)
    }
}
