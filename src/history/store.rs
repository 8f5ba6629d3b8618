//! The calculation history store.
//!
//! [`HistoryStore`] is the only component allowed to touch the history
//! storage key. Every public operation is infallible from the caller's
//! point of view: storage failures are logged and reported as `false` or an
//! empty collection, never as an error.

use uuid::Uuid;

use crate::config::{DEFAULT_STORAGE_KEY, HistorySettings};
use crate::error::EngineResult;
use crate::models::{CalculationHistoryItem, CalculationRecord};

use super::backend::{FileStore, KeyValueStore};
use super::sort::{SortDirection, SortKey, sort_items};

/// Persisted, sortable list of saved calculations.
///
/// The whole collection is stored as one JSON array, newest first.
///
/// # Example
///
/// ```
/// use topup_engine::history::{HistoryStore, MemoryStore, SortDirection, SortKey};
///
/// let mut store = HistoryStore::new(MemoryStore::new());
/// assert!(store.list_sorted(SortKey::CreatedAt, SortDirection::Desc).is_empty());
/// assert!(store.clear());
/// ```
#[derive(Debug, Clone)]
pub struct HistoryStore<S: KeyValueStore> {
    backend: S,
    key: String,
}

impl HistoryStore<FileStore> {
    /// Opens a file-backed store from configured settings.
    pub fn open(settings: &HistorySettings) -> Self {
        Self::with_key(FileStore::new(&settings.data_dir), &settings.storage_key)
    }
}

impl<S: KeyValueStore> HistoryStore<S> {
    /// Creates a store using the default storage key.
    pub fn new(backend: S) -> Self {
        Self::with_key(backend, DEFAULT_STORAGE_KEY)
    }

    /// Creates a store using a custom storage key.
    pub fn with_key(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// Returns the storage key this store owns.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the storage backend.
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Consumes the store and returns its backend.
    pub fn into_backend(self) -> S {
        self.backend
    }

    fn try_load(&self) -> EngineResult<Vec<CalculationHistoryItem>> {
        match self.backend.get(&self.key)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    /// Loads the collection ahead of a rewrite.
    ///
    /// A backend read failure is returned so nothing gets written over data
    /// that could not be read. Unparseable contents are discarded and will
    /// be replaced by the rewrite.
    fn load_for_update(&self) -> EngineResult<Vec<CalculationHistoryItem>> {
        let Some(json) = self.backend.get(&self.key)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&json) {
            Ok(items) => Ok(items),
            Err(err) => {
                tracing::warn!(
                    key = %self.key,
                    error = %err,
                    "Discarding unreadable calculation history"
                );
                Ok(Vec::new())
            }
        }
    }

    fn try_persist(&mut self, items: &[CalculationHistoryItem]) -> EngineResult<()> {
        let json = serde_json::to_string(items)?;
        self.backend.set(&self.key, json)
    }

    /// Returns all saved calculations in stored order (newest first).
    ///
    /// Missing storage yields an empty list; unreadable or malformed storage
    /// is logged and also yields an empty list.
    pub fn list(&self) -> Vec<CalculationHistoryItem> {
        match self.try_load() {
            Ok(items) => {
                tracing::debug!(key = %self.key, count = items.len(), "Loaded calculation history");
                items
            }
            Err(err) => {
                tracing::error!(key = %self.key, error = %err, "Error loading calculation history");
                Vec::new()
            }
        }
    }

    /// Saves a calculation.
    ///
    /// Assigns a new id and creation time, prepends the item and persists
    /// the whole collection. Persistence is best effort: if reading or
    /// writing fails the error is logged and the constructed item is still
    /// returned, so a returned item does not prove it was stored. Existing
    /// history that cannot be read is never overwritten.
    pub fn append(&mut self, record: CalculationRecord) -> CalculationHistoryItem {
        let item = CalculationHistoryItem::new(record);

        let result = self.load_for_update().and_then(|mut items| {
            items.insert(0, item.clone());
            self.try_persist(&items)
        });

        match result {
            Ok(()) => {
                tracing::info!(
                    key = %self.key,
                    id = %item.id,
                    driver = %item.record.driver_name,
                    top_up = %item.record.top_up_amount,
                    "Saved calculation to history"
                );
            }
            Err(err) => {
                tracing::error!(
                    key = %self.key,
                    id = %item.id,
                    error = %err,
                    "Error saving calculation to history"
                );
            }
        }

        item
    }

    /// Deletes the calculation with the given id.
    ///
    /// Returns `false` if storage could not be read or written, leaving the
    /// stored collection untouched. Deleting an id that is not present still
    /// rewrites the collection and returns `true`.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let result = self.load_for_update().and_then(|mut items| {
            let before = items.len();
            items.retain(|item| item.id != id);
            if items.len() == before {
                tracing::warn!(key = %self.key, id = %id, "Calculation to delete not found");
            }
            self.try_persist(&items)
        });

        match result {
            Ok(()) => {
                tracing::info!(key = %self.key, id = %id, "Deleted calculation from history");
                true
            }
            Err(err) => {
                tracing::error!(
                    key = %self.key,
                    id = %id,
                    error = %err,
                    "Error deleting calculation from history"
                );
                false
            }
        }
    }

    /// Deletes the whole collection. Clearing an empty store succeeds.
    pub fn clear(&mut self) -> bool {
        match self.backend.remove(&self.key) {
            Ok(()) => {
                tracing::info!(key = %self.key, "Cleared calculation history");
                true
            }
            Err(err) => {
                tracing::error!(
                    key = %self.key,
                    error = %err,
                    "Error clearing calculation history"
                );
                false
            }
        }
    }

    /// Returns the calculation with the given id, if stored.
    pub fn get(&self, id: Uuid) -> Option<CalculationHistoryItem> {
        self.list().into_iter().find(|item| item.id == id)
    }

    /// Returns all saved calculations sorted by `key`.
    ///
    /// Text fields compare case-insensitively; numbers, dates and
    /// timestamps compare natively. The sort is stable, so ties keep their
    /// stored (newest-first) order in either direction.
    pub fn list_sorted(
        &self,
        key: SortKey,
        direction: SortDirection,
    ) -> Vec<CalculationHistoryItem> {
        let mut items = self.list();
        sort_items(&mut items, key, direction);
        items
    }

    /// Returns sorted calculations whose driver name, call sign or vehicle
    /// number contains `query` (case-insensitive). A blank query returns
    /// everything.
    pub fn search(
        &self,
        query: &str,
        key: SortKey,
        direction: SortDirection,
    ) -> Vec<CalculationHistoryItem> {
        let mut items = self.list_sorted(key, direction);
        items.retain(|item| item.matches(query));
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::history::MemoryStore;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_record(driver: &str, fare: &str, top_up: &str) -> CalculationRecord {
        CalculationRecord {
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            driver_name: driver.to_string(),
            driver_call_sign: format!("{}-CS", driver),
            vehicle_number: "V-118".to_string(),
            shift_start_time: "09:00".to_string(),
            shift_end_time: "17:00".to_string(),
            shift_duration: dec("8"),
            bookings: vec![],
            total_fare: dec(fare),
            top_up_amount: dec(top_up),
            hourly_rate: dec("70"),
        }
    }

    /// A backend whose writes always fail.
    #[derive(Debug, Default)]
    struct FailingStore {
        inner: MemoryStore,
    }

    impl KeyValueStore for FailingStore {
        fn get(&self, key: &str) -> EngineResult<Option<String>> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, _value: String) -> EngineResult<()> {
            Err(EngineError::StorageWrite {
                key: key.to_string(),
                message: "disk full".to_string(),
            })
        }

        fn remove(&mut self, key: &str) -> EngineResult<()> {
            Err(EngineError::StorageWrite {
                key: key.to_string(),
                message: "read-only".to_string(),
            })
        }
    }

    /// A backend that holds data but whose reads always fail.
    #[derive(Debug, Default)]
    struct UnreadableStore {
        inner: MemoryStore,
    }

    impl KeyValueStore for UnreadableStore {
        fn get(&self, key: &str) -> EngineResult<Option<String>> {
            Err(EngineError::StorageRead {
                key: key.to_string(),
                message: "device busy".to_string(),
            })
        }

        fn set(&mut self, key: &str, value: String) -> EngineResult<()> {
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> EngineResult<()> {
            self.inner.remove(key)
        }
    }

    fn unreadable_with_two_items() -> HistoryStore<UnreadableStore> {
        let mut seeded = HistoryStore::new(MemoryStore::new());
        seeded.append(make_record("Sam", "1", "1"));
        seeded.append(make_record("Priya", "2", "2"));
        HistoryStore::new(UnreadableStore {
            inner: seeded.into_backend(),
        })
    }

    fn stored_count(store: HistoryStore<UnreadableStore>) -> usize {
        HistoryStore::new(store.into_backend().inner).list().len()
    }

    #[test]
    fn test_remove_during_read_failure_keeps_history() {
        let mut store = unreadable_with_two_items();

        assert!(!store.remove(Uuid::new_v4()));
        assert_eq!(stored_count(store), 2);
    }

    #[test]
    fn test_append_during_read_failure_keeps_history() {
        let mut store = unreadable_with_two_items();
        let item = store.append(make_record("Alex", "3", "3"));

        assert_eq!(item.record.driver_name, "Alex");
        assert_eq!(stored_count(store), 2);
    }

    #[test]
    fn test_remove_replaces_corrupted_storage() {
        let mut backend = MemoryStore::new();
        backend
            .set(DEFAULT_STORAGE_KEY, "{not valid json".to_string())
            .unwrap();
        let mut store = HistoryStore::new(backend);

        assert!(store.remove(Uuid::new_v4()));
        assert_eq!(
            store.backend().get(DEFAULT_STORAGE_KEY).unwrap(),
            Some("[]".to_string())
        );
    }

    #[test]
    fn test_append_then_list_contains_item() {
        let mut store = HistoryStore::new(MemoryStore::new());
        let item = store.append(make_record("Sam", "400", "160"));

        let items = store.list_sorted(SortKey::CreatedAt, SortDirection::Desc);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0], item);
    }

    #[test]
    fn test_append_prepends_newest_first() {
        let mut store = HistoryStore::new(MemoryStore::new());
        let first = store.append(make_record("A", "1", "1"));
        let second = store.append(make_record("B", "2", "2"));

        let stored = store.list();
        assert_eq!(stored[0].id, second.id);
        assert_eq!(stored[1].id, first.id);
    }

    #[test]
    fn test_remove_excludes_item() {
        let mut store = HistoryStore::new(MemoryStore::new());
        let keep = store.append(make_record("Keep", "1", "1"));
        let gone = store.append(make_record("Gone", "1", "1"));

        assert!(store.remove(gone.id));

        let ids: Vec<Uuid> = store.list().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![keep.id]);
        assert!(store.get(gone.id).is_none());
        assert_eq!(store.get(keep.id), Some(keep));
    }

    #[test]
    fn test_remove_unknown_id_succeeds() {
        let mut store = HistoryStore::new(MemoryStore::new());
        store.append(make_record("Sam", "1", "1"));

        assert!(store.remove(Uuid::new_v4()));
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_clear_twice_is_safe() {
        let mut store = HistoryStore::new(MemoryStore::new());
        store.append(make_record("Sam", "1", "1"));

        assert!(store.clear());
        assert!(store.list_sorted(SortKey::default(), SortDirection::default()).is_empty());
        assert!(store.clear());
    }

    #[test]
    fn test_corrupted_storage_reads_as_empty() {
        let mut backend = MemoryStore::new();
        backend
            .set(DEFAULT_STORAGE_KEY, "{not valid json".to_string())
            .unwrap();
        let store = HistoryStore::new(backend);

        assert!(store.list().is_empty());
        assert!(store.list_sorted(SortKey::TotalFare, SortDirection::Asc).is_empty());
    }

    #[test]
    fn test_wrong_shape_reads_as_empty() {
        let mut backend = MemoryStore::new();
        backend
            .set(DEFAULT_STORAGE_KEY, r#"[{"id": 1}]"#.to_string())
            .unwrap();
        let store = HistoryStore::new(backend);

        assert!(store.list().is_empty());
    }

    #[test]
    fn test_append_returns_item_even_when_persisting_fails() {
        let mut store = HistoryStore::new(FailingStore::default());
        let item = store.append(make_record("Sam", "400", "160"));

        assert_eq!(item.record.driver_name, "Sam");
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_append_over_quota_still_returns_item() {
        let mut store = HistoryStore::new(MemoryStore::with_quota(16));
        let item = store.append(make_record("Sam", "400", "160"));

        assert_eq!(item.record.top_up_amount, dec("160"));
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_remove_and_clear_report_storage_failure() {
        let mut store = HistoryStore::new(FailingStore::default());
        assert!(!store.remove(Uuid::new_v4()));
        assert!(!store.clear());
    }

    #[test]
    fn test_sort_strings_case_insensitive() {
        let mut store = HistoryStore::new(MemoryStore::new());
        store.append(make_record("bravo", "1", "1"));
        store.append(make_record("Charlie", "1", "1"));
        store.append(make_record("ALPHA", "1", "1"));

        let names: Vec<String> = store
            .list_sorted(SortKey::DriverName, SortDirection::Asc)
            .into_iter()
            .map(|i| i.record.driver_name)
            .collect();
        assert_eq!(names, vec!["ALPHA", "bravo", "Charlie"]);

        let names: Vec<String> = store
            .list_sorted(SortKey::DriverName, SortDirection::Desc)
            .into_iter()
            .map(|i| i.record.driver_name)
            .collect();
        assert_eq!(names, vec!["Charlie", "bravo", "ALPHA"]);
    }

    #[test]
    fn test_sort_numbers_natively() {
        let mut store = HistoryStore::new(MemoryStore::new());
        store.append(make_record("A", "100", "0"));
        store.append(make_record("B", "9.5", "0"));
        store.append(make_record("C", "20", "0"));

        let fares: Vec<Decimal> = store
            .list_sorted(SortKey::TotalFare, SortDirection::Asc)
            .into_iter()
            .map(|i| i.record.total_fare)
            .collect();
        assert_eq!(fares, vec![dec("9.5"), dec("20"), dec("100")]);
    }

    #[test]
    fn test_ties_keep_stored_order_in_both_directions() {
        let mut store = HistoryStore::new(MemoryStore::new());
        let older = store.append(make_record("A", "50", "0"));
        let newer = store.append(make_record("B", "50", "0"));

        for direction in [SortDirection::Asc, SortDirection::Desc] {
            let ids: Vec<Uuid> = store
                .list_sorted(SortKey::TotalFare, direction)
                .iter()
                .map(|i| i.id)
                .collect();
            assert_eq!(ids, vec![newer.id, older.id]);
        }
    }

    #[test]
    fn test_search_filters_by_driver_or_vehicle() {
        let mut store = HistoryStore::new(MemoryStore::new());
        store.append(make_record("Sam Okafor", "1", "1"));
        store.append(make_record("Priya Nair", "1", "1"));

        let hits = store.search("okafor", SortKey::default(), SortDirection::default());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].record.driver_name, "Sam Okafor");

        let hits = store.search("NAIR-cs", SortKey::default(), SortDirection::default());
        assert_eq!(hits.len(), 1);

        let hits = store.search("v-118", SortKey::DriverName, SortDirection::Asc);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].record.driver_name, "Priya Nair");

        assert_eq!(store.search("  ", SortKey::default(), SortDirection::default()).len(), 2);
    }

    #[test]
    fn test_custom_key_is_isolated() {
        let mut store = HistoryStore::with_key(MemoryStore::new(), "depot_a");
        store.append(make_record("Sam", "1", "1"));
        assert_eq!(store.key(), "depot_a");

        let backend = store.into_backend();
        assert!(backend.get(DEFAULT_STORAGE_KEY).unwrap().is_none());
        assert!(backend.get("depot_a").unwrap().is_some());
    }
}
