//! Generic record store
//!
//! Collections of records and singleton values, serialized as JSON under
//! string keys of a [`KeyValueStore`]. Every call pauses for the configured
//! latency first. Read-modify-write cycles hold a process-wide write lock
//! from the read until the write completes.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::latency::Latency;
use super::port::KeyValueStore;
use crate::audit::{generate_diff, AuditEntry, AuditLogger};
use crate::error::{HoaError, HoaResult};
use crate::models::{InsertPosition, Record, RecordId, Singleton};

/// Storage keys
pub mod keys {
    pub const HOUSES: &str = "houses";
    pub const FINES: &str = "fines";

    pub fn income(year: &str) -> String {
        format!("income_{}", year)
    }

    pub fn expenses(year: &str) -> String {
        format!("expenses_{}", year)
    }

    pub fn events(year: &str) -> String {
        format!("events_{}", year)
    }

    /// The per-year keys of `year`
    pub fn for_year(year: &str) -> [String; 3] {
        [income(year), expenses(year), events(year)]
    }
}

/// A collection key plus the records it starts with
pub struct Partition<R> {
    key: String,
    seed: fn() -> Vec<R>,
}

impl<R: Record> Partition<R> {
    /// A partition that starts empty
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            seed: Vec::new,
        }
    }

    /// A partition written with `seed` on first read
    pub fn seeded(key: impl Into<String>, seed: fn() -> Vec<R>) -> Self {
        Self {
            key: key.into(),
            seed,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn seed(&self) -> Vec<R> {
        (self.seed)()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stored {
    Absent,
    Present,
    Corrupt,
}

/// JSON collections and singletons over a key/value backend
pub struct RecordStore {
    backend: Arc<dyn KeyValueStore>,
    latency: Latency,
    write_lock: Mutex<()>,
    audit: Option<AuditLogger>,
}

impl RecordStore {
    pub fn new(backend: Arc<dyn KeyValueStore>, latency: Latency) -> Self {
        Self {
            backend,
            latency,
            write_lock: Mutex::new(()),
            audit: None,
        }
    }

    /// Journal every write to `audit`
    pub fn with_audit(mut self, audit: AuditLogger) -> Self {
        self.audit = Some(audit);
        self
    }

    pub fn audit(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    pub fn latency(&self) -> Latency {
        self.latency
    }

    /// Strict read: `None` if never written, `Deserialization` if corrupt
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> HoaResult<Option<T>> {
        self.latency.pause();
        self.read_strict(key)
    }

    /// All records of a partition, in stored order
    ///
    /// A never-written partition is seeded. A corrupt one is reported and
    /// read as its seed, and the file is left alone until the next write.
    pub fn get_all<R: Record>(&self, partition: &Partition<R>) -> HoaResult<Vec<R>> {
        self.latency.pause();
        let _guard = self.lock()?;

        let (records, stored) = self.read_recovering(partition.key(), || partition.seed())?;
        if stored == Stored::Absent && !records.is_empty() {
            self.write(partition.key(), &records)?;
            debug!(key = partition.key(), count = records.len(), "Seeded partition");
        }
        Ok(records)
    }

    /// Assign an id to `record`, insert it and persist the partition
    pub fn create<R: Record>(&self, partition: &Partition<R>, mut record: R) -> HoaResult<R> {
        record.validate()?;
        self.latency.pause();
        let _guard = self.lock()?;

        let key = partition.key();
        let (mut records, _) = self.read_recovering(key, || partition.seed())?;
        record.check_conflicts(&records)?;

        let id = RecordId::generate(R::ID_PREFIX, |candidate| {
            records.iter().any(|r| r.id().as_str() == candidate)
        });
        record.set_id(id);

        match R::INSERT {
            InsertPosition::Front => records.insert(0, record.clone()),
            InsertPosition::Back => records.push(record.clone()),
        }
        self.write(key, &records)?;

        debug!(entity = %R::KIND, key, id = %record.id(), "Created record");
        self.journal(AuditEntry::create(R::KIND, key, record.id().as_str(), &record));
        Ok(record)
    }

    /// Merge the present fields of `patch` into the record with `id`
    pub fn update<R: Record, P: Serialize>(
        &self,
        partition: &Partition<R>,
        id: &str,
        patch: &P,
    ) -> HoaResult<R> {
        let fields = patch_fields(patch)?;
        self.latency.pause();
        let _guard = self.lock()?;

        let key = partition.key();
        let (mut records, _) = self.read_recovering(key, || partition.seed())?;

        let index = records
            .iter()
            .position(|r| r.id().as_str() == id)
            .ok_or_else(|| HoaError::not_found(R::KIND.label(), id))?;

        let before = records.remove(index);
        let mut updated: R = merge_patch(&before, &fields, key)?;
        updated.set_id(before.id().clone());
        updated.validate()?;
        updated.check_conflicts(&records)?;

        records.insert(index, updated.clone());
        self.write(key, &records)?;

        debug!(entity = %R::KIND, key, id, "Updated record");
        self.journal(AuditEntry::update(
            R::KIND,
            key,
            id,
            &before,
            &updated,
            diff_of(&before, &updated),
        ));
        Ok(updated)
    }

    /// Remove the record with `id`; an absent id leaves the partition untouched
    pub fn delete<R: Record>(&self, partition: &Partition<R>, id: &str) -> HoaResult<Option<R>> {
        self.latency.pause();
        let _guard = self.lock()?;

        let key = partition.key();
        let (mut records, _) = self.read_recovering(key, || partition.seed())?;

        let Some(index) = records.iter().position(|r| r.id().as_str() == id) else {
            debug!(entity = %R::KIND, key, id, "Delete of absent record ignored");
            return Ok(None);
        };

        let removed = records.remove(index);
        self.write(key, &records)?;

        debug!(entity = %R::KIND, key, id, "Deleted record");
        self.journal(AuditEntry::delete(R::KIND, key, id, &removed));
        Ok(Some(removed))
    }

    /// Read a singleton, writing its initial value on first read
    pub fn singleton<S: Singleton>(&self) -> HoaResult<S> {
        self.latency.pause();
        let _guard = self.lock()?;

        let (value, stored) = self.read_recovering(S::KEY, S::initial)?;
        if stored == Stored::Absent {
            self.write(S::KEY, &value)?;
            debug!(key = S::KEY, "Seeded singleton");
        }
        Ok(value)
    }

    /// Change a singleton in place and persist it
    ///
    /// Nothing is written if `change` fails or the result is invalid.
    pub fn modify<S, T, F>(&self, change: F) -> HoaResult<T>
    where
        S: Singleton,
        F: FnOnce(&mut S) -> HoaResult<T>,
    {
        self.latency.pause();
        let _guard = self.lock()?;

        let (before, _) = self.read_recovering(S::KEY, S::initial)?;
        let mut value = before.clone();
        let output = change(&mut value)?;
        value.validate()?;

        self.write(S::KEY, &value)?;

        debug!(key = S::KEY, "Updated singleton");
        self.journal(AuditEntry::update(
            S::KIND,
            S::KEY,
            "",
            &before,
            &value,
            diff_of(&before, &value),
        ));
        Ok(output)
    }

    /// Merge the present fields of `patch` into a singleton
    pub fn update_singleton<S: Singleton, P: Serialize>(&self, patch: &P) -> HoaResult<S> {
        let fields = patch_fields(patch)?;
        self.modify(|value: &mut S| {
            *value = merge_patch(&*value, &fields, S::KEY)?;
            Ok(value.clone())
        })
    }

    /// Every key the backend holds
    pub fn keys(&self) -> HoaResult<Vec<String>> {
        self.backend.list()
    }

    /// Drop a key and everything stored under it
    pub fn remove_key(&self, key: &str) -> HoaResult<()> {
        self.latency.pause();
        let _guard = self.lock()?;
        self.backend.remove(key)?;
        debug!(key, "Removed key");
        Ok(())
    }

    fn lock(&self) -> HoaResult<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|e| HoaError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    fn read_strict<T: DeserializeOwned>(&self, key: &str) -> HoaResult<Option<T>> {
        match self.backend.get(key)? {
            None => Ok(None),
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| HoaError::Deserialization {
                    key: key.to_string(),
                    message: e.to_string(),
                }),
        }
    }

    fn read_recovering<T, F>(&self, key: &str, fallback: F) -> HoaResult<(T, Stored)>
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        match self.read_strict(key) {
            Ok(Some(value)) => Ok((value, Stored::Present)),
            Ok(None) => Ok((fallback(), Stored::Absent)),
            Err(err @ HoaError::Deserialization { .. }) => {
                warn!(key, error = %err, "Ignoring corrupt payload");
                Ok((fallback(), Stored::Corrupt))
            }
            Err(err) => Err(err),
        }
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) -> HoaResult<()> {
        let raw = serde_json::to_string_pretty(value)
            .map_err(|e| HoaError::Storage(format!("Failed to serialize {}: {}", key, e)))?;
        self.backend.set(key, &raw)
    }

    fn journal(&self, entry: AuditEntry) {
        if let Some(audit) = &self.audit {
            if let Err(e) = audit.log(&entry) {
                warn!(error = %e, "Failed to write audit entry");
            }
        }
    }
}

fn patch_fields<P: Serialize>(patch: &P) -> HoaResult<Map<String, Value>> {
    match serde_json::to_value(patch)? {
        Value::Object(fields) => Ok(fields),
        other => Err(HoaError::Validation(format!(
            "Patch must be an object, got {}",
            other
        ))),
    }
}

/// Shallow merge; `id` is never taken from the patch
fn merge_patch<T>(current: &T, fields: &Map<String, Value>, key: &str) -> HoaResult<T>
where
    T: Serialize + DeserializeOwned,
{
    let mut value = serde_json::to_value(current)?;
    let Value::Object(target) = &mut value else {
        return Err(HoaError::Validation(format!(
            "Value under '{}' cannot be patched",
            key
        )));
    };

    for (name, field) in fields {
        if name != "id" {
            target.insert(name.clone(), field.clone());
        }
    }

    serde_json::from_value(value)
        .map_err(|e| HoaError::Validation(format!("Invalid patch for '{}': {}", key, e)))
}

fn diff_of<T: Serialize>(before: &T, after: &T) -> Option<String> {
    match (serde_json::to_value(before), serde_json::to_value(after)) {
        (Ok(before), Ok(after)) => generate_diff(&before, &after),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        house::seed_houses, AssociationConfig, AssociationPatch, House, HousePatch, IncomePatch,
        IncomeRecord, IncomeStatus, Money, NewIncome, YearIndex,
    };
    use crate::storage::MemoryStore;
    use chrono::NaiveDate;
    use serde_json::json;

    fn store() -> (RecordStore, Arc<MemoryStore>) {
        let backend = Arc::new(MemoryStore::new());
        (RecordStore::new(backend.clone(), Latency::none()), backend)
    }

    fn income(house: &str) -> IncomeRecord {
        NewIncome::new(
            "cuota",
            house,
            Money::from_units(2500),
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        )
        .into_record("2024")
    }

    #[test]
    fn test_create_assigns_unique_ids_newest_first() {
        let (store, _) = store();
        let partition = Partition::new(keys::income("2024"));

        let first = store.create(&partition, income("Casa 1")).unwrap();
        let second = store.create(&partition, income("Casa 2")).unwrap();

        assert!(!first.id.is_empty());
        assert_ne!(first.id, second.id);
        let all = store.get_all(&partition).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].house, "Casa 2");
    }

    #[test]
    fn test_houses_seeded_once_and_appended() {
        let (store, backend) = store();
        let partition = Partition::seeded(keys::HOUSES, seed_houses);

        assert_eq!(store.get_all(&partition).unwrap().len(), 45);
        assert!(backend.get("houses").unwrap().is_some());

        let mut extra = House::seeded(46);
        extra.id = RecordId::new("");
        store.create(&partition, extra).unwrap();
        let houses = store.get_all(&partition).unwrap();
        assert_eq!(houses.len(), 46);
        assert_eq!(houses[45].number, "46");
    }

    #[test]
    fn test_update_merges_and_keeps_id() {
        let (store, _) = store();
        let partition = Partition::new(keys::income("2024"));
        let created = store.create(&partition, income("Casa 1")).unwrap();

        let patch = IncomePatch {
            status: Some(IncomeStatus::Paid),
            ..Default::default()
        };
        let updated = store.update(&partition, created.id.as_str(), &patch).unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.status, IncomeStatus::Paid);
        assert_eq!(updated.amount, Money::from_units(2500));
    }

    #[test]
    fn test_patch_cannot_change_id() {
        let (store, _) = store();
        let partition = Partition::seeded(keys::HOUSES, seed_houses);

        let updated = store
            .update(&partition, "3", &json!({"id": "999", "owner": "Ana"}))
            .unwrap();
        assert_eq!(updated.id, "3");
        assert_eq!(updated.owner, "Ana");
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let (store, _) = store();
        let partition: Partition<IncomeRecord> = Partition::new(keys::income("2024"));

        let err = store
            .update(&partition, "nope", &IncomePatch::default())
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_update_rejects_invalid_result() {
        let (store, backend) = store();
        let partition = Partition::seeded(keys::HOUSES, seed_houses);
        store.get_all(&partition).unwrap();
        let before = backend.get("houses").unwrap();

        let patch = HousePatch {
            name: Some("   ".into()),
            ..Default::default()
        };
        assert!(store.update(&partition, "1", &patch).unwrap_err().is_validation());
        assert_eq!(backend.get("houses").unwrap(), before);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let (store, _) = store();
        let partition = Partition::new(keys::income("2024"));
        let created = store.create(&partition, income("Casa 1")).unwrap();

        assert!(store.delete(&partition, created.id.as_str()).unwrap().is_some());
        assert!(store.delete(&partition, created.id.as_str()).unwrap().is_none());
        assert!(store.get_all(&partition).unwrap().is_empty());
    }

    #[test]
    fn test_partitions_are_isolated() {
        let (store, _) = store();
        store
            .create(&Partition::new(keys::income("2024")), income("Casa 1"))
            .unwrap();

        let other: Partition<IncomeRecord> = Partition::new(keys::income("2023"));
        assert!(store.get_all(&other).unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_payload_recovery() {
        let (store, backend) = store();
        backend.set("houses", "{not json").unwrap();
        let partition = Partition::seeded(keys::HOUSES, seed_houses);

        assert!(store
            .load::<Vec<House>>("houses")
            .unwrap_err()
            .is_deserialization());
        assert_eq!(store.get_all(&partition).unwrap().len(), 45);
        // left untouched by reads
        assert_eq!(backend.get("houses").unwrap().as_deref(), Some("{not json"));

        let corrupt_income: Partition<IncomeRecord> = Partition::new(keys::income("2024"));
        backend.set("income_2024", "[{]").unwrap();
        assert!(store.get_all(&corrupt_income).unwrap().is_empty());
    }

    #[test]
    fn test_singleton_seeded_and_patched() {
        let (store, _) = store();

        let config: AssociationConfig = store.singleton().unwrap();
        assert_eq!(config.name, "Mi Residencial");

        let patch = AssociationPatch {
            monthly_fee: Some(Money::from_units(3000)),
            ..Default::default()
        };
        let updated: AssociationConfig = store.update_singleton(&patch).unwrap();
        assert_eq!(updated.monthly_fee, Money::from_units(3000));
        assert_eq!(updated.name, "Mi Residencial");
        assert_eq!(
            store.singleton::<AssociationConfig>().unwrap().monthly_fee,
            Money::from_units(3000)
        );
    }

    #[test]
    fn test_failed_modify_writes_nothing() {
        let (store, backend) = store();
        store.singleton::<YearIndex>().unwrap();
        let before = backend.get("years").unwrap();

        let result = store.modify(|index: &mut YearIndex| index.insert("20x4"));
        assert!(result.is_err());
        assert_eq!(backend.get("years").unwrap(), before);
    }
}
