//! # Storage Layer
//!
//! Two separate concerns live here:
//!
//! - [`RecordStore`]: the in-memory, ordered roster. It is the single owner of
//!   the records; everything else reads it or goes through the controller.
//! - [`SlotStorage`]: a durable key-value store holding serialized text under a
//!   named slot, plus [`persist::Persistence`], which maps the roster onto one
//!   slot.
//!
//! ## Implementations
//!
//! - [`fs::FileSlots`]: production storage, one `<key>.json` file per slot in
//!   the data directory, written atomically.
//! - [`memory::MemSlots`]: in-memory slots for testing, with write-failure
//!   simulation.
//!
//! ## Storage Format
//!
//! ```text
//! <data dir>/
//! ├── students_v1.json    # the roster: a JSON array of records
//! └── config.json         # configuration
//! ```
//!
//! There is no envelope or version header. An absent slot is an empty roster.

use crate::error::Result;
use crate::model::StudentRecord;

pub mod fs;
pub mod memory;
pub mod persist;

/// Abstract interface for a durable key-value store.
///
/// Values are opaque text; the caller owns the encoding.
pub trait SlotStorage {
    /// Read the value under `key`. `Ok(None)` when the slot is absent.
    fn read_slot(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value under `key`.
    fn write_slot(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent slot is not an error.
    fn clear_slot(&self, key: &str) -> Result<()>;
}

impl<T: SlotStorage + ?Sized> SlotStorage for &T {
    fn read_slot(&self, key: &str) -> Result<Option<String>> {
        (**self).read_slot(key)
    }

    fn write_slot(&self, key: &str, value: &str) -> Result<()> {
        (**self).write_slot(key, value)
    }

    fn clear_slot(&self, key: &str) -> Result<()> {
        (**self).clear_slot(key)
    }
}

/// The in-memory roster, in insertion order.
///
/// Operations are positional and never reorder surviving records: appends go
/// to the end, updates replace in place and deletes shift later records left.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    records: Vec<StudentRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<StudentRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn get(&self, position: usize) -> Option<&StudentRecord> {
        self.records.get(position)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends a record. The caller has already validated it.
    pub fn add(&mut self, record: StudentRecord) {
        self.records.push(record);
    }

    /// Replaces the record at `position`.
    ///
    /// Out-of-range positions are ignored and `false` is returned.
    pub fn update_at(&mut self, position: usize, record: StudentRecord) -> bool {
        match self.records.get_mut(position) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }

    /// Removes the record at `position`, shifting later records left.
    ///
    /// Out-of-range positions are ignored. Clearing an edit session that pointed
    /// at the removed row is the caller's job.
    pub fn delete_at(&mut self, position: usize) -> Option<StudentRecord> {
        if position < self.records.len() {
            Some(self.records.remove(position))
        } else {
            None
        }
    }

    /// True if a record other than the one at `exclude` already has `id`.
    pub fn is_duplicate_id(&self, id: &str, exclude: Option<usize>) -> bool {
        self.records
            .iter()
            .enumerate()
            .any(|(position, record)| record.id == id && Some(position) != exclude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> StudentRecord {
        StudentRecord::new("Ann Lee", id, "a@b.com", "1234567890")
    }

    fn store_with(ids: &[&str]) -> RecordStore {
        RecordStore::from_records(ids.iter().map(|id| record(id)).collect())
    }

    fn ids(store: &RecordStore) -> Vec<&str> {
        store.records().iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn add_appends_in_order() {
        let mut store = RecordStore::new();
        store.add(record("1"));
        store.add(record("2"));
        assert_eq!(ids(&store), vec!["1", "2"]);
    }

    #[test]
    fn update_replaces_in_place() {
        let mut store = store_with(&["1", "2", "3"]);
        assert!(store.update_at(1, record("20")));
        assert_eq!(ids(&store), vec!["1", "20", "3"]);
    }

    #[test]
    fn update_out_of_range_is_a_no_op() {
        let mut store = store_with(&["1"]);
        assert!(!store.update_at(5, record("9")));
        assert_eq!(ids(&store), vec!["1"]);
    }

    #[test]
    fn delete_shifts_later_records_left() {
        let mut store = store_with(&["a0", "a1", "a2", "a3", "a4"]);
        let removed = store.delete_at(2).unwrap();
        assert_eq!(removed.id, "a2");
        assert_eq!(ids(&store), vec!["a0", "a1", "a3", "a4"]);
    }

    #[test]
    fn delete_every_position_keeps_the_rest() {
        let original = ["0", "1", "2", "3"];
        for p in 0..original.len() {
            let mut store = store_with(&original);
            store.delete_at(p);
            let expected: Vec<&str> = original
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != p)
                .map(|(_, id)| *id)
                .collect();
            assert_eq!(ids(&store), expected);
        }
    }

    #[test]
    fn delete_out_of_range_is_a_no_op() {
        let mut store = store_with(&["1"]);
        assert!(store.delete_at(1).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn duplicate_check_excludes_position() {
        let store = store_with(&["1", "2"]);
        assert!(store.is_duplicate_id("1", None));
        assert!(!store.is_duplicate_id("1", Some(0)));
        assert!(store.is_duplicate_id("1", Some(1)));
        assert!(!store.is_duplicate_id("3", None));
    }

    #[test]
    fn duplicate_check_sees_other_holders() {
        let store = store_with(&["7", "8", "7"]);
        assert!(store.is_duplicate_id("7", Some(0)));
        assert!(store.is_duplicate_id("7", Some(2)));
    }
}
