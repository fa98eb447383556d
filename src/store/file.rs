//! File-backed record store
//!
//! Durable CRUD for one record type against a single JSON file holding a
//! JSON array of flat objects. Every mutation is a full read-modify-write of
//! the file; gcPanel assumes a single writer (one process, one user) and
//! takes no locks.
//!
//! Failure semantics are deliberately soft, matching the rest of the tool:
//! a missing or unparsable file loads as an empty collection, and I/O
//! failures on save are reported as `false` after a warning on stderr.
//! Callers cannot distinguish "not found" from "storage failure" through
//! these return values.

use chrono::{Datelike, Local};
use console::style;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use crate::core::entity::Record;
use crate::core::identity::next_id;
use crate::core::Project;

/// CRUD store for one record type backed by a single JSON file
#[derive(Debug)]
pub struct FileStore<T: Record> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Record> FileStore<T> {
    /// Create a store over an explicit file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    /// Create a store over the project's data file for this record kind
    pub fn for_project(project: &Project) -> Self {
        Self::new(project.data_file(T::KIND))
    }

    /// The JSON file this store reads and writes
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all records.
    ///
    /// A missing file yields an empty list. An unreadable or unparsable file
    /// yields an empty list after a warning on stderr; it is never an error.
    pub fn load(&self) -> Vec<T> {
        if !self.path.exists() {
            return Vec::new();
        }

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!(
                    "{} failed to read {}: {}",
                    style("!").yellow(),
                    self.path.display(),
                    e
                );
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(records) => records,
            Err(e) => {
                eprintln!(
                    "{} failed to parse {}: {}",
                    style("!").yellow(),
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    /// Overwrite the file with the given records.
    ///
    /// Returns false after a warning on stderr if the write fails. The write
    /// is a direct overwrite, not an atomic rename.
    pub fn save(&self, records: &[T]) -> bool {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                eprintln!(
                    "{} failed to create {}: {}",
                    style("!").yellow(),
                    parent.display(),
                    e
                );
                return false;
            }
        }

        let json = match serde_json::to_string_pretty(records) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("{} failed to serialize records: {}", style("!").yellow(), e);
                return false;
            }
        };

        match fs::write(&self.path, json) {
            Ok(()) => true,
            Err(e) => {
                eprintln!(
                    "{} failed to write {}: {}",
                    style("!").yellow(),
                    self.path.display(),
                    e
                );
                false
            }
        }
    }

    /// Create a record: assign an id if absent, stamp created_at/updated_at
    /// with today's date, append, save, and return the stored record.
    pub fn create(&self, mut record: T) -> T {
        let mut records = self.load();

        if record.id().is_none() {
            let existing: Vec<String> = records
                .iter()
                .filter_map(|r| r.id().map(|id| id.to_string()))
                .collect();
            let year = Local::now().date_naive().year();
            record.set_id(next_id(&existing, T::KIND, year));
        }

        let today = Local::now().date_naive();
        record.set_created_at(Some(today));
        record.set_updated_at(today);

        records.push(record.clone());
        self.save(&records);

        record
    }

    /// Get a record by display id (linear scan)
    pub fn get(&self, id: &str) -> Option<T> {
        self.load().into_iter().find(|r| r.matches_id(id))
    }

    /// Replace a record in place, preserving its id and original created_at
    /// and refreshing updated_at. Returns the stored record, or None if no
    /// record matches the id.
    pub fn update(&self, id: &str, mut record: T) -> Option<T> {
        let mut records = self.load();
        let index = records.iter().position(|r| r.matches_id(id))?;

        if let Some(original_id) = records[index].id() {
            record.set_id(*original_id);
        }
        record.set_created_at(records[index].created_at());
        record.set_updated_at(Local::now().date_naive());

        records[index] = record.clone();
        self.save(&records);

        Some(record)
    }

    /// Delete a record by display id. Returns whether a record was removed.
    pub fn delete(&self, id: &str) -> bool {
        let mut records = self.load();
        let before = records.len();
        records.retain(|r| !r.matches_id(id));

        if records.len() == before {
            return false;
        }

        self.save(&records);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::contract::{Contract, ContractStatus};
    use crate::entities::ChangeOrder;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn steel_contract() -> Contract {
        Contract::new(
            "Steel Package".to_string(),
            "Apex Steel".to_string(),
            "Highland Tower Development".to_string(),
            2_000_000.0,
        )
    }

    #[test]
    fn test_load_missing_file_returns_empty() {
        let tmp = tempdir().unwrap();
        let store: FileStore<Contract> = FileStore::new(tmp.path().join("contracts.json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_unparsable_file_returns_empty() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("contracts.json");
        fs::write(&path, "not json at all {{{").unwrap();

        let store: FileStore<Contract> = FileStore::new(path);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_malformed_id_degrades_without_discarding_collection() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("change_orders.json");
        let year = Local::now().date_naive().year();
        // A hand-edited id that no longer parses must cost only that id,
        // never the rest of the file
        fs::write(
            &path,
            format!(
                r#"[
                {{"id": "CO-{0}-abc", "description": "Hand-edited"}},
                {{"id": "CO-{0}-007", "description": "Added Roof Drains"}}
            ]"#,
                year
            ),
        )
        .unwrap();

        let store: FileStore<ChangeOrder> = FileStore::new(path);
        let records = store.load();
        assert_eq!(records.len(), 2);
        assert!(records[0].id.is_none());
        assert_eq!(records[1].id.unwrap().sequence(), 7);

        // A follow-on create continues the sequence and keeps both
        // records on disk
        let created = store.create(ChangeOrder::new(
            String::new(),
            "B".to_string(),
            String::new(),
            0.0,
        ));
        assert_eq!(created.id.unwrap().sequence(), 8);
        assert_eq!(store.load().len(), 3);
    }

    #[test]
    fn test_create_assigns_id_and_timestamps() {
        let tmp = tempdir().unwrap();
        let store: FileStore<Contract> = FileStore::new(tmp.path().join("contracts.json"));

        let created = store.create(steel_contract());
        let id = created.id.expect("id assigned");
        assert_eq!(id.sequence(), 1);
        assert_eq!(id.to_string(), format!("CON-{}-001", id.year()));
        assert!(created.created_at.is_some());
        assert_eq!(created.created_at, created.updated_at);
        assert_eq!(created.status, ContractStatus::Draft);
        assert_eq!(created.current_value(), 2_000_000.0);
    }

    #[test]
    fn test_create_then_get_returns_equal_record() {
        let tmp = tempdir().unwrap();
        let store: FileStore<Contract> = FileStore::new(tmp.path().join("contracts.json"));

        let created = store.create(steel_contract());
        let id = created.id.unwrap().to_string();

        let fetched = store.get(&id).expect("record found");
        assert_eq!(fetched.name, created.name);
        assert_eq!(fetched.original_value, created.original_value);
        assert_eq!(fetched.created_at, created.created_at);
    }

    #[test]
    fn test_sequential_ids_in_same_burst() {
        let tmp = tempdir().unwrap();
        let store: FileStore<ChangeOrder> = FileStore::new(tmp.path().join("change_orders.json"));

        let first = store.create(ChangeOrder::new(
            "Highland Tower Development".to_string(),
            "Added Roof Drains".to_string(),
            "Owner Request".to_string(),
            28_500.0,
        ));
        let second = store.create(ChangeOrder::new(
            "Highland Tower Development".to_string(),
            "Added Security Equipment".to_string(),
            "Owner Request".to_string(),
            36_750.0,
        ));

        assert_eq!(first.id.unwrap().sequence(), 1);
        assert_eq!(second.id.unwrap().sequence(), 2);
    }

    #[test]
    fn test_create_respects_preassigned_id() {
        let tmp = tempdir().unwrap();
        let store: FileStore<ChangeOrder> = FileStore::new(tmp.path().join("change_orders.json"));

        let mut co = ChangeOrder::new(
            "Highland Tower Development".to_string(),
            "X".to_string(),
            "Y".to_string(),
            1.0,
        );
        co.id = Some("CO-2025-042".parse().unwrap());

        let created = store.create(co);
        assert_eq!(created.id.unwrap().to_string(), "CO-2025-042");
    }

    #[test]
    fn test_update_preserves_created_at_and_refreshes_updated_at() {
        let tmp = tempdir().unwrap();
        let store: FileStore<Contract> = FileStore::new(tmp.path().join("contracts.json"));

        // Seed a record with old timestamps directly, bypassing create()
        let old_date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let mut seeded = steel_contract();
        seeded.id = Some("CON-2025-001".parse().unwrap());
        seeded.created_at = Some(old_date);
        seeded.updated_at = Some(old_date);
        assert!(store.save(&[seeded.clone()]));

        let mut edited = seeded.clone();
        edited.approved_changes = 28_500.0;
        edited.created_at = None;

        let updated = store.update("CON-2025-001", edited).expect("updated");
        assert_eq!(updated.created_at, Some(old_date));
        assert_eq!(updated.updated_at, Some(Local::now().date_naive()));
        assert_eq!(updated.current_value(), 2_028_500.0);

        let reloaded = store.get("CON-2025-001").unwrap();
        assert_eq!(reloaded.created_at, Some(old_date));
        assert_eq!(reloaded.approved_changes, 28_500.0);
    }

    #[test]
    fn test_update_missing_returns_none() {
        let tmp = tempdir().unwrap();
        let store: FileStore<Contract> = FileStore::new(tmp.path().join("contracts.json"));
        assert!(store.update("CON-2025-099", steel_contract()).is_none());
    }

    #[test]
    fn test_delete_then_get_returns_none() {
        let tmp = tempdir().unwrap();
        let store: FileStore<Contract> = FileStore::new(tmp.path().join("contracts.json"));

        let created = store.create(steel_contract());
        let id = created.id.unwrap().to_string();

        assert!(store.delete(&id));
        assert!(store.get(&id).is_none());
    }

    #[test]
    fn test_delete_missing_returns_false() {
        let tmp = tempdir().unwrap();
        let store: FileStore<Contract> = FileStore::new(tmp.path().join("contracts.json"));
        assert!(!store.delete("CON-2025-001"));
    }

    #[test]
    fn test_id_generation_skips_malformed_ids_in_file() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("change_orders.json");
        let year = Local::now().date_naive().year();
        // One well-formed id and one record with no id, written by hand
        fs::write(
            &path,
            format!(
                r#"[
                {{"id": "CO-{}-002", "description": "A"}},
                {{"description": "no id at all"}}
            ]"#,
                year
            ),
        )
        .unwrap();

        let store: FileStore<ChangeOrder> = FileStore::new(path);
        let created = store.create(ChangeOrder::new(
            String::new(),
            "B".to_string(),
            String::new(),
            0.0,
        ));
        assert_eq!(created.id.unwrap().sequence(), 3);
    }
}
