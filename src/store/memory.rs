//! In-memory record store
//!
//! Same CRUD contract as the file-backed store, but records live only for
//! the lifetime of the process. Used where data loss on restart is accepted:
//! user preferences, system configurations, and integration settings.

use chrono::{Datelike, Local};

use crate::core::entity::Record;
use crate::core::identity::next_id;

/// CRUD store for one record type held in process memory
#[derive(Debug)]
pub struct MemoryStore<T: Record> {
    records: Vec<T>,
}

impl<T: Record> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> MemoryStore<T> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// All records, in insertion order
    pub fn all(&self) -> &[T] {
        &self.records
    }

    /// Number of records held
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Create a record: assign an id if absent, stamp created_at/updated_at
    /// with today's date, append, and return the stored record.
    pub fn create(&mut self, mut record: T) -> T {
        if record.id().is_none() {
            let existing: Vec<String> = self
                .records
                .iter()
                .filter_map(|r| r.id().map(|id| id.to_string()))
                .collect();
            let year = Local::now().date_naive().year();
            record.set_id(next_id(&existing, T::KIND, year));
        }

        let today = Local::now().date_naive();
        record.set_created_at(Some(today));
        record.set_updated_at(today);

        self.records.push(record.clone());
        record
    }

    /// Get a record by display id (linear scan)
    pub fn get(&self, id: &str) -> Option<&T> {
        self.records.iter().find(|r| r.matches_id(id))
    }

    /// Get a mutable record by display id (linear scan).
    ///
    /// Any field, including status fields, may be overwritten through this;
    /// the store enforces no transitions.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.records.iter_mut().find(|r| r.matches_id(id))
    }

    /// Replace a record in place, preserving its id and original created_at
    /// and refreshing updated_at. Returns the stored record, or None if no
    /// record matches the id.
    pub fn update(&mut self, id: &str, mut record: T) -> Option<T> {
        let index = self.records.iter().position(|r| r.matches_id(id))?;

        if let Some(original_id) = self.records[index].id() {
            record.set_id(*original_id);
        }
        record.set_created_at(self.records[index].created_at());
        record.set_updated_at(Local::now().date_naive());

        self.records[index] = record.clone();
        Some(record)
    }

    /// Delete a record by display id. Returns whether a record was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| !r.matches_id(id));
        self.records.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::preference::{UserPreference, UserRole};

    fn pm_preference() -> UserPreference {
        UserPreference::new(
            "user-001".to_string(),
            "John Smith".to_string(),
            UserRole::ProjectManager,
        )
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let mut store: MemoryStore<UserPreference> = MemoryStore::new();

        let first = store.create(pm_preference());
        let second = store.create(UserPreference::new(
            "user-002".to_string(),
            "Sarah Wilson".to_string(),
            UserRole::SafetyManager,
        ));

        assert_eq!(first.id.unwrap().sequence(), 1);
        assert_eq!(second.id.unwrap().sequence(), 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_create_then_get() {
        let mut store: MemoryStore<UserPreference> = MemoryStore::new();
        let created = store.create(pm_preference());
        let id = created.id.unwrap().to_string();

        let fetched = store.get(&id).expect("record found");
        assert_eq!(fetched.user_name, "John Smith");
        assert!(fetched.created_at.is_some());
    }

    #[test]
    fn test_update_preserves_created_at() {
        let mut store: MemoryStore<UserPreference> = MemoryStore::new();
        let created = store.create(pm_preference());
        let id = created.id.unwrap().to_string();
        let created_at = created.created_at;

        let mut edited = created.clone();
        edited.two_factor_enabled = true;
        edited.created_at = None;

        let updated = store.update(&id, edited).expect("updated");
        assert_eq!(updated.created_at, created_at);
        assert!(updated.two_factor_enabled);
    }

    #[test]
    fn test_delete_then_get_absent() {
        let mut store: MemoryStore<UserPreference> = MemoryStore::new();
        let created = store.create(pm_preference());
        let id = created.id.unwrap().to_string();

        assert!(store.delete(&id));
        assert!(store.get(&id).is_none());
        assert!(!store.delete(&id));
    }

    #[test]
    fn test_status_fields_freely_overwritable() {
        use crate::entities::integration::{IntegrationSetting, ServiceType, SyncStatus};

        let mut store: MemoryStore<IntegrationSetting> = MemoryStore::new();
        let created = store.create(IntegrationSetting::new(
            "Weather API".to_string(),
            ServiceType::Api,
            "https://api.weather.com/v1/current".to_string(),
        ));
        let id = created.id.unwrap().to_string();

        let record = store.get_mut(&id).unwrap();
        record.sync_status = SyncStatus::Failed;
        record.sync_status = SyncStatus::Success;

        assert_eq!(store.get(&id).unwrap().sync_status, SyncStatus::Success);
    }
}
