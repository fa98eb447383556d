//! Record trait - common interface for all record types

use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Serialize};

use crate::core::identity::{RecordId, RecordKind};

/// Common trait for all gcPanel records.
///
/// The stores are generic over this trait: it gives them enough access to
/// assign ids on create, stamp workflow timestamps, and match records by id
/// without knowing the concrete schema.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// The record kind (determines the id prefix and data file)
    const KIND: RecordKind;

    /// Get the record's id, if one has been assigned
    fn id(&self) -> Option<&RecordId>;

    /// Assign the record's id
    fn set_id(&mut self, id: RecordId);

    /// Get the creation date stamp
    fn created_at(&self) -> Option<NaiveDate>;

    /// Set the creation date stamp
    fn set_created_at(&mut self, date: Option<NaiveDate>);

    /// Set the last-updated date stamp
    fn set_updated_at(&mut self, date: NaiveDate);

    /// Whether this record's id matches the given display id string
    fn matches_id(&self, id: &str) -> bool {
        self.id().map_or(false, |own| own.to_string() == id)
    }
}
