//! Subcontract record type

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::entity::Record;
use crate::core::identity::{deserialize_lenient_id, RecordId, RecordKind};

/// Subcontract lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SubcontractStatus {
    #[default]
    Draft,
    #[serde(rename = "Pending Signature")]
    PendingSignature,
    Executed,
    Complete,
    Terminated,
    /// Fallback for status strings introduced outside this enum
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for SubcontractStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubcontractStatus::Draft => write!(f, "Draft"),
            SubcontractStatus::PendingSignature => write!(f, "Pending Signature"),
            SubcontractStatus::Executed => write!(f, "Executed"),
            SubcontractStatus::Complete => write!(f, "Complete"),
            SubcontractStatus::Terminated => write!(f, "Terminated"),
            SubcontractStatus::Unknown => write!(f, "Unknown"),
        }
    }
}

impl std::str::FromStr for SubcontractStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], " ").as_str() {
            "draft" => Ok(SubcontractStatus::Draft),
            "pending signature" | "pending" => Ok(SubcontractStatus::PendingSignature),
            "executed" => Ok(SubcontractStatus::Executed),
            "complete" | "completed" => Ok(SubcontractStatus::Complete),
            "terminated" => Ok(SubcontractStatus::Terminated),
            _ => Err(format!("Unknown subcontract status: {}", s)),
        }
    }
}

/// A subcontract agreement with a trade contractor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subcontract {
    /// Display id (SC-YYYY-NNN), assigned on create
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,

    /// Project the subcontract belongs to
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub project: String,

    /// Agreement date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    /// Current status
    #[serde(default)]
    pub status: SubcontractStatus,

    /// Subcontractor company name
    pub company: String,

    /// Primary contact name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub contact: String,

    /// Contact email
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,

    /// Trade scope, e.g. "Excavation" or "Concrete"
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub scope: String,

    /// Subcontract amount
    #[serde(default)]
    pub amount: f64,

    /// Scheduled start of work
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,

    /// Scheduled completion of work
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<NaiveDate>,

    /// Collected signatures
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub signatures: Vec<String>,

    /// Creation date stamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDate>,

    /// Last-updated date stamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDate>,
}

impl Subcontract {
    /// Create a new draft subcontract with no id (the store assigns one)
    pub fn new(project: String, company: String, scope: String, amount: f64) -> Self {
        Self {
            id: None,
            project,
            date: None,
            status: SubcontractStatus::default(),
            company,
            contact: String::new(),
            email: String::new(),
            scope,
            amount,
            start_date: None,
            completion_date: None,
            signatures: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }
}

impl Record for Subcontract {
    const KIND: RecordKind = RecordKind::Subcontract;

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn created_at(&self) -> Option<NaiveDate> {
        self.created_at
    }

    fn set_created_at(&mut self, date: Option<NaiveDate>) {
        self.created_at = date;
    }

    fn set_updated_at(&mut self, date: NaiveDate) {
        self.updated_at = Some(date);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subcontract_json_roundtrip() {
        let mut sub = Subcontract::new(
            "Highland Tower Development".to_string(),
            "Deep Excavation Inc.".to_string(),
            "Excavation".to_string(),
            1_250_000.0,
        );
        sub.status = SubcontractStatus::Executed;

        let json = serde_json::to_string(&sub).unwrap();
        let parsed: Subcontract = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.company, sub.company);
        assert_eq!(parsed.status, SubcontractStatus::Executed);
        assert_eq!(parsed.amount, 1_250_000.0);
    }

    #[test]
    fn test_subcontract_unknown_status_fallback() {
        let json = r#"{"company": "X", "status": "On Hold"}"#;
        let parsed: Subcontract = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.status, SubcontractStatus::Unknown);
    }
}
