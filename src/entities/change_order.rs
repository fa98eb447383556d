//! Change order record type

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::entity::Record;
use crate::core::identity::{deserialize_lenient_id, RecordId, RecordKind};

/// Change order status.
///
/// Transitions are direct writes with no guard; any status may be set from
/// any other status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChangeOrderStatus {
    #[default]
    Draft,
    Submitted,
    #[serde(rename = "Pending Approval")]
    PendingApproval,
    Approved,
    Rejected,
    /// Fallback for status strings introduced outside this enum
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for ChangeOrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeOrderStatus::Draft => write!(f, "Draft"),
            ChangeOrderStatus::Submitted => write!(f, "Submitted"),
            ChangeOrderStatus::PendingApproval => write!(f, "Pending Approval"),
            ChangeOrderStatus::Approved => write!(f, "Approved"),
            ChangeOrderStatus::Rejected => write!(f, "Rejected"),
            ChangeOrderStatus::Unknown => write!(f, "Unknown"),
        }
    }
}

impl std::str::FromStr for ChangeOrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], " ").as_str() {
            "draft" => Ok(ChangeOrderStatus::Draft),
            "submitted" => Ok(ChangeOrderStatus::Submitted),
            "pending approval" | "pending" => Ok(ChangeOrderStatus::PendingApproval),
            "approved" => Ok(ChangeOrderStatus::Approved),
            "rejected" => Ok(ChangeOrderStatus::Rejected),
            _ => Err(format!("Unknown change order status: {}", s)),
        }
    }
}

/// A change order record amending a contract's scope, price, or schedule.
///
/// `contract_id` is a loose string reference; the store does not validate
/// that the referenced contract exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeOrder {
    /// Display id (CO-YYYY-NNN), assigned on create
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,

    /// Id of the contract this change order amends (unvalidated)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_id: Option<String>,

    /// Project the change order belongs to
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub project: String,

    /// Effective date of the change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    /// Current status
    #[serde(default)]
    pub status: ChangeOrderStatus,

    /// What changed
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Justification for the change
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reason: String,

    /// Original contract amount at time of change
    #[serde(default)]
    pub original_amount: f64,

    /// Sum of previously approved changes
    #[serde(default)]
    pub previous_changes: f64,

    /// Amount of this change
    #[serde(default)]
    pub this_change: f64,

    /// Schedule days added by this change
    #[serde(default)]
    pub days_added: i32,

    /// Collected signatures, e.g. "Contractor: John Doe"
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub signatures: Vec<String>,

    /// Creation date stamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDate>,

    /// Last-updated date stamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDate>,
}

impl ChangeOrder {
    /// Create a new draft change order with no id (the store assigns one)
    pub fn new(project: String, description: String, reason: String, this_change: f64) -> Self {
        Self {
            id: None,
            contract_id: None,
            project,
            date: None,
            status: ChangeOrderStatus::default(),
            description,
            reason,
            original_amount: 0.0,
            previous_changes: 0.0,
            this_change,
            days_added: 0,
            signatures: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Contract amount after this change is applied
    pub fn revised_amount(&self) -> f64 {
        self.original_amount + self.previous_changes + self.this_change
    }
}

impl Record for ChangeOrder {
    const KIND: RecordKind = RecordKind::ChangeOrder;

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
    fn test_change_order_revised_amount() {
        let mut co = ChangeOrder::new(
            "Highland Tower Development".to_string(),
            "Added Roof Drains".to_string(),
            "Owner Request".to_string(),
            28_500.0,
        );
        co.original_amount = 45_500_000.0;
        co.previous_changes = 124_500.0;
        assert_eq!(co.revised_amount(), 45_653_000.0);
    }

    #[test]
    fn test_change_order_status_serializes_title_case() {
        let mut co = ChangeOrder::new(
            "Highland Tower Development".to_string(),
            "Added Security Equipment".to_string(),
            "Owner Request".to_string(),
            36_750.0,
        );
        co.status = ChangeOrderStatus::PendingApproval;
        let json = serde_json::to_string(&co).unwrap();
        assert!(json.contains("\"status\":\"Pending Approval\""));
    }

    #[test]
    fn test_change_order_unknown_status_does_not_fail_parse() {
        let json = r#"{"description": "X", "status": "Voided"}"#;
        let parsed: ChangeOrder = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.status, ChangeOrderStatus::Unknown);
    }

    #[test]
    fn test_change_order_malformed_id_degrades_to_none() {
        let json = r#"{"id": "CO-2025-abc", "description": "Hand-edited"}"#;
        let parsed: ChangeOrder = serde_json::from_str(json).unwrap();
        assert!(parsed.id.is_none());
        assert_eq!(parsed.description, "Hand-edited");

        let json = r#"{"id": 5, "description": "Numeric id"}"#;
        let parsed: ChangeOrder = serde_json::from_str(json).unwrap();
        assert!(parsed.id.is_none());
    }

    #[test]
    fn test_change_order_status_any_transition_allowed() {
        let mut co = ChangeOrder::new(
            "Highland Tower Development".to_string(),
            "X".to_string(),
            "Y".to_string(),
            1.0,
        );
        co.status = ChangeOrderStatus::Rejected;
        co.status = ChangeOrderStatus::Approved;
        assert_eq!(co.status, ChangeOrderStatus::Approved);
    }
}
