//! Contract record type

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::entity::Record;
use crate::core::identity::{deserialize_lenient_id, RecordId, RecordKind};

/// Contract delivery type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ContractType {
    #[default]
    #[serde(rename = "Lump Sum")]
    LumpSum,
    #[serde(rename = "Unit Price")]
    UnitPrice,
    #[serde(rename = "Cost Plus")]
    CostPlus,
    #[serde(rename = "Time and Materials")]
    TimeAndMaterials,
    #[serde(rename = "GMP")]
    Gmp,
    /// Fallback for contract types introduced outside this enum
    #[serde(other)]
    Other,
}

impl std::fmt::Display for ContractType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContractType::LumpSum => write!(f, "Lump Sum"),
            ContractType::UnitPrice => write!(f, "Unit Price"),
            ContractType::CostPlus => write!(f, "Cost Plus"),
            ContractType::TimeAndMaterials => write!(f, "Time and Materials"),
            ContractType::Gmp => write!(f, "GMP"),
            ContractType::Other => write!(f, "Other"),
        }
    }
}

impl std::str::FromStr for ContractType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], " ").as_str() {
            "lump sum" | "lumpsum" => Ok(ContractType::LumpSum),
            "unit price" => Ok(ContractType::UnitPrice),
            "cost plus" => Ok(ContractType::CostPlus),
            "time and materials" | "t m" | "tm" => Ok(ContractType::TimeAndMaterials),
            "gmp" => Ok(ContractType::Gmp),
            "other" => Ok(ContractType::Other),
            _ => Err(format!("Unknown contract type: {}", s)),
        }
    }
}

/// Contract lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ContractStatus {
    #[default]
    Draft,
    #[serde(rename = "Pending Signature")]
    PendingSignature,
    Executed,
    Active,
    Complete,
    Terminated,
    /// Fallback for status strings introduced outside this enum
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContractStatus::Draft => write!(f, "Draft"),
            ContractStatus::PendingSignature => write!(f, "Pending Signature"),
            ContractStatus::Executed => write!(f, "Executed"),
            ContractStatus::Active => write!(f, "Active"),
            ContractStatus::Complete => write!(f, "Complete"),
            ContractStatus::Terminated => write!(f, "Terminated"),
            ContractStatus::Unknown => write!(f, "Unknown"),
        }
    }
}

impl std::str::FromStr for ContractStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], " ").as_str() {
            "draft" => Ok(ContractStatus::Draft),
            "pending signature" | "pending" => Ok(ContractStatus::PendingSignature),
            "executed" => Ok(ContractStatus::Executed),
            "active" => Ok(ContractStatus::Active),
            "complete" | "completed" => Ok(ContractStatus::Complete),
            "terminated" => Ok(ContractStatus::Terminated),
            _ => Err(format!("Unknown contract status: {}", s)),
        }
    }
}

/// A prime or owner contract record.
///
/// The current value is always derived from `original_value` and
/// `approved_changes`; it is never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
    /// Display id (CON-YYYY-NNN), assigned on create
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,

    /// Contract name
    pub name: String,

    /// Contract delivery type
    #[serde(rename = "type", default)]
    pub contract_type: ContractType,

    /// Counterparty / vendor name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub vendor: String,

    /// Project the contract belongs to
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub project: String,

    /// Original contract value
    #[serde(default)]
    pub original_value: f64,

    /// Sum of approved change orders
    #[serde(default)]
    pub approved_changes: f64,

    /// Contract start date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,

    /// Contract end date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,

    /// Current status
    #[serde(default)]
    pub status: ContractStatus,

    /// Free-text scope of work
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    /// Creation date stamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDate>,

    /// Last-updated date stamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDate>,
}

impl Contract {
    /// Create a new draft contract with no id (the store assigns one)
    pub fn new(name: String, vendor: String, project: String, original_value: f64) -> Self {
        Self {
            id: None,
            name,
            contract_type: ContractType::default(),
            vendor,
            project,
            original_value,
            approved_changes: 0.0,
            start_date: None,
            end_date: None,
            status: ContractStatus::default(),
            scope: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Current contract value: original value plus approved changes
    pub fn current_value(&self) -> f64 {
        self.original_value + self.approved_changes
    }
}

impl Record for Contract {
    const KIND: RecordKind = RecordKind::Contract;

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
    fn test_contract_current_value_is_derived() {
        let mut contract = Contract::new(
            "Steel Package".to_string(),
            "Apex Steel".to_string(),
            "Highland Tower Development".to_string(),
            2_000_000.0,
        );
        assert_eq!(contract.current_value(), 2_000_000.0);

        contract.approved_changes = 28_500.0;
        assert_eq!(contract.current_value(), 2_028_500.0);
    }

    #[test]
    fn test_contract_defaults_to_draft() {
        let contract = Contract::new(
            "Steel Package".to_string(),
            "Apex Steel".to_string(),
            "Highland Tower Development".to_string(),
            2_000_000.0,
        );
        assert_eq!(contract.status, ContractStatus::Draft);
    }

    #[test]
    fn test_contract_json_roundtrip() {
        let contract = Contract::new(
            "Concrete Package".to_string(),
            "Superior Concrete Solutions".to_string(),
            "Highland Tower Development".to_string(),
            3_750_000.0,
        );
        let json = serde_json::to_string(&contract).unwrap();
        let parsed: Contract = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.name, contract.name);
        assert_eq!(parsed.original_value, contract.original_value);
        assert_eq!(parsed.status, contract.status);
    }

    #[test]
    fn test_contract_status_unknown_fallback() {
        let json = r#"{"name": "X", "status": "Renegotiated"}"#;
        let parsed: Contract = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.status, ContractStatus::Unknown);
    }

    #[test]
    fn test_contract_type_serializes_display_string() {
        let mut contract = Contract::new(
            "X".to_string(),
            "Y".to_string(),
            "Z".to_string(),
            1.0,
        );
        contract.contract_type = ContractType::TimeAndMaterials;
        let json = serde_json::to_string(&contract).unwrap();
        assert!(json.contains("\"type\":\"Time and Materials\""));
    }
}
