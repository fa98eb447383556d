//! Invoice / payment application record type

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::entity::Record;
use crate::core::identity::{deserialize_lenient_id, RecordId, RecordKind};

/// Invoice status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Submitted,
    Approved,
    Paid,
    Rejected,
    /// Fallback for status strings introduced outside this enum
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvoiceStatus::Draft => write!(f, "Draft"),
            InvoiceStatus::Submitted => write!(f, "Submitted"),
            InvoiceStatus::Approved => write!(f, "Approved"),
            InvoiceStatus::Paid => write!(f, "Paid"),
            InvoiceStatus::Rejected => write!(f, "Rejected"),
            InvoiceStatus::Unknown => write!(f, "Unknown"),
        }
    }
}

impl std::str::FromStr for InvoiceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(InvoiceStatus::Draft),
            "submitted" => Ok(InvoiceStatus::Submitted),
            "approved" => Ok(InvoiceStatus::Approved),
            "paid" => Ok(InvoiceStatus::Paid),
            "rejected" => Ok(InvoiceStatus::Rejected),
            _ => Err(format!("Unknown invoice status: {}", s)),
        }
    }
}

/// A progress billing invoice against a subcontract or contract.
///
/// `amount_due` is derived from the billing fields rather than stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Display id (INV-YYYY-NNN), assigned on create
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,

    /// Project the invoice belongs to
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub project: String,

    /// Billing date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    /// Current status
    #[serde(default)]
    pub status: InvoiceStatus,

    /// Billing period description, e.g. "March Progress"
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Billing company
    pub company: String,

    /// Base contract amount being billed against
    #[serde(default)]
    pub contract_amount: f64,

    /// Approved changes applied to the contract amount
    #[serde(default)]
    pub approved_changes: f64,

    /// Amount billed on prior invoices
    #[serde(default)]
    pub previously_billed: f64,

    /// Amount billed on this invoice
    #[serde(default)]
    pub current_billed: f64,

    /// Retainage withheld from this invoice
    #[serde(default)]
    pub retainage: f64,

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

impl Invoice {
    /// Create a new draft invoice with no id (the store assigns one)
    pub fn new(project: String, company: String, description: String, current_billed: f64) -> Self {
        Self {
            id: None,
            project,
            date: None,
            status: InvoiceStatus::default(),
            description,
            company,
            contract_amount: 0.0,
            approved_changes: 0.0,
            previously_billed: 0.0,
            current_billed,
            retainage: 0.0,
            signatures: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Amount payable on this invoice: current billing less retainage
    pub fn amount_due(&self) -> f64 {
        self.current_billed - self.retainage
    }
}

impl Record for Invoice {
    const KIND: RecordKind = RecordKind::Invoice;

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
    fn test_invoice_amount_due() {
        let mut inv = Invoice::new(
            "Highland Tower Development".to_string(),
            "Superior Concrete Solutions".to_string(),
            "March Progress".to_string(),
            450_000.0,
        );
        inv.retainage = 45_000.0;
        assert_eq!(inv.amount_due(), 405_000.0);
    }

    #[test]
    fn test_invoice_json_roundtrip() {
        let mut inv = Invoice::new(
            "Highland Tower Development".to_string(),
            "Superior Concrete Solutions".to_string(),
            "March Progress".to_string(),
            450_000.0,
        );
        inv.status = InvoiceStatus::Paid;
        let json = serde_json::to_string(&inv).unwrap();
        let parsed: Invoice = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.status, InvoiceStatus::Paid);
        assert_eq!(parsed.amount_due(), inv.amount_due());
    }
}
