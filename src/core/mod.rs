//! Core module - fundamental types and utilities

pub mod config;
pub mod entity;
pub mod identity;
pub mod metrics;
pub mod project;
pub mod settings;

pub use config::Config;
pub use entity::Record;
pub use identity::{next_id, IdParseError, RecordId, RecordKind};
pub use metrics::{
    change_order_metrics, contract_metrics, invoice_metrics, settings_metrics,
    subcontract_metrics, ChangeOrderMetrics, ContractMetrics, InvoiceMetrics, SettingsMetrics,
    SubcontractMetrics,
};
pub use project::{Project, ProjectError};
pub use settings::SettingsManager;
