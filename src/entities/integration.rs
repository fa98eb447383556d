//! Third-party integration settings record type

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::entity::Record;
use crate::core::identity::{deserialize_lenient_id, RecordId, RecordKind};

/// Kind of external service an integration talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ServiceType {
    #[default]
    #[serde(rename = "API")]
    Api,
    Database,
    #[serde(rename = "File System")]
    FileSystem,
    #[serde(rename = "Cloud Service")]
    CloudService,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ServiceType::Api => "API",
            ServiceType::Database => "Database",
            ServiceType::FileSystem => "File System",
            ServiceType::CloudService => "Cloud Service",
            ServiceType::Unknown => "Unknown",
        };
        write!(f, "{}", s)
    }
}

/// How an integration authenticates against its service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AuthMethod {
    #[default]
    #[serde(rename = "API Key")]
    ApiKey,
    #[serde(rename = "OAuth")]
    OAuth,
    #[serde(rename = "Basic Auth")]
    BasicAuth,
    Certificate,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AuthMethod::ApiKey => "API Key",
            AuthMethod::OAuth => "OAuth",
            AuthMethod::BasicAuth => "Basic Auth",
            AuthMethod::Certificate => "Certificate",
            AuthMethod::Unknown => "Unknown",
        };
        write!(f, "{}", s)
    }
}

/// Result of the most recent sync attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SyncStatus {
    /// Never synced yet
    #[default]
    Configured,
    Success,
    Failed,
    #[serde(rename = "In Progress")]
    InProgress,
    Disabled,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SyncStatus::Configured => "Configured",
            SyncStatus::Success => "Success",
            SyncStatus::Failed => "Failed",
            SyncStatus::InProgress => "In Progress",
            SyncStatus::Disabled => "Disabled",
            SyncStatus::Unknown => "Unknown",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for SyncStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], " ").as_str() {
            "configured" => Ok(SyncStatus::Configured),
            "success" => Ok(SyncStatus::Success),
            "failed" => Ok(SyncStatus::Failed),
            "in progress" => Ok(SyncStatus::InProgress),
            "disabled" => Ok(SyncStatus::Disabled),
            _ => Err(format!("Unknown sync status: {}", s)),
        }
    }
}

/// Connection settings and sync bookkeeping for one external service.
///
/// Session-scoped: held by the in-memory manager, lost on restart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrationSetting {
    /// Display id (INT-YYYY-NNN), assigned on create
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,

    /// Name of the external service
    pub service_name: String,

    /// Kind of service
    #[serde(default)]
    pub service_type: ServiceType,

    /// Endpoint the integration connects to
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub endpoint_url: String,

    /// Authentication method
    #[serde(default)]
    pub authentication_method: AuthMethod,

    /// Connection timeout in seconds
    #[serde(default)]
    pub connection_timeout: u32,

    /// Whether the integration is enabled
    #[serde(default)]
    pub is_enabled: bool,

    /// Sync cadence description, e.g. "Every hour" or "Real-time"
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sync_frequency: String,

    /// Direction data flows in
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sync_direction: String,

    /// Date of the most recent sync attempt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sync: Option<NaiveDate>,

    /// Result of the most recent sync attempt
    #[serde(default)]
    pub sync_status: SyncStatus,

    /// Cumulative sync error count
    #[serde(default)]
    pub error_count: u32,

    /// Most recent error message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,

    /// Observed success rate percentage
    #[serde(default)]
    pub success_rate: f64,

    /// Creation date stamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDate>,

    /// Last-updated date stamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDate>,
}

impl IntegrationSetting {
    /// Create a new integration record with no id (the store assigns one)
    pub fn new(service_name: String, service_type: ServiceType, endpoint_url: String) -> Self {
        Self {
            id: None,
            service_name,
            service_type,
            endpoint_url,
            authentication_method: AuthMethod::default(),
            connection_timeout: 30,
            is_enabled: true,
            sync_frequency: String::new(),
            sync_direction: String::new(),
            last_sync: None,
            sync_status: SyncStatus::Configured,
            error_count: 0,
            last_error: None,
            success_rate: 0.0,
            created_at: None,
            updated_at: None,
        }
    }
}

impl Record for IntegrationSetting {
    const KIND: RecordKind = RecordKind::Integration;

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
    fn test_integration_defaults_to_configured() {
        let int = IntegrationSetting::new(
            "Weather API".to_string(),
            ServiceType::Api,
            "https://api.weather.com/v1/current".to_string(),
        );
        assert_eq!(int.sync_status, SyncStatus::Configured);
        assert_eq!(int.error_count, 0);
    }

    #[test]
    fn test_sync_status_serializes_title_case() {
        let mut int = IntegrationSetting::new(
            "Document Storage".to_string(),
            ServiceType::CloudService,
            "https://storage.example.com/api/v2".to_string(),
        );
        int.sync_status = SyncStatus::InProgress;
        let json = serde_json::to_string(&int).unwrap();
        assert!(json.contains("\"sync_status\":\"In Progress\""));
    }
}
