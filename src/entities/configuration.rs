//! System configuration record type

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::entity::Record;
use crate::core::identity::{deserialize_lenient_id, RecordId, RecordKind};

/// Functional area a configuration setting belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum ConfigCategory {
    Security,
    Integration,
    Performance,
    Backup,
    #[default]
    #[serde(other)]
    Other,
}

impl std::fmt::Display for ConfigCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ConfigCategory::Security => "Security",
            ConfigCategory::Integration => "Integration",
            ConfigCategory::Performance => "Performance",
            ConfigCategory::Backup => "Backup",
            ConfigCategory::Other => "Other",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for ConfigCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "security" => Ok(ConfigCategory::Security),
            "integration" => Ok(ConfigCategory::Integration),
            "performance" => Ok(ConfigCategory::Performance),
            "backup" => Ok(ConfigCategory::Backup),
            "other" => Ok(ConfigCategory::Other),
            _ => Err(format!("Unknown config category: {}", s)),
        }
    }
}

/// Declared value type of a configuration setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SettingType {
    #[default]
    String,
    Integer,
    Boolean,
    #[serde(rename = "JSON")]
    Json,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for SettingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SettingType::String => "String",
            SettingType::Integer => "Integer",
            SettingType::Boolean => "Boolean",
            SettingType::Json => "JSON",
            SettingType::Unknown => "Unknown",
        };
        write!(f, "{}", s)
    }
}

/// A system-wide configuration setting.
///
/// `requires_restart` is descriptive metadata only; nothing in gcPanel acts
/// on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfiguration {
    /// Display id (CFG-YYYY-NNN), assigned on create
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,

    /// Functional area
    #[serde(default)]
    pub category: ConfigCategory,

    /// Human-readable setting name
    pub name: String,

    /// Dotted setting key, e.g. "password_policy.min_length"
    pub setting_key: String,

    /// Current value, stored as a string
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub setting_value: String,

    /// Declared value type
    #[serde(default)]
    pub setting_type: SettingType,

    /// What the setting controls
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Whether the setting must have a value
    #[serde(default)]
    pub is_required: bool,

    /// Value applied when none is set
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub default_value: String,

    /// Whether changing the setting needs an admin
    #[serde(default)]
    pub requires_admin: bool,

    /// Whether a change takes effect only after restart (descriptive only)
    #[serde(default)]
    pub requires_restart: bool,

    /// Deployment environment the setting applies to
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub environment: String,

    /// Who last changed the setting
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub last_modified_by: String,

    /// Why the setting was last changed
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub change_reason: String,

    /// Creation date stamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDate>,

    /// Last-updated date stamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDate>,
}

impl SystemConfiguration {
    /// Create a new configuration record with no id (the store assigns one)
    pub fn new(
        category: ConfigCategory,
        name: String,
        setting_key: String,
        setting_value: String,
    ) -> Self {
        Self {
            id: None,
            category,
            name,
            setting_key,
            setting_value,
            setting_type: SettingType::default(),
            description: String::new(),
            is_required: false,
            default_value: String::new(),
            requires_admin: false,
            requires_restart: false,
            environment: "Production".to_string(),
            last_modified_by: String::new(),
            change_reason: String::new(),
            created_at: None,
            updated_at: None,
        }
    }
}

impl Record for SystemConfiguration {
    const KIND: RecordKind = RecordKind::Configuration;

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
    fn test_configuration_json_roundtrip() {
        let cfg = SystemConfiguration::new(
            ConfigCategory::Security,
            "Password Policy".to_string(),
            "password_policy.min_length".to_string(),
            "12".to_string(),
        );
        let json = serde_json::to_string(&cfg).unwrap();
        let parsed: SystemConfiguration = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.category, ConfigCategory::Security);
        assert_eq!(parsed.setting_key, cfg.setting_key);
    }

    #[test]
    fn test_unknown_category_falls_back_to_other() {
        let json = r#"{"name": "X", "setting_key": "k", "category": "Telemetry"}"#;
        let parsed: SystemConfiguration = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.category, ConfigCategory::Other);
    }
}
