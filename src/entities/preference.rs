//! User preference record type

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::entity::Record;
use crate::core::identity::{deserialize_lenient_id, RecordId, RecordKind};

/// Application role of the user a preference record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum UserRole {
    Administrator,
    #[serde(rename = "Project Manager")]
    ProjectManager,
    #[serde(rename = "Construction Manager")]
    ConstructionManager,
    #[serde(rename = "Safety Manager")]
    SafetyManager,
    #[serde(rename = "Cost Manager")]
    CostManager,
    #[serde(rename = "Field Supervisor")]
    FieldSupervisor,
    #[serde(rename = "Quality Inspector")]
    QualityInspector,
    #[default]
    Viewer,
    /// Fallback for roles introduced outside this enum
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            UserRole::Administrator => "Administrator",
            UserRole::ProjectManager => "Project Manager",
            UserRole::ConstructionManager => "Construction Manager",
            UserRole::SafetyManager => "Safety Manager",
            UserRole::CostManager => "Cost Manager",
            UserRole::FieldSupervisor => "Field Supervisor",
            UserRole::QualityInspector => "Quality Inspector",
            UserRole::Viewer => "Viewer",
            UserRole::Unknown => "Unknown",
        };
        write!(f, "{}", s)
    }
}

/// Interface theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Auto,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::Auto => "Auto",
            Theme::Unknown => "Unknown",
        };
        write!(f, "{}", s)
    }
}

/// How often notifications are delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NotificationFrequency {
    #[default]
    Immediate,
    Hourly,
    Daily,
    Weekly,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for NotificationFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            NotificationFrequency::Immediate => "Immediate",
            NotificationFrequency::Hourly => "Hourly",
            NotificationFrequency::Daily => "Daily",
            NotificationFrequency::Weekly => "Weekly",
            NotificationFrequency::Unknown => "Unknown",
        };
        write!(f, "{}", s)
    }
}

/// Per-user interface and notification preferences.
///
/// Session-scoped: held by the in-memory manager, lost on restart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPreference {
    /// Display id (PREF-YYYY-NNN), assigned on create
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,

    /// Id of the user these preferences belong to
    pub user_id: String,

    /// Display name of the user
    pub user_name: String,

    /// Application role
    #[serde(default)]
    pub user_role: UserRole,

    /// Interface theme
    #[serde(default)]
    pub theme: Theme,

    /// Display language
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub language: String,

    /// IANA timezone name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub timezone: String,

    /// Preferred date format, e.g. "MM/DD/YYYY"
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub date_format: String,

    /// Notification delivery cadence
    #[serde(default)]
    pub notification_frequency: NotificationFrequency,

    /// Dashboard shown after sign-in
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub default_dashboard: String,

    /// Modules pinned by the user
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub favorite_modules: Vec<String>,

    /// Preferred export format for reports, e.g. "PDF"
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub default_report_format: String,

    /// Whether two-factor authentication is enabled
    #[serde(default)]
    pub two_factor_enabled: bool,

    /// Idle session timeout in minutes
    #[serde(default)]
    pub session_timeout_minutes: u32,

    /// Creation date stamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDate>,

    /// Last-updated date stamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDate>,
}

impl UserPreference {
    /// Create a new preference record with no id (the store assigns one)
    pub fn new(user_id: String, user_name: String, user_role: UserRole) -> Self {
        Self {
            id: None,
            user_id,
            user_name,
            user_role,
            theme: Theme::default(),
            language: "English".to_string(),
            timezone: String::new(),
            date_format: String::new(),
            notification_frequency: NotificationFrequency::default(),
            default_dashboard: String::new(),
            favorite_modules: Vec::new(),
            default_report_format: String::new(),
            two_factor_enabled: false,
            session_timeout_minutes: 60,
            created_at: None,
            updated_at: None,
        }
    }
}

impl Record for UserPreference {
    const KIND: RecordKind = RecordKind::Preference;

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
    fn test_role_serializes_display_string() {
        let pref = UserPreference::new(
            "user-001".to_string(),
            "John Smith".to_string(),
            UserRole::ProjectManager,
        );
        let json = serde_json::to_string(&pref).unwrap();
        assert!(json.contains("\"user_role\":\"Project Manager\""));
    }

    #[test]
    fn test_unknown_role_fallback() {
        let json = r#"{"user_id": "u", "user_name": "n", "user_role": "Intern"}"#;
        let parsed: UserPreference = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.user_role, UserRole::Unknown);
    }
}
