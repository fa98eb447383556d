//! Session-scoped settings manager
//!
//! Holds user preferences, system configurations, and integration settings in
//! memory for the lifetime of the process. Nothing here touches disk;
//! restarting the tool discards all settings records.

use chrono::{Local, NaiveDate};

use crate::core::metrics::{settings_metrics, SettingsMetrics};
use crate::entities::configuration::{ConfigCategory, SettingType};
use crate::entities::integration::{AuthMethod, ServiceType, SyncStatus};
use crate::entities::preference::{NotificationFrequency, Theme, UserRole};
use crate::entities::{IntegrationSetting, SystemConfiguration, UserPreference};
use crate::store::MemoryStore;

/// In-memory manager over the three settings collections
#[derive(Debug, Default)]
pub struct SettingsManager {
    preferences: MemoryStore<UserPreference>,
    configurations: MemoryStore<SystemConfiguration>,
    integrations: MemoryStore<IntegrationSetting>,
}

impl SettingsManager {
    /// Create an empty manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a manager seeded with Highland Tower Development sample data
    pub fn with_sample_data() -> Self {
        let mut manager = Self::new();

        let mut smith = UserPreference::new(
            "user-001".to_string(),
            "John Smith".to_string(),
            UserRole::ProjectManager,
        );
        smith.theme = Theme::Dark;
        smith.timezone = "America/New_York".to_string();
        smith.date_format = "MM/DD/YYYY".to_string();
        smith.notification_frequency = NotificationFrequency::Immediate;
        smith.default_dashboard = "Executive Dashboard".to_string();
        smith.favorite_modules = vec![
            "Dashboard".to_string(),
            "Cost Management".to_string(),
            "RFIs".to_string(),
            "Daily Reports".to_string(),
            "Analytics".to_string(),
        ];
        smith.default_report_format = "PDF".to_string();
        smith.two_factor_enabled = true;
        smith.session_timeout_minutes = 480;
        manager.preferences.create(smith);

        let mut wilson = UserPreference::new(
            "user-002".to_string(),
            "Sarah Wilson".to_string(),
            UserRole::SafetyManager,
        );
        wilson.theme = Theme::Light;
        wilson.timezone = "America/New_York".to_string();
        wilson.date_format = "DD/MM/YYYY".to_string();
        wilson.notification_frequency = NotificationFrequency::Immediate;
        wilson.default_dashboard = "Safety Dashboard".to_string();
        wilson.favorite_modules = vec![
            "Safety".to_string(),
            "Inspections".to_string(),
            "Quality Control".to_string(),
            "Daily Reports".to_string(),
        ];
        wilson.default_report_format = "Excel".to_string();
        wilson.two_factor_enabled = true;
        wilson.session_timeout_minutes = 240;
        manager.preferences.create(wilson);

        let mut password_policy = SystemConfiguration::new(
            ConfigCategory::Security,
            "Password Policy".to_string(),
            "password_policy.min_length".to_string(),
            "12".to_string(),
        );
        password_policy.setting_type = SettingType::Integer;
        password_policy.description = "Minimum password length for user accounts".to_string();
        password_policy.is_required = true;
        password_policy.default_value = "8".to_string();
        password_policy.requires_admin = true;
        password_policy.last_modified_by = "System Administrator".to_string();
        password_policy.change_reason = "Enhanced security requirements".to_string();
        manager.configurations.create(password_policy);

        let mut connection_pool = SystemConfiguration::new(
            ConfigCategory::Performance,
            "Database Connection Pool".to_string(),
            "database.connection_pool.max_size".to_string(),
            "50".to_string(),
        );
        connection_pool.setting_type = SettingType::Integer;
        connection_pool.description =
            "Maximum number of database connections in the pool".to_string();
        connection_pool.is_required = true;
        connection_pool.default_value = "20".to_string();
        connection_pool.requires_admin = true;
        connection_pool.requires_restart = true;
        connection_pool.last_modified_by = "Database Administrator".to_string();
        connection_pool.change_reason =
            "Performance optimization for Highland Tower load".to_string();
        manager.configurations.create(connection_pool);

        let mut rate_limiting = SystemConfiguration::new(
            ConfigCategory::Integration,
            "API Rate Limiting".to_string(),
            "api.rate_limit.requests_per_hour".to_string(),
            "10000".to_string(),
        );
        rate_limiting.setting_type = SettingType::Integer;
        rate_limiting.description = "Maximum API requests per hour per client".to_string();
        rate_limiting.is_required = true;
        rate_limiting.default_value = "1000".to_string();
        rate_limiting.requires_admin = true;
        rate_limiting.last_modified_by = "API Administrator".to_string();
        rate_limiting.change_reason =
            "Increased limit for Highland Tower mobile apps".to_string();
        manager.configurations.create(rate_limiting);

        let mut weather = IntegrationSetting::new(
            "Weather API".to_string(),
            ServiceType::Api,
            "https://api.weather.com/v1/current".to_string(),
        );
        weather.authentication_method = AuthMethod::ApiKey;
        weather.sync_frequency = "Every hour".to_string();
        weather.sync_direction = "Import".to_string();
        weather.sync_status = SyncStatus::Success;
        weather.last_sync = NaiveDate::from_ymd_opt(2025, 5, 28);
        weather.success_rate = 99.8;
        manager.integrations.create(weather);

        let mut storage = IntegrationSetting::new(
            "Document Storage".to_string(),
            ServiceType::CloudService,
            "https://storage.highland.com/api/v2".to_string(),
        );
        storage.authentication_method = AuthMethod::OAuth;
        storage.connection_timeout = 60;
        storage.sync_frequency = "Real-time".to_string();
        storage.sync_direction = "Bidirectional".to_string();
        storage.sync_status = SyncStatus::Success;
        storage.last_sync = NaiveDate::from_ymd_opt(2025, 5, 28);
        storage.error_count = 2;
        storage.last_error = Some("Temporary network timeout on 2025-05-27".to_string());
        storage.success_rate = 97.5;
        manager.integrations.create(storage);

        let mut email = IntegrationSetting::new(
            "Email Service".to_string(),
            ServiceType::Api,
            "https://api.sendgrid.com/v3/mail/send".to_string(),
        );
        email.authentication_method = AuthMethod::ApiKey;
        email.sync_frequency = "Real-time".to_string();
        email.sync_direction = "Export".to_string();
        email.sync_status = SyncStatus::Success;
        email.last_sync = NaiveDate::from_ymd_opt(2025, 5, 28);
        email.error_count = 1;
        email.last_error = Some("Rate limit exceeded on 2025-05-26".to_string());
        email.success_rate = 99.2;
        manager.integrations.create(email);

        manager
    }

    /// User preference store
    pub fn preferences(&self) -> &MemoryStore<UserPreference> {
        &self.preferences
    }

    /// Mutable user preference store
    pub fn preferences_mut(&mut self) -> &mut MemoryStore<UserPreference> {
        &mut self.preferences
    }

    /// System configuration store
    pub fn configurations(&self) -> &MemoryStore<SystemConfiguration> {
        &self.configurations
    }

    /// Mutable system configuration store
    pub fn configurations_mut(&mut self) -> &mut MemoryStore<SystemConfiguration> {
        &mut self.configurations
    }

    /// Integration settings store
    pub fn integrations(&self) -> &MemoryStore<IntegrationSetting> {
        &self.integrations
    }

    /// Mutable integration settings store
    pub fn integrations_mut(&mut self) -> &mut MemoryStore<IntegrationSetting> {
        &mut self.integrations
    }

    /// Preferences belonging to users with the given role
    pub fn preferences_by_role(&self, role: UserRole) -> Vec<&UserPreference> {
        self.preferences
            .all()
            .iter()
            .filter(|p| p.user_role == role)
            .collect()
    }

    /// Configurations in the given category
    pub fn configurations_by_category(
        &self,
        category: ConfigCategory,
    ) -> Vec<&SystemConfiguration> {
        self.configurations
            .all()
            .iter()
            .filter(|c| c.category == category)
            .collect()
    }

    /// Integrations currently enabled
    pub fn active_integrations(&self) -> Vec<&IntegrationSetting> {
        self.integrations
            .all()
            .iter()
            .filter(|i| i.is_enabled)
            .collect()
    }

    /// Record the outcome of a sync attempt for one integration.
    ///
    /// Sets the sync status, stamps last_sync and updated_at with today's
    /// date, and on error increments the cumulative error count and replaces
    /// the last error message. Returns false if no integration matches the
    /// id; any status may be written regardless of the current one.
    pub fn update_sync_status(
        &mut self,
        id: &str,
        status: SyncStatus,
        error_message: Option<String>,
    ) -> bool {
        let Some(integration) = self.integrations.get_mut(id) else {
            return false;
        };

        let today = Local::now().date_naive();
        integration.sync_status = status;
        integration.last_sync = Some(today);
        integration.updated_at = Some(today);

        if let Some(message) = error_message {
            integration.error_count += 1;
            integration.last_error = Some(message);
        }

        true
    }

    /// Aggregate metrics over all three collections
    pub fn metrics(&self) -> SettingsMetrics {
        settings_metrics(
            self.preferences.all(),
            self.configurations.all(),
            self.integrations.all(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_data_counts() {
        let manager = SettingsManager::with_sample_data();
        assert_eq!(manager.preferences().len(), 2);
        assert_eq!(manager.configurations().len(), 3);
        assert_eq!(manager.integrations().len(), 3);
    }

    #[test]
    fn test_sample_ids_are_sequential() {
        let manager = SettingsManager::with_sample_data();
        let ids: Vec<u32> = manager
            .integrations()
            .all()
            .iter()
            .map(|i| i.id.unwrap().sequence())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_update_sync_status_success_leaves_error_count() {
        let mut manager = SettingsManager::with_sample_data();
        let id = manager.integrations().all()[0].id.unwrap().to_string();

        assert!(manager.update_sync_status(&id, SyncStatus::Success, None));

        let integration = manager.integrations().get(&id).unwrap();
        assert_eq!(integration.sync_status, SyncStatus::Success);
        assert_eq!(integration.error_count, 0);
        assert_eq!(integration.last_sync, Some(Local::now().date_naive()));
    }

    #[test]
    fn test_update_sync_status_error_increments_count() {
        let mut manager = SettingsManager::with_sample_data();
        let id = manager.integrations().all()[1].id.unwrap().to_string();
        let before = manager.integrations().get(&id).unwrap().error_count;

        assert!(manager.update_sync_status(
            &id,
            SyncStatus::Failed,
            Some("Connection refused".to_string()),
        ));

        let integration = manager.integrations().get(&id).unwrap();
        assert_eq!(integration.sync_status, SyncStatus::Failed);
        assert_eq!(integration.error_count, before + 1);
        assert_eq!(
            integration.last_error.as_deref(),
            Some("Connection refused")
        );
    }

    #[test]
    fn test_update_sync_status_unknown_id() {
        let mut manager = SettingsManager::new();
        assert!(!manager.update_sync_status("INT-2025-099", SyncStatus::Success, None));
    }

    #[test]
    fn test_filters() {
        let manager = SettingsManager::with_sample_data();
        assert_eq!(
            manager.preferences_by_role(UserRole::SafetyManager).len(),
            1
        );
        assert_eq!(
            manager
                .configurations_by_category(ConfigCategory::Security)
                .len(),
            1
        );
        assert_eq!(manager.active_integrations().len(), 3);
    }

    #[test]
    fn test_metrics_over_sample_data() {
        let manager = SettingsManager::with_sample_data();
        let metrics = manager.metrics();
        assert_eq!(metrics.total_users, 2);
        assert_eq!(metrics.total_configurations, 3);
        assert_eq!(metrics.total_integrations, 3);
        assert_eq!(metrics.two_factor_adoption_pct, 100.0);
        assert_eq!(metrics.integration_success_rate_pct, 100.0);
    }
}
