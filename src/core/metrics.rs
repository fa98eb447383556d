//! Aggregate metrics over record collections
//!
//! Pure functions from record slices to display aggregates. No I/O, no side
//! effects; empty input yields zero/default aggregates.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::entities::change_order::ChangeOrderStatus;
use crate::entities::integration::SyncStatus;
use crate::entities::invoice::InvoiceStatus;
use crate::entities::{
    ChangeOrder, Contract, IntegrationSetting, Invoice, Subcontract, SystemConfiguration,
    UserPreference,
};

/// Aggregates over the contract collection
#[derive(Debug, Default, Serialize)]
pub struct ContractMetrics {
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
    pub by_type: BTreeMap<String, usize>,
    pub original_value: f64,
    pub approved_changes: f64,
    pub current_value: f64,
}

pub fn contract_metrics(contracts: &[Contract]) -> ContractMetrics {
    let mut metrics = ContractMetrics {
        total: contracts.len(),
        ..Default::default()
    };

    for contract in contracts {
        *metrics
            .by_status
            .entry(contract.status.to_string())
            .or_insert(0) += 1;
        *metrics
            .by_type
            .entry(contract.contract_type.to_string())
            .or_insert(0) += 1;
        metrics.original_value += contract.original_value;
        metrics.approved_changes += contract.approved_changes;
        metrics.current_value += contract.current_value();
    }

    metrics
}

/// Aggregates over the change order collection
#[derive(Debug, Default, Serialize)]
pub struct ChangeOrderMetrics {
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
    pub pending: usize,
    pub approved_amount: f64,
    pub total_days_added: i64,
}

pub fn change_order_metrics(change_orders: &[ChangeOrder]) -> ChangeOrderMetrics {
    let mut metrics = ChangeOrderMetrics {
        total: change_orders.len(),
        ..Default::default()
    };

    for co in change_orders {
        *metrics.by_status.entry(co.status.to_string()).or_insert(0) += 1;
        match co.status {
            ChangeOrderStatus::Approved => {
                metrics.approved_amount += co.this_change;
                metrics.total_days_added += i64::from(co.days_added);
            }
            ChangeOrderStatus::Submitted | ChangeOrderStatus::PendingApproval => {
                metrics.pending += 1;
            }
            _ => {}
        }
    }

    metrics
}

/// Aggregates over the subcontract collection
#[derive(Debug, Default, Serialize)]
pub struct SubcontractMetrics {
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
    pub by_scope: BTreeMap<String, usize>,
    pub committed_amount: f64,
}

pub fn subcontract_metrics(subcontracts: &[Subcontract]) -> SubcontractMetrics {
    let mut metrics = SubcontractMetrics {
        total: subcontracts.len(),
        ..Default::default()
    };

    for sub in subcontracts {
        *metrics
            .by_status
            .entry(sub.status.to_string())
            .or_insert(0) += 1;
        if !sub.scope.is_empty() {
            *metrics.by_scope.entry(sub.scope.clone()).or_insert(0) += 1;
        }
        metrics.committed_amount += sub.amount;
    }

    metrics
}

/// Aggregates over the invoice collection
#[derive(Debug, Default, Serialize)]
pub struct InvoiceMetrics {
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
    pub paid: usize,
    pub total_billed: f64,
    pub total_retainage: f64,
    pub total_due: f64,
}

pub fn invoice_metrics(invoices: &[Invoice]) -> InvoiceMetrics {
    let mut metrics = InvoiceMetrics {
        total: invoices.len(),
        ..Default::default()
    };

    for inv in invoices {
        *metrics.by_status.entry(inv.status.to_string()).or_insert(0) += 1;
        if inv.status == InvoiceStatus::Paid {
            metrics.paid += 1;
        }
        metrics.total_billed += inv.current_billed;
        metrics.total_retainage += inv.retainage;
        metrics.total_due += inv.amount_due();
    }

    metrics
}

/// Aggregates over the settings collections
#[derive(Debug, Default, Serialize)]
pub struct SettingsMetrics {
    pub total_users: usize,
    pub theme_breakdown: BTreeMap<String, usize>,
    pub role_distribution: BTreeMap<String, usize>,
    pub two_factor_adoption_pct: f64,
    pub total_configurations: usize,
    pub config_categories: BTreeMap<String, usize>,
    pub total_integrations: usize,
    pub active_integrations: usize,
    pub integration_success_rate_pct: f64,
    pub integration_types: BTreeMap<String, usize>,
}

pub fn settings_metrics(
    preferences: &[UserPreference],
    configurations: &[SystemConfiguration],
    integrations: &[IntegrationSetting],
) -> SettingsMetrics {
    let mut metrics = SettingsMetrics {
        total_users: preferences.len(),
        total_configurations: configurations.len(),
        total_integrations: integrations.len(),
        ..Default::default()
    };

    let mut two_factor = 0usize;
    for pref in preferences {
        *metrics
            .theme_breakdown
            .entry(pref.theme.to_string())
            .or_insert(0) += 1;
        *metrics
            .role_distribution
            .entry(pref.user_role.to_string())
            .or_insert(0) += 1;
        if pref.two_factor_enabled {
            two_factor += 1;
        }
    }
    if !preferences.is_empty() {
        metrics.two_factor_adoption_pct =
            round1(two_factor as f64 / preferences.len() as f64 * 100.0);
    }

    for config in configurations {
        *metrics
            .config_categories
            .entry(config.category.to_string())
            .or_insert(0) += 1;
    }

    let mut successful = 0usize;
    for integration in integrations {
        if integration.is_enabled {
            metrics.active_integrations += 1;
        }
        if integration.sync_status == SyncStatus::Success {
            successful += 1;
        }
        *metrics
            .integration_types
            .entry(integration.service_type.to_string())
            .or_insert(0) += 1;
    }
    if !integrations.is_empty() {
        metrics.integration_success_rate_pct =
            round1(successful as f64 / integrations.len() as f64 * 100.0);
    }

    metrics
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::contract::ContractStatus;
    use crate::entities::integration::ServiceType;
    use crate::entities::preference::{Theme, UserRole};

    #[test]
    fn test_empty_input_yields_default_aggregates() {
        let metrics = contract_metrics(&[]);
        assert_eq!(metrics.total, 0);
        assert!(metrics.by_status.is_empty());
        assert_eq!(metrics.current_value, 0.0);

        let settings = settings_metrics(&[], &[], &[]);
        assert_eq!(settings.total_users, 0);
        assert_eq!(settings.two_factor_adoption_pct, 0.0);
        assert_eq!(settings.integration_success_rate_pct, 0.0);
    }

    #[test]
    fn test_contract_value_totals() {
        let mut a = Contract::new("A".into(), "V1".into(), "P".into(), 1_000_000.0);
        a.approved_changes = 50_000.0;
        a.status = ContractStatus::Active;
        let b = Contract::new("B".into(), "V2".into(), "P".into(), 2_000_000.0);

        let metrics = contract_metrics(&[a, b]);
        assert_eq!(metrics.total, 2);
        assert_eq!(metrics.original_value, 3_000_000.0);
        assert_eq!(metrics.approved_changes, 50_000.0);
        assert_eq!(metrics.current_value, 3_050_000.0);
        assert_eq!(metrics.by_status.get("Active"), Some(&1));
        assert_eq!(metrics.by_status.get("Draft"), Some(&1));
    }

    #[test]
    fn test_change_order_approved_amount_excludes_pending() {
        let mut approved = ChangeOrder::new("P".into(), "A".into(), "R".into(), 28_500.0);
        approved.status = ChangeOrderStatus::Approved;
        approved.days_added = 2;
        let mut pending = ChangeOrder::new("P".into(), "B".into(), "R".into(), 36_750.0);
        pending.status = ChangeOrderStatus::PendingApproval;

        let metrics = change_order_metrics(&[approved, pending]);
        assert_eq!(metrics.approved_amount, 28_500.0);
        assert_eq!(metrics.total_days_added, 2);
        assert_eq!(metrics.pending, 1);
    }

    #[test]
    fn test_settings_breakdowns() {
        let mut pref_a = UserPreference::new("u1".into(), "John".into(), UserRole::ProjectManager);
        pref_a.theme = Theme::Dark;
        pref_a.two_factor_enabled = true;
        let mut pref_b = UserPreference::new("u2".into(), "Sarah".into(), UserRole::SafetyManager);
        pref_b.theme = Theme::Light;
        pref_b.two_factor_enabled = true;

        let mut int_ok =
            IntegrationSetting::new("Weather API".into(), ServiceType::Api, String::new());
        int_ok.sync_status = SyncStatus::Success;
        let mut int_bad =
            IntegrationSetting::new("Email".into(), ServiceType::Api, String::new());
        int_bad.sync_status = SyncStatus::Failed;
        int_bad.is_enabled = false;

        let metrics = settings_metrics(&[pref_a, pref_b], &[], &[int_ok, int_bad]);
        assert_eq!(metrics.theme_breakdown.get("Dark"), Some(&1));
        assert_eq!(metrics.role_distribution.get("Safety Manager"), Some(&1));
        assert_eq!(metrics.two_factor_adoption_pct, 100.0);
        assert_eq!(metrics.active_integrations, 1);
        assert_eq!(metrics.integration_success_rate_pct, 50.0);
    }
}
