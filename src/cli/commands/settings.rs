//! `gcpanel settings` command - Application settings
//!
//! Settings records are session-scoped: every invocation starts from the
//! seeded sample collections, mirroring the dashboard's in-memory settings
//! manager. Nothing here is persisted between runs.

use clap::{Subcommand, ValueEnum};
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{escape_csv, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::SettingsManager;
use crate::entities::configuration::ConfigCategory;
use crate::entities::integration::SyncStatus;
use crate::entities::preference::UserRole;

#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// List user preference records
    Prefs(PrefsArgs),

    /// List system configuration settings
    Config(ConfigArgs),

    /// List integration settings
    Integrations(IntegrationsArgs),

    /// Record the outcome of an integration sync attempt
    Sync(SyncArgs),

    /// Show settings and configuration metrics
    Metrics,
}

/// User role filter
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RoleFilter {
    Administrator,
    ProjectManager,
    ConstructionManager,
    SafetyManager,
    CostManager,
    FieldSupervisor,
    QualityInspector,
    Viewer,
    All,
}

#[derive(clap::Args, Debug)]
pub struct PrefsArgs {
    /// Filter by user role
    #[arg(long, default_value = "all")]
    pub role: RoleFilter,
}

#[derive(clap::Args, Debug)]
pub struct ConfigArgs {
    /// Filter by category (security, integration, performance, backup, other)
    #[arg(long, short = 'c')]
    pub category: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct IntegrationsArgs {
    /// Show only enabled integrations
    #[arg(long)]
    pub active: bool,
}

#[derive(clap::Args, Debug)]
pub struct SyncArgs {
    /// Integration ID (INT-YYYY-NNN)
    pub id: String,

    /// Sync outcome (configured, success, failed, in-progress, disabled)
    pub status: String,

    /// Error message; increments the integration's error count
    #[arg(long)]
    pub error: Option<String>,
}

/// Run a settings subcommand
pub fn run(cmd: SettingsCommands, global: &GlobalOpts) -> Result<()> {
    let mut manager = SettingsManager::with_sample_data();

    match cmd {
        SettingsCommands::Prefs(args) => run_prefs(args, &manager, global),
        SettingsCommands::Config(args) => run_config(args, &manager, global),
        SettingsCommands::Integrations(args) => run_integrations(args, &manager, global),
        SettingsCommands::Sync(args) => run_sync(args, &mut manager, global),
        SettingsCommands::Metrics => run_metrics(&manager, global),
    }
}

fn run_prefs(args: PrefsArgs, manager: &SettingsManager, global: &GlobalOpts) -> Result<()> {
    let role = match args.role {
        RoleFilter::Administrator => Some(UserRole::Administrator),
        RoleFilter::ProjectManager => Some(UserRole::ProjectManager),
        RoleFilter::ConstructionManager => Some(UserRole::ConstructionManager),
        RoleFilter::SafetyManager => Some(UserRole::SafetyManager),
        RoleFilter::CostManager => Some(UserRole::CostManager),
        RoleFilter::FieldSupervisor => Some(UserRole::FieldSupervisor),
        RoleFilter::QualityInspector => Some(UserRole::QualityInspector),
        RoleFilter::Viewer => Some(UserRole::Viewer),
        RoleFilter::All => None,
    };

    let prefs: Vec<_> = manager
        .preferences()
        .all()
        .iter()
        .filter(|p| role.map_or(true, |r| p.user_role == r))
        .collect();

    if prefs.is_empty() {
        println!("No user preferences found.");
        return Ok(());
    }

    match global.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&prefs).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Csv => {
            println!("id,user_name,role,theme,two_factor,session_timeout_minutes");
            for p in &prefs {
                println!(
                    "{},{},{},{},{},{}",
                    p.id.map(|id| id.to_string()).unwrap_or_default(),
                    escape_csv(&p.user_name),
                    p.user_role,
                    p.theme,
                    p.two_factor_enabled,
                    p.session_timeout_minutes
                );
            }
        }
        OutputFormat::Id => {
            for p in &prefs {
                if let Some(id) = p.id {
                    println!("{}", id);
                }
            }
        }
        _ => {
            println!(
                "{:<14} {:<20} {:<22} {:<8} {:<6}",
                style("ID").bold(),
                style("USER").bold(),
                style("ROLE").bold(),
                style("THEME").bold(),
                style("2FA").bold()
            );
            println!("{}", "-".repeat(74));
            for p in &prefs {
                println!(
                    "{:<14} {:<20} {:<22} {:<8} {:<6}",
                    style(p.id.map(|id| id.to_string()).unwrap_or_default()).cyan(),
                    truncate_str(&p.user_name, 18),
                    p.user_role,
                    p.theme,
                    if p.two_factor_enabled { "yes" } else { "no" }
                );
            }
        }
    }

    Ok(())
}

fn run_config(args: ConfigArgs, manager: &SettingsManager, global: &GlobalOpts) -> Result<()> {
    let category = match args.category {
        Some(ref s) => Some(
            s.parse::<ConfigCategory>()
                .map_err(|e| miette::miette!("{}", e))?,
        ),
        None => None,
    };

    let configs: Vec<_> = manager
        .configurations()
        .all()
        .iter()
        .filter(|c| category.map_or(true, |cat| c.category == cat))
        .collect();

    if configs.is_empty() {
        println!("No configuration settings found.");
        return Ok(());
    }

    match global.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&configs).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Csv => {
            println!("id,category,name,setting_key,setting_value,requires_admin");
            for c in &configs {
                println!(
                    "{},{},{},{},{},{}",
                    c.id.map(|id| id.to_string()).unwrap_or_default(),
                    c.category,
                    escape_csv(&c.name),
                    c.setting_key,
                    escape_csv(&c.setting_value),
                    c.requires_admin
                );
            }
        }
        OutputFormat::Id => {
            for c in &configs {
                if let Some(id) = c.id {
                    println!("{}", id);
                }
            }
        }
        _ => {
            println!(
                "{:<14} {:<13} {:<28} {:<38} {:<10}",
                style("ID").bold(),
                style("CATEGORY").bold(),
                style("NAME").bold(),
                style("KEY").bold(),
                style("VALUE").bold()
            );
            println!("{}", "-".repeat(106));
            for c in &configs {
                println!(
                    "{:<14} {:<13} {:<28} {:<38} {:<10}",
                    style(c.id.map(|id| id.to_string()).unwrap_or_default()).cyan(),
                    c.category,
                    truncate_str(&c.name, 26),
                    truncate_str(&c.setting_key, 36),
                    c.setting_value
                );
            }
        }
    }

    Ok(())
}

fn run_integrations(
    args: IntegrationsArgs,
    manager: &SettingsManager,
    global: &GlobalOpts,
) -> Result<()> {
    let integrations: Vec<_> = manager
        .integrations()
        .all()
        .iter()
        .filter(|i| !args.active || i.is_enabled)
        .collect();

    if integrations.is_empty() {
        println!("No integrations found.");
        return Ok(());
    }

    match global.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&integrations).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Csv => {
            println!("id,service_name,service_type,sync_status,error_count,success_rate");
            for i in &integrations {
                println!(
                    "{},{},{},{},{},{:.1}",
                    i.id.map(|id| id.to_string()).unwrap_or_default(),
                    escape_csv(&i.service_name),
                    i.service_type,
                    i.sync_status,
                    i.error_count,
                    i.success_rate
                );
            }
        }
        OutputFormat::Id => {
            for i in &integrations {
                if let Some(id) = i.id {
                    println!("{}", id);
                }
            }
        }
        _ => {
            println!(
                "{:<14} {:<22} {:<15} {:<13} {:>7} {:>9}",
                style("ID").bold(),
                style("SERVICE").bold(),
                style("TYPE").bold(),
                style("STATUS").bold(),
                style("ERRORS").bold(),
                style("SUCCESS").bold()
            );
            println!("{}", "-".repeat(86));
            for i in &integrations {
                let status_styled = match i.sync_status {
                    SyncStatus::Success => style(i.sync_status.to_string()).green(),
                    SyncStatus::Failed => style(i.sync_status.to_string()).red(),
                    SyncStatus::InProgress => style(i.sync_status.to_string()).yellow(),
                    _ => style(i.sync_status.to_string()).white(),
                };
                println!(
                    "{:<14} {:<22} {:<15} {:<13} {:>7} {:>8}%",
                    style(i.id.map(|id| id.to_string()).unwrap_or_default()).cyan(),
                    truncate_str(&i.service_name, 20),
                    i.service_type.to_string(),
                    status_styled,
                    i.error_count,
                    i.success_rate
                );
            }
        }
    }

    Ok(())
}

fn run_sync(args: SyncArgs, manager: &mut SettingsManager, _global: &GlobalOpts) -> Result<()> {
    let status: SyncStatus = args
        .status
        .parse()
        .map_err(|e| miette::miette!("{}", e))?;

    let had_error = args.error.is_some();
    if !manager.update_sync_status(&args.id, status, args.error) {
        return Err(miette::miette!(
            "No integration found matching '{}'",
            args.id
        ));
    }

    let integration = manager
        .integrations()
        .get(&args.id)
        .ok_or_else(|| miette::miette!("No integration found matching '{}'", args.id))?;

    println!(
        "{} Recorded {} sync for {}",
        style("✓").green(),
        style(status.to_string()).yellow(),
        style(&integration.service_name).cyan()
    );
    if had_error {
        println!(
            "   error count now {} | last error: {}",
            style(integration.error_count).red(),
            integration.last_error.as_deref().unwrap_or("-")
        );
    }
    println!(
        "   {} settings are session-scoped; this change is not persisted",
        style("note:").dim()
    );

    Ok(())
}

fn run_metrics(manager: &SettingsManager, global: &GlobalOpts) -> Result<()> {
    let metrics = manager.metrics();

    match global.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&metrics).into_diagnostic()?;
            println!("{}", json);
        }
        _ => {
            println!("{}", style("Settings Metrics").bold().underlined());
            println!();
            println!("Users:              {}", metrics.total_users);
            for (theme, count) in &metrics.theme_breakdown {
                println!("  {:<17} {}", format!("{} theme:", theme), count);
            }
            println!(
                "2FA adoption:       {:.1}%",
                metrics.two_factor_adoption_pct
            );
            println!();
            println!("Configurations:     {}", metrics.total_configurations);
            for (category, count) in &metrics.config_categories {
                println!("  {:<17} {}", format!("{}:", category), count);
            }
            println!();
            println!("Integrations:       {}", metrics.total_integrations);
            println!("  Active:           {}", metrics.active_integrations);
            println!(
                "  Sync success:     {:.1}%",
                metrics.integration_success_rate_pct
            );
        }
    }

    Ok(())
}
