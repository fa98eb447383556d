//! `gcpanel init` command - Initialize a new gcPanel project

use chrono::NaiveDate;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::Path;

use crate::core::identity::{RecordId, RecordKind};
use crate::core::project::{Project, ProjectError};
use crate::entities::change_order::ChangeOrderStatus;
use crate::entities::invoice::InvoiceStatus;
use crate::entities::subcontract::SubcontractStatus;
use crate::entities::{ChangeOrder, Invoice, Subcontract};
use crate::store::FileStore;

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    #[arg(default_value = ".")]
    pub path: std::path::PathBuf,

    /// Force initialization even if .gcpanel/ already exists
    #[arg(long)]
    pub force: bool,

    /// Seed the data files with Highland Tower sample records
    #[arg(long)]
    pub sample: bool,
}

pub fn run(args: InitArgs) -> Result<()> {
    let path = if args.path.as_os_str() == "." {
        std::env::current_dir().into_diagnostic()?
    } else {
        args.path.clone()
    };

    if !path.exists() {
        std::fs::create_dir_all(&path).into_diagnostic()?;
        println!(
            "{} Created directory {}",
            style("✓").green(),
            style(path.display()).cyan()
        );
    }

    let project = if args.force {
        Project::init_force(&path)
    } else {
        Project::init(&path)
    };

    match project {
        Ok(project) => {
            println!(
                "{} Initialized gcPanel project at {}",
                style("✓").green(),
                style(project.root().display()).cyan()
            );

            if args.sample {
                seed_sample_data(&project);
                println!(
                    "{} Seeded Highland Tower sample records",
                    style("✓").green()
                );
            }

            println!();
            println!("Created project structure:");
            print_structure(project.root());
            println!();
            println!("Next steps:");
            println!(
                "  {} Create your first contract",
                style("gcpanel contract new").yellow()
            );
            println!(
                "  {} List all change orders",
                style("gcpanel co list").yellow()
            );
            println!(
                "  {} Show the project dashboard",
                style("gcpanel status").yellow()
            );
            Ok(())
        }
        Err(ProjectError::AlreadyExists(path)) => {
            println!(
                "{} gcPanel project already exists at {}",
                style("!").yellow(),
                style(path.display()).cyan()
            );
            println!();
            println!(
                "Use {} to reinitialize",
                style("gcpanel init --force").yellow()
            );
            Ok(())
        }
        Err(e) => Err(miette::miette!("{}", e)),
    }
}

/// Write the Highland Tower Development sample records.
///
/// Each file is only written if it does not already exist, so re-running
/// init --sample never clobbers real data.
fn seed_sample_data(project: &Project) {
    let co_store: FileStore<ChangeOrder> = FileStore::for_project(project);
    if !co_store.path().exists() {
        co_store.save(&sample_change_orders());
    }

    let sub_store: FileStore<Subcontract> = FileStore::for_project(project);
    if !sub_store.path().exists() {
        sub_store.save(&sample_subcontracts());
    }

    let inv_store: FileStore<Invoice> = FileStore::for_project(project);
    if !inv_store.path().exists() {
        inv_store.save(&sample_invoices());
    }
}

fn sample_change_orders() -> Vec<ChangeOrder> {
    let mut drains = ChangeOrder::new(
        "Highland Tower Development".to_string(),
        "Added Roof Drains".to_string(),
        "Owner Request".to_string(),
        28_500.0,
    );
    drains.id = Some(RecordId::from_parts(RecordKind::ChangeOrder, 2025, 1));
    drains.date = NaiveDate::from_ymd_opt(2025, 2, 10);
    drains.status = ChangeOrderStatus::Approved;
    drains.original_amount = 45_500_000.0;
    drains.days_added = 2;
    drains.signatures = vec![
        "Contractor: John Doe".to_string(),
        "Owner: Jane Smith".to_string(),
    ];
    drains.created_at = NaiveDate::from_ymd_opt(2025, 2, 10);
    drains.updated_at = NaiveDate::from_ymd_opt(2025, 2, 15);

    let mut security = ChangeOrder::new(
        "Highland Tower Development".to_string(),
        "Added Security Equipment".to_string(),
        "Owner Request".to_string(),
        36_750.0,
    );
    security.id = Some(RecordId::from_parts(RecordKind::ChangeOrder, 2025, 42));
    security.date = NaiveDate::from_ymd_opt(2025, 5, 10);
    security.status = ChangeOrderStatus::PendingApproval;
    security.original_amount = 45_500_000.0;
    security.previous_changes = 124_500.0;
    security.days_added = 3;
    security.signatures = vec!["Contractor: John Doe".to_string()];
    security.created_at = NaiveDate::from_ymd_opt(2025, 5, 10);
    security.updated_at = NaiveDate::from_ymd_opt(2025, 5, 10);

    vec![drains, security]
}

fn sample_subcontracts() -> Vec<Subcontract> {
    let mut excavation = Subcontract::new(
        "Highland Tower Development".to_string(),
        "Deep Excavation Inc.".to_string(),
        "Excavation".to_string(),
        1_250_000.0,
    );
    excavation.id = Some(RecordId::from_parts(RecordKind::Subcontract, 2025, 1));
    excavation.date = NaiveDate::from_ymd_opt(2025, 1, 15);
    excavation.status = SubcontractStatus::Executed;
    excavation.contact = "Mike Johnson".to_string();
    excavation.email = "mike@deepexcavation.com".to_string();
    excavation.start_date = NaiveDate::from_ymd_opt(2025, 2, 1);
    excavation.completion_date = NaiveDate::from_ymd_opt(2025, 4, 15);
    excavation.signatures = vec![
        "Subcontractor: Mike Johnson".to_string(),
        "General Contractor: John Doe".to_string(),
    ];
    excavation.created_at = NaiveDate::from_ymd_opt(2025, 1, 10);
    excavation.updated_at = NaiveDate::from_ymd_opt(2025, 1, 15);

    let mut concrete = Subcontract::new(
        "Highland Tower Development".to_string(),
        "Superior Concrete Solutions".to_string(),
        "Concrete".to_string(),
        3_750_000.0,
    );
    concrete.id = Some(RecordId::from_parts(RecordKind::Subcontract, 2025, 38));
    concrete.date = NaiveDate::from_ymd_opt(2025, 3, 22);
    concrete.status = SubcontractStatus::Executed;
    concrete.contact = "Sarah Williams".to_string();
    concrete.email = "sarah@superiorconcrete.com".to_string();
    concrete.start_date = NaiveDate::from_ymd_opt(2025, 4, 1);
    concrete.completion_date = NaiveDate::from_ymd_opt(2025, 8, 15);
    concrete.signatures = vec![
        "Subcontractor: Sarah Williams".to_string(),
        "General Contractor: John Doe".to_string(),
    ];
    concrete.created_at = NaiveDate::from_ymd_opt(2025, 3, 15);
    concrete.updated_at = NaiveDate::from_ymd_opt(2025, 3, 22);

    vec![excavation, concrete]
}

fn sample_invoices() -> Vec<Invoice> {
    let mut march = Invoice::new(
        "Highland Tower Development".to_string(),
        "Superior Concrete Solutions".to_string(),
        "March Progress".to_string(),
        450_000.0,
    );
    march.id = Some(RecordId::from_parts(RecordKind::Invoice, 2025, 87));
    march.date = NaiveDate::from_ymd_opt(2025, 4, 15);
    march.status = InvoiceStatus::Paid;
    march.contract_amount = 3_750_000.0;
    march.retainage = 45_000.0;
    march.signatures = vec![
        "Contractor: Sarah Williams".to_string(),
        "Owner/CM: Jane Smith".to_string(),
    ];
    march.created_at = NaiveDate::from_ymd_opt(2025, 4, 15);
    march.updated_at = NaiveDate::from_ymd_opt(2025, 4, 22);

    vec![march]
}

fn print_structure(root: &Path) {
    let dirs = [
        ".gcpanel/",
        ".gcpanel/config.yaml",
        "data/contracts/",
        "data/settings/",
    ];

    for dir in dirs {
        let full_path = root.join(dir);
        if full_path.exists() {
            println!("  {}", style(dir).dim());
        }
    }
}
