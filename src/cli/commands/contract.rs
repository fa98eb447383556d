//! `gcpanel contract` command - Contract management

use chrono::NaiveDate;
use clap::{Subcommand, ValueEnum};
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{escape_csv, format_money, resolve_project, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::entities::contract::{Contract, ContractStatus, ContractType};
use crate::store::FileStore;

#[derive(Subcommand, Debug)]
pub enum ContractCommands {
    /// List contracts with filtering
    List(ListArgs),

    /// Create a new contract
    New(NewArgs),

    /// Show a contract's details
    Show(ShowArgs),

    /// Update fields on a contract
    Update(UpdateArgs),

    /// Delete a contract
    Delete(DeleteArgs),
}

/// Contract status filter
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusFilter {
    Draft,
    Pending,
    Executed,
    Active,
    Complete,
    Terminated,
    All,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortField {
    Name,
    Vendor,
    Value,
    Status,
    Created,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by contract status
    #[arg(long, short = 's', default_value = "all")]
    pub status: StatusFilter,

    /// Search in name, vendor, and scope
    #[arg(long)]
    pub search: Option<String>,

    /// Sort by field
    #[arg(long, default_value = "created")]
    pub sort: SortField,

    /// Reverse sort order
    #[arg(long, short = 'r')]
    pub reverse: bool,

    /// Limit number of results
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Show only count
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Contract name (required unless interactive)
    #[arg(long, short = 'N')]
    pub name: Option<String>,

    /// Counterparty / vendor name
    #[arg(long, default_value = "")]
    pub vendor: String,

    /// Original contract value
    #[arg(long, default_value_t = 0.0)]
    pub value: f64,

    /// Contract type (lump-sum, unit-price, cost-plus, time-and-materials, gmp)
    #[arg(long, short = 't', default_value = "lump-sum")]
    pub r#type: String,

    /// Scope of work
    #[arg(long)]
    pub scope: Option<String>,

    /// Interactive mode (prompt for fields)
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Contract ID (CON-YYYY-NNN)
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// Contract ID (CON-YYYY-NNN)
    pub id: String,

    /// New contract name
    #[arg(long)]
    pub name: Option<String>,

    /// New vendor name
    #[arg(long)]
    pub vendor: Option<String>,

    /// New original value
    #[arg(long)]
    pub value: Option<f64>,

    /// New approved-changes total
    #[arg(long)]
    pub approved_changes: Option<f64>,

    /// New status (any status may be set; no transition rules apply)
    #[arg(long, short = 's')]
    pub status: Option<String>,

    /// New start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,

    /// New end date (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<String>,

    /// New scope of work
    #[arg(long)]
    pub scope: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Contract ID (CON-YYYY-NNN)
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Run a contract subcommand
pub fn run(cmd: ContractCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ContractCommands::List(args) => run_list(args, global),
        ContractCommands::New(args) => run_new(args, global),
        ContractCommands::Show(args) => run_show(args, global),
        ContractCommands::Update(args) => run_update(args, global),
        ContractCommands::Delete(args) => run_delete(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let project = resolve_project(global)?;
    let store: FileStore<Contract> = FileStore::for_project(&project);

    let mut contracts: Vec<Contract> = store
        .load()
        .into_iter()
        .filter(|c| match args.status {
            StatusFilter::Draft => c.status == ContractStatus::Draft,
            StatusFilter::Pending => c.status == ContractStatus::PendingSignature,
            StatusFilter::Executed => c.status == ContractStatus::Executed,
            StatusFilter::Active => c.status == ContractStatus::Active,
            StatusFilter::Complete => c.status == ContractStatus::Complete,
            StatusFilter::Terminated => c.status == ContractStatus::Terminated,
            StatusFilter::All => true,
        })
        .filter(|c| {
            if let Some(ref search) = args.search {
                let needle = search.to_lowercase();
                c.name.to_lowercase().contains(&needle)
                    || c.vendor.to_lowercase().contains(&needle)
                    || c.scope
                        .as_ref()
                        .map_or(false, |s| s.to_lowercase().contains(&needle))
            } else {
                true
            }
        })
        .collect();

    match args.sort {
        SortField::Name => contracts.sort_by(|a, b| a.name.cmp(&b.name)),
        SortField::Vendor => contracts.sort_by(|a, b| a.vendor.cmp(&b.vendor)),
        SortField::Value => contracts.sort_by(|a, b| {
            a.current_value()
                .partial_cmp(&b.current_value())
                .unwrap_or(std::cmp::Ordering::Equal)
        }),
        SortField::Status => {
            contracts.sort_by(|a, b| a.status.to_string().cmp(&b.status.to_string()))
        }
        SortField::Created => contracts.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
    }

    if args.reverse {
        contracts.reverse();
    }

    if let Some(limit) = args.limit {
        contracts.truncate(limit);
    }

    if args.count {
        println!("{}", contracts.len());
        return Ok(());
    }

    if contracts.is_empty() {
        println!("No contracts found.");
        return Ok(());
    }

    let format = if global.format == OutputFormat::Auto {
        OutputFormat::Tsv
    } else {
        global.format
    };

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&contracts).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Csv => {
            println!("id,name,type,vendor,status,original_value,approved_changes,current_value");
            for c in &contracts {
                println!(
                    "{},{},{},{},{},{:.2},{:.2},{:.2}",
                    display_id(c),
                    escape_csv(&c.name),
                    c.contract_type,
                    escape_csv(&c.vendor),
                    c.status,
                    c.original_value,
                    c.approved_changes,
                    c.current_value()
                );
            }
        }
        OutputFormat::Tsv => {
            println!(
                "{:<14} {:<28} {:<20} {:<18} {:<18} {:>16}",
                style("ID").bold(),
                style("NAME").bold(),
                style("TYPE").bold(),
                style("VENDOR").bold(),
                style("STATUS").bold(),
                style("VALUE").bold()
            );
            println!("{}", "-".repeat(118));

            for c in &contracts {
                let status_styled = match c.status {
                    ContractStatus::Active | ContractStatus::Executed => {
                        style(c.status.to_string()).green()
                    }
                    ContractStatus::Terminated => style(c.status.to_string()).red(),
                    ContractStatus::PendingSignature => style(c.status.to_string()).yellow(),
                    _ => style(c.status.to_string()).white(),
                };

                println!(
                    "{:<14} {:<28} {:<20} {:<18} {:<18} {:>16}",
                    style(display_id(c)).cyan(),
                    truncate_str(&c.name, 26),
                    c.contract_type,
                    truncate_str(&c.vendor, 16),
                    status_styled,
                    format_money(c.current_value())
                );
            }

            println!();
            println!("{} contract(s) found.", style(contracts.len()).cyan());
        }
        OutputFormat::Id => {
            for c in &contracts {
                println!("{}", display_id(c));
            }
        }
        OutputFormat::Md => {
            println!("| ID | Name | Type | Vendor | Status | Value |");
            println!("|---|---|---|---|---|---|");
            for c in &contracts {
                println!(
                    "| {} | {} | {} | {} | {} | {} |",
                    display_id(c),
                    c.name,
                    c.contract_type,
                    c.vendor,
                    c.status,
                    format_money(c.current_value())
                );
            }
        }
        OutputFormat::Auto => unreachable!(),
    }

    Ok(())
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let project = resolve_project(global)?;
    let config = crate::core::Config::load();
    let store: FileStore<Contract> = FileStore::for_project(&project);

    let name: String;
    let vendor: String;
    let value: f64;
    let contract_type: ContractType;

    if args.interactive || args.name.is_none() {
        use dialoguer::{Input, Select};

        name = Input::new()
            .with_prompt("Contract name")
            .interact_text()
            .into_diagnostic()?;

        vendor = Input::new()
            .with_prompt("Vendor")
            .allow_empty(true)
            .interact_text()
            .into_diagnostic()?;

        let value_str: String = Input::new()
            .with_prompt("Original value")
            .default("0".to_string())
            .interact_text()
            .into_diagnostic()?;
        value = value_str
            .parse::<f64>()
            .map_err(|_| miette::miette!("Invalid amount: {}", value_str))?;

        let type_options = [
            "Lump Sum",
            "Unit Price",
            "Cost Plus",
            "Time and Materials",
            "GMP",
        ];
        let type_idx = Select::new()
            .with_prompt("Contract type")
            .items(&type_options)
            .default(0)
            .interact()
            .into_diagnostic()?;
        contract_type = type_options[type_idx]
            .parse()
            .map_err(|e| miette::miette!("{}", e))?;
    } else {
        name = args
            .name
            .ok_or_else(|| miette::miette!("Name is required (use --name or -N)"))?;
        vendor = args.vendor;
        value = args.value;
        contract_type = args
            .r#type
            .parse()
            .map_err(|e| miette::miette!("{}", e))?;
    }

    let mut contract = Contract::new(name, vendor, config.project_name(), value);
    contract.contract_type = contract_type;
    contract.scope = args.scope;

    let created = store.create(contract);
    let id = display_id(&created);

    println!(
        "{} Created contract {}",
        style("✓").green(),
        style(&id).cyan()
    );
    println!(
        "   {} | {} | {}",
        style(&created.name).white(),
        style(created.contract_type.to_string()).yellow(),
        style(format_money(created.current_value())).white()
    );
    println!("   {}", style(store.path().display()).dim());

    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let project = resolve_project(global)?;
    let store: FileStore<Contract> = FileStore::for_project(&project);

    let contract = store
        .get(&args.id)
        .ok_or_else(|| miette::miette!("No contract found matching '{}'", args.id))?;

    match global.format {
        OutputFormat::Json | OutputFormat::Auto => {
            let json = serde_json::to_string_pretty(&contract).into_diagnostic()?;
            println!("{}", json);
        }
        _ => {
            println!("{}  {}", style(display_id(&contract)).cyan(), contract.name);
            println!("Type:             {}", contract.contract_type);
            println!("Vendor:           {}", contract.vendor);
            println!("Status:           {}", contract.status);
            println!(
                "Original value:   {}",
                format_money(contract.original_value)
            );
            println!(
                "Approved changes: {}",
                format_money(contract.approved_changes)
            );
            println!(
                "Current value:    {}",
                format_money(contract.current_value())
            );
            if let Some(ref scope) = contract.scope {
                println!("Scope:            {}", scope);
            }
        }
    }

    Ok(())
}

fn run_update(args: UpdateArgs, global: &GlobalOpts) -> Result<()> {
    let project = resolve_project(global)?;
    let store: FileStore<Contract> = FileStore::for_project(&project);

    let mut contract = store
        .get(&args.id)
        .ok_or_else(|| miette::miette!("No contract found matching '{}'", args.id))?;

    if let Some(name) = args.name {
        contract.name = name;
    }
    if let Some(vendor) = args.vendor {
        contract.vendor = vendor;
    }
    if let Some(value) = args.value {
        contract.original_value = value;
    }
    if let Some(approved) = args.approved_changes {
        contract.approved_changes = approved;
    }
    if let Some(status) = args.status {
        contract.status = status.parse().map_err(|e| miette::miette!("{}", e))?;
    }
    if let Some(start) = args.start {
        contract.start_date = Some(parse_date(&start)?);
    }
    if let Some(end) = args.end {
        contract.end_date = Some(parse_date(&end)?);
    }
    if let Some(scope) = args.scope {
        contract.scope = Some(scope);
    }

    let updated = store
        .update(&args.id, contract)
        .ok_or_else(|| miette::miette!("No contract found matching '{}'", args.id))?;

    println!(
        "{} Updated contract {}",
        style("✓").green(),
        style(display_id(&updated)).cyan()
    );
    println!(
        "   {} | {} | {}",
        style(&updated.name).white(),
        style(updated.status.to_string()).yellow(),
        style(format_money(updated.current_value())).white()
    );

    Ok(())
}

fn run_delete(args: DeleteArgs, global: &GlobalOpts) -> Result<()> {
    let project = resolve_project(global)?;
    let store: FileStore<Contract> = FileStore::for_project(&project);

    if !args.yes {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!("Delete contract {}?", args.id))
            .default(false)
            .interact()
            .into_diagnostic()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    if store.delete(&args.id) {
        println!(
            "{} Deleted contract {}",
            style("✓").green(),
            style(&args.id).cyan()
        );
    } else {
        println!(
            "{} No contract found matching '{}'",
            style("!").yellow(),
            args.id
        );
    }

    Ok(())
}

fn display_id(contract: &Contract) -> String {
    contract
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| miette::miette!("Invalid date '{}', expected YYYY-MM-DD", s))
}
