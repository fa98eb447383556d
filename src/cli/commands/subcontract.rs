//! `gcpanel sub` command - Subcontract management

use clap::{Subcommand, ValueEnum};
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::contract::parse_date;
use crate::cli::helpers::{escape_csv, format_money, resolve_project, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::entities::subcontract::{Subcontract, SubcontractStatus};
use crate::store::FileStore;

#[derive(Subcommand, Debug)]
pub enum SubCommands {
    /// List subcontracts with filtering
    List(ListArgs),

    /// Create a new subcontract
    New(NewArgs),

    /// Show a subcontract's details
    Show(ShowArgs),

    /// Update fields on a subcontract
    Update(UpdateArgs),

    /// Delete a subcontract
    Delete(DeleteArgs),
}

/// Subcontract status filter
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusFilter {
    Draft,
    Pending,
    Executed,
    Complete,
    Terminated,
    All,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortField {
    Company,
    Scope,
    Amount,
    Status,
    Created,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by subcontract status
    #[arg(long, short = 's', default_value = "all")]
    pub status: StatusFilter,

    /// Filter by trade scope, e.g. "Concrete"
    #[arg(long)]
    pub scope: Option<String>,

    /// Search in company, contact, and scope
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
    /// Subcontractor company name (required unless interactive)
    #[arg(long, short = 'c')]
    pub company: Option<String>,

    /// Trade scope, e.g. "Excavation"
    #[arg(long, default_value = "")]
    pub scope: String,

    /// Subcontract amount
    #[arg(long, default_value_t = 0.0)]
    pub amount: f64,

    /// Primary contact name
    #[arg(long)]
    pub contact: Option<String>,

    /// Contact email
    #[arg(long)]
    pub email: Option<String>,

    /// Interactive mode (prompt for fields)
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Subcontract ID (SC-YYYY-NNN)
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// Subcontract ID (SC-YYYY-NNN)
    pub id: String,

    /// New company name
    #[arg(long)]
    pub company: Option<String>,

    /// New trade scope
    #[arg(long)]
    pub scope: Option<String>,

    /// New amount
    #[arg(long)]
    pub amount: Option<f64>,

    /// New contact name
    #[arg(long)]
    pub contact: Option<String>,

    /// New contact email
    #[arg(long)]
    pub email: Option<String>,

    /// New status (any status may be set; no transition rules apply)
    #[arg(long, short = 's')]
    pub status: Option<String>,

    /// New scheduled start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,

    /// New scheduled completion date (YYYY-MM-DD)
    #[arg(long)]
    pub completion: Option<String>,

    /// Append a signature
    #[arg(long)]
    pub sign: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Subcontract ID (SC-YYYY-NNN)
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Run a subcontract subcommand
pub fn run(cmd: SubCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        SubCommands::List(args) => run_list(args, global),
        SubCommands::New(args) => run_new(args, global),
        SubCommands::Show(args) => run_show(args, global),
        SubCommands::Update(args) => run_update(args, global),
        SubCommands::Delete(args) => run_delete(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let project = resolve_project(global)?;
    let store: FileStore<Subcontract> = FileStore::for_project(&project);

    let mut subcontracts: Vec<Subcontract> = store
        .load()
        .into_iter()
        .filter(|sc| match args.status {
            StatusFilter::Draft => sc.status == SubcontractStatus::Draft,
            StatusFilter::Pending => sc.status == SubcontractStatus::PendingSignature,
            StatusFilter::Executed => sc.status == SubcontractStatus::Executed,
            StatusFilter::Complete => sc.status == SubcontractStatus::Complete,
            StatusFilter::Terminated => sc.status == SubcontractStatus::Terminated,
            StatusFilter::All => true,
        })
        .filter(|sc| {
            args.scope
                .as_ref()
                .map_or(true, |scope| sc.scope.eq_ignore_ascii_case(scope))
        })
        .filter(|sc| {
            if let Some(ref search) = args.search {
                let needle = search.to_lowercase();
                sc.company.to_lowercase().contains(&needle)
                    || sc.contact.to_lowercase().contains(&needle)
                    || sc.scope.to_lowercase().contains(&needle)
            } else {
                true
            }
        })
        .collect();

    match args.sort {
        SortField::Company => subcontracts.sort_by(|a, b| a.company.cmp(&b.company)),
        SortField::Scope => subcontracts.sort_by(|a, b| a.scope.cmp(&b.scope)),
        SortField::Amount => subcontracts.sort_by(|a, b| {
            a.amount
                .partial_cmp(&b.amount)
                .unwrap_or(std::cmp::Ordering::Equal)
        }),
        SortField::Status => {
            subcontracts.sort_by(|a, b| a.status.to_string().cmp(&b.status.to_string()))
        }
        SortField::Created => subcontracts.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
    }

    if args.reverse {
        subcontracts.reverse();
    }

    if let Some(limit) = args.limit {
        subcontracts.truncate(limit);
    }

    if args.count {
        println!("{}", subcontracts.len());
        return Ok(());
    }

    if subcontracts.is_empty() {
        println!("No subcontracts found.");
        return Ok(());
    }

    let format = if global.format == OutputFormat::Auto {
        OutputFormat::Tsv
    } else {
        global.format
    };

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&subcontracts).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Csv => {
            println!("id,company,scope,contact,status,amount");
            for sc in &subcontracts {
                println!(
                    "{},{},{},{},{},{:.2}",
                    display_id(sc),
                    escape_csv(&sc.company),
                    escape_csv(&sc.scope),
                    escape_csv(&sc.contact),
                    sc.status,
                    sc.amount
                );
            }
        }
        OutputFormat::Tsv => {
            println!(
                "{:<13} {:<28} {:<16} {:<18} {:<18} {:>16}",
                style("ID").bold(),
                style("COMPANY").bold(),
                style("SCOPE").bold(),
                style("CONTACT").bold(),
                style("STATUS").bold(),
                style("AMOUNT").bold()
            );
            println!("{}", "-".repeat(114));

            for sc in &subcontracts {
                let status_styled = match sc.status {
                    SubcontractStatus::Executed => style(sc.status.to_string()).green(),
                    SubcontractStatus::Terminated => style(sc.status.to_string()).red(),
                    SubcontractStatus::PendingSignature => style(sc.status.to_string()).yellow(),
                    _ => style(sc.status.to_string()).white(),
                };

                println!(
                    "{:<13} {:<28} {:<16} {:<18} {:<18} {:>16}",
                    style(display_id(sc)).cyan(),
                    truncate_str(&sc.company, 26),
                    truncate_str(&sc.scope, 14),
                    truncate_str(&sc.contact, 16),
                    status_styled,
                    format_money(sc.amount)
                );
            }

            println!();
            println!("{} subcontract(s) found.", style(subcontracts.len()).cyan());
        }
        OutputFormat::Id => {
            for sc in &subcontracts {
                println!("{}", display_id(sc));
            }
        }
        OutputFormat::Md => {
            println!("| ID | Company | Scope | Contact | Status | Amount |");
            println!("|---|---|---|---|---|---|");
            for sc in &subcontracts {
                println!(
                    "| {} | {} | {} | {} | {} | {} |",
                    display_id(sc),
                    sc.company,
                    sc.scope,
                    sc.contact,
                    sc.status,
                    format_money(sc.amount)
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
    let store: FileStore<Subcontract> = FileStore::for_project(&project);

    let company: String;
    let scope: String;
    let amount: f64;

    if args.interactive || args.company.is_none() {
        use dialoguer::Input;

        company = Input::new()
            .with_prompt("Company")
            .interact_text()
            .into_diagnostic()?;

        scope = Input::new()
            .with_prompt("Trade scope")
            .allow_empty(true)
            .interact_text()
            .into_diagnostic()?;

        let amount_str: String = Input::new()
            .with_prompt("Amount")
            .default("0".to_string())
            .interact_text()
            .into_diagnostic()?;
        amount = amount_str
            .parse::<f64>()
            .map_err(|_| miette::miette!("Invalid amount: {}", amount_str))?;
    } else {
        company = args
            .company
            .ok_or_else(|| miette::miette!("Company is required (use --company or -c)"))?;
        scope = args.scope;
        amount = args.amount;
    }

    let mut sub = Subcontract::new(config.project_name(), company, scope, amount);
    if let Some(contact) = args.contact {
        sub.contact = contact;
    }
    if let Some(email) = args.email {
        sub.email = email;
    }

    let created = store.create(sub);

    println!(
        "{} Created subcontract {}",
        style("✓").green(),
        style(display_id(&created)).cyan()
    );
    println!(
        "   {} | {} | {}",
        style(&created.company).white(),
        style(&created.scope).yellow(),
        style(format_money(created.amount)).white()
    );

    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let project = resolve_project(global)?;
    let store: FileStore<Subcontract> = FileStore::for_project(&project);

    let sub = store
        .get(&args.id)
        .ok_or_else(|| miette::miette!("No subcontract found matching '{}'", args.id))?;

    match global.format {
        OutputFormat::Json | OutputFormat::Auto => {
            let json = serde_json::to_string_pretty(&sub).into_diagnostic()?;
            println!("{}", json);
        }
        _ => {
            println!("{}  {}", style(display_id(&sub)).cyan(), sub.company);
            println!("Scope:    {}", sub.scope);
            println!("Contact:  {} <{}>", sub.contact, sub.email);
            println!("Status:   {}", sub.status);
            println!("Amount:   {}", format_money(sub.amount));
            for signature in &sub.signatures {
                println!("Signed:   {}", signature);
            }
        }
    }

    Ok(())
}

fn run_update(args: UpdateArgs, global: &GlobalOpts) -> Result<()> {
    let project = resolve_project(global)?;
    let store: FileStore<Subcontract> = FileStore::for_project(&project);

    let mut sub = store
        .get(&args.id)
        .ok_or_else(|| miette::miette!("No subcontract found matching '{}'", args.id))?;

    if let Some(company) = args.company {
        sub.company = company;
    }
    if let Some(scope) = args.scope {
        sub.scope = scope;
    }
    if let Some(amount) = args.amount {
        sub.amount = amount;
    }
    if let Some(contact) = args.contact {
        sub.contact = contact;
    }
    if let Some(email) = args.email {
        sub.email = email;
    }
    if let Some(status) = args.status {
        sub.status = status.parse().map_err(|e| miette::miette!("{}", e))?;
    }
    if let Some(start) = args.start {
        sub.start_date = Some(parse_date(&start)?);
    }
    if let Some(completion) = args.completion {
        sub.completion_date = Some(parse_date(&completion)?);
    }
    if let Some(signature) = args.sign {
        sub.signatures.push(signature);
    }

    let updated = store
        .update(&args.id, sub)
        .ok_or_else(|| miette::miette!("No subcontract found matching '{}'", args.id))?;

    println!(
        "{} Updated subcontract {}",
        style("✓").green(),
        style(display_id(&updated)).cyan()
    );
    println!(
        "   {} | {}",
        style(&updated.company).white(),
        style(updated.status.to_string()).yellow()
    );

    Ok(())
}

fn run_delete(args: DeleteArgs, global: &GlobalOpts) -> Result<()> {
    let project = resolve_project(global)?;
    let store: FileStore<Subcontract> = FileStore::for_project(&project);

    if !args.yes {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!("Delete subcontract {}?", args.id))
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
            "{} Deleted subcontract {}",
            style("✓").green(),
            style(&args.id).cyan()
        );
    } else {
        println!(
            "{} No subcontract found matching '{}'",
            style("!").yellow(),
            args.id
        );
    }

    Ok(())
}

fn display_id(sub: &Subcontract) -> String {
    sub.id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string())
}
