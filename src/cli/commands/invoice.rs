//! `gcpanel invoice` command - Invoice management

use clap::{Subcommand, ValueEnum};
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::contract::parse_date;
use crate::cli::helpers::{escape_csv, format_money, resolve_project, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::entities::invoice::{Invoice, InvoiceStatus};
use crate::store::FileStore;

#[derive(Subcommand, Debug)]
pub enum InvoiceCommands {
    /// List invoices with filtering
    List(ListArgs),

    /// Create a new invoice
    New(NewArgs),

    /// Show an invoice's details
    Show(ShowArgs),

    /// Update fields on an invoice
    Update(UpdateArgs),

    /// Delete an invoice
    Delete(DeleteArgs),
}

/// Invoice status filter
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusFilter {
    Draft,
    Submitted,
    Approved,
    Paid,
    Rejected,
    All,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortField {
    Company,
    Amount,
    Status,
    Date,
    Created,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by invoice status
    #[arg(long, short = 's', default_value = "all")]
    pub status: StatusFilter,

    /// Search in company and description
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
    /// Billing company (required unless interactive)
    #[arg(long, short = 'c')]
    pub company: Option<String>,

    /// Billing period description, e.g. "March Progress"
    #[arg(long, short = 'd', default_value = "")]
    pub description: String,

    /// Amount billed on this invoice
    #[arg(long, default_value_t = 0.0)]
    pub amount: f64,

    /// Retainage withheld from this invoice
    #[arg(long, default_value_t = 0.0)]
    pub retainage: f64,

    /// Base contract amount being billed against
    #[arg(long, default_value_t = 0.0)]
    pub contract_amount: f64,

    /// Interactive mode (prompt for fields)
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Invoice ID (INV-YYYY-NNN)
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// Invoice ID (INV-YYYY-NNN)
    pub id: String,

    /// New billing company
    #[arg(long)]
    pub company: Option<String>,

    /// New billing period description
    #[arg(long)]
    pub description: Option<String>,

    /// New current billed amount
    #[arg(long)]
    pub amount: Option<f64>,

    /// New retainage amount
    #[arg(long)]
    pub retainage: Option<f64>,

    /// New status (any status may be set; no transition rules apply)
    #[arg(long, short = 's')]
    pub status: Option<String>,

    /// New billing date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Append a signature
    #[arg(long)]
    pub sign: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Invoice ID (INV-YYYY-NNN)
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Run an invoice subcommand
pub fn run(cmd: InvoiceCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        InvoiceCommands::List(args) => run_list(args, global),
        InvoiceCommands::New(args) => run_new(args, global),
        InvoiceCommands::Show(args) => run_show(args, global),
        InvoiceCommands::Update(args) => run_update(args, global),
        InvoiceCommands::Delete(args) => run_delete(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let project = resolve_project(global)?;
    let store: FileStore<Invoice> = FileStore::for_project(&project);

    let mut invoices: Vec<Invoice> = store
        .load()
        .into_iter()
        .filter(|inv| match args.status {
            StatusFilter::Draft => inv.status == InvoiceStatus::Draft,
            StatusFilter::Submitted => inv.status == InvoiceStatus::Submitted,
            StatusFilter::Approved => inv.status == InvoiceStatus::Approved,
            StatusFilter::Paid => inv.status == InvoiceStatus::Paid,
            StatusFilter::Rejected => inv.status == InvoiceStatus::Rejected,
            StatusFilter::All => true,
        })
        .filter(|inv| {
            if let Some(ref search) = args.search {
                let needle = search.to_lowercase();
                inv.company.to_lowercase().contains(&needle)
                    || inv.description.to_lowercase().contains(&needle)
            } else {
                true
            }
        })
        .collect();

    match args.sort {
        SortField::Company => invoices.sort_by(|a, b| a.company.cmp(&b.company)),
        SortField::Amount => invoices.sort_by(|a, b| {
            a.current_billed
                .partial_cmp(&b.current_billed)
                .unwrap_or(std::cmp::Ordering::Equal)
        }),
        SortField::Status => {
            invoices.sort_by(|a, b| a.status.to_string().cmp(&b.status.to_string()))
        }
        SortField::Date => invoices.sort_by(|a, b| a.date.cmp(&b.date)),
        SortField::Created => invoices.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
    }

    if args.reverse {
        invoices.reverse();
    }

    if let Some(limit) = args.limit {
        invoices.truncate(limit);
    }

    if args.count {
        println!("{}", invoices.len());
        return Ok(());
    }

    if invoices.is_empty() {
        println!("No invoices found.");
        return Ok(());
    }

    let format = if global.format == OutputFormat::Auto {
        OutputFormat::Tsv
    } else {
        global.format
    };

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&invoices).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Csv => {
            println!("id,company,description,status,current_billed,retainage,amount_due");
            for inv in &invoices {
                println!(
                    "{},{},{},{},{:.2},{:.2},{:.2}",
                    display_id(inv),
                    escape_csv(&inv.company),
                    escape_csv(&inv.description),
                    inv.status,
                    inv.current_billed,
                    inv.retainage,
                    inv.amount_due()
                );
            }
        }
        OutputFormat::Tsv => {
            println!(
                "{:<14} {:<28} {:<20} {:<12} {:>14} {:>14}",
                style("ID").bold(),
                style("COMPANY").bold(),
                style("DESCRIPTION").bold(),
                style("STATUS").bold(),
                style("BILLED").bold(),
                style("DUE").bold()
            );
            println!("{}", "-".repeat(108));

            for inv in &invoices {
                let status_styled = match inv.status {
                    InvoiceStatus::Paid => style(inv.status.to_string()).green(),
                    InvoiceStatus::Rejected => style(inv.status.to_string()).red(),
                    InvoiceStatus::Submitted => style(inv.status.to_string()).yellow(),
                    _ => style(inv.status.to_string()).white(),
                };

                println!(
                    "{:<14} {:<28} {:<20} {:<12} {:>14} {:>14}",
                    style(display_id(inv)).cyan(),
                    truncate_str(&inv.company, 26),
                    truncate_str(&inv.description, 18),
                    status_styled,
                    format_money(inv.current_billed),
                    format_money(inv.amount_due())
                );
            }

            println!();
            println!("{} invoice(s) found.", style(invoices.len()).cyan());
        }
        OutputFormat::Id => {
            for inv in &invoices {
                println!("{}", display_id(inv));
            }
        }
        OutputFormat::Md => {
            println!("| ID | Company | Description | Status | Billed | Due |");
            println!("|---|---|---|---|---|---|");
            for inv in &invoices {
                println!(
                    "| {} | {} | {} | {} | {} | {} |",
                    display_id(inv),
                    inv.company,
                    inv.description,
                    inv.status,
                    format_money(inv.current_billed),
                    format_money(inv.amount_due())
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
    let store: FileStore<Invoice> = FileStore::for_project(&project);

    let company: String;
    let description: String;
    let amount: f64;

    if args.interactive || args.company.is_none() {
        use dialoguer::Input;

        company = Input::new()
            .with_prompt("Billing company")
            .interact_text()
            .into_diagnostic()?;

        description = Input::new()
            .with_prompt("Billing period")
            .allow_empty(true)
            .interact_text()
            .into_diagnostic()?;

        let amount_str: String = Input::new()
            .with_prompt("Amount billed")
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
        description = args.description;
        amount = args.amount;
    }

    let mut invoice = Invoice::new(config.project_name(), company, description, amount);
    invoice.retainage = args.retainage;
    invoice.contract_amount = args.contract_amount;

    let created = store.create(invoice);

    println!(
        "{} Created invoice {}",
        style("✓").green(),
        style(display_id(&created)).cyan()
    );
    println!(
        "   {} | billed {} | due {}",
        style(&created.company).white(),
        style(format_money(created.current_billed)).white(),
        style(format_money(created.amount_due())).white()
    );

    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let project = resolve_project(global)?;
    let store: FileStore<Invoice> = FileStore::for_project(&project);

    let invoice = store
        .get(&args.id)
        .ok_or_else(|| miette::miette!("No invoice found matching '{}'", args.id))?;

    match global.format {
        OutputFormat::Json | OutputFormat::Auto => {
            let json = serde_json::to_string_pretty(&invoice).into_diagnostic()?;
            println!("{}", json);
        }
        _ => {
            println!(
                "{}  {} - {}",
                style(display_id(&invoice)).cyan(),
                invoice.company,
                invoice.description
            );
            println!("Status:           {}", invoice.status);
            println!(
                "Contract amount:  {}",
                format_money(invoice.contract_amount)
            );
            println!(
                "Previously billed: {}",
                format_money(invoice.previously_billed)
            );
            println!("Current billed:   {}", format_money(invoice.current_billed));
            println!("Retainage:        {}", format_money(invoice.retainage));
            println!("Amount due:       {}", format_money(invoice.amount_due()));
            for signature in &invoice.signatures {
                println!("Signed:           {}", signature);
            }
        }
    }

    Ok(())
}

fn run_update(args: UpdateArgs, global: &GlobalOpts) -> Result<()> {
    let project = resolve_project(global)?;
    let store: FileStore<Invoice> = FileStore::for_project(&project);

    let mut invoice = store
        .get(&args.id)
        .ok_or_else(|| miette::miette!("No invoice found matching '{}'", args.id))?;

    if let Some(company) = args.company {
        invoice.company = company;
    }
    if let Some(description) = args.description {
        invoice.description = description;
    }
    if let Some(amount) = args.amount {
        invoice.current_billed = amount;
    }
    if let Some(retainage) = args.retainage {
        invoice.retainage = retainage;
    }
    if let Some(status) = args.status {
        invoice.status = status.parse().map_err(|e| miette::miette!("{}", e))?;
    }
    if let Some(date) = args.date {
        invoice.date = Some(parse_date(&date)?);
    }
    if let Some(signature) = args.sign {
        invoice.signatures.push(signature);
    }

    let updated = store
        .update(&args.id, invoice)
        .ok_or_else(|| miette::miette!("No invoice found matching '{}'", args.id))?;

    println!(
        "{} Updated invoice {}",
        style("✓").green(),
        style(display_id(&updated)).cyan()
    );
    println!(
        "   {} | {} | due {}",
        style(&updated.company).white(),
        style(updated.status.to_string()).yellow(),
        style(format_money(updated.amount_due())).white()
    );

    Ok(())
}

fn run_delete(args: DeleteArgs, global: &GlobalOpts) -> Result<()> {
    let project = resolve_project(global)?;
    let store: FileStore<Invoice> = FileStore::for_project(&project);

    if !args.yes {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!("Delete invoice {}?", args.id))
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
            "{} Deleted invoice {}",
            style("✓").green(),
            style(&args.id).cyan()
        );
    } else {
        println!(
            "{} No invoice found matching '{}'",
            style("!").yellow(),
            args.id
        );
    }

    Ok(())
}

fn display_id(invoice: &Invoice) -> String {
    invoice
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string())
}
