//! `gcpanel co` command - Change order management

use clap::{Subcommand, ValueEnum};
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::contract::parse_date;
use crate::cli::helpers::{escape_csv, format_money, resolve_project, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::entities::change_order::{ChangeOrder, ChangeOrderStatus};
use crate::store::FileStore;

#[derive(Subcommand, Debug)]
pub enum CoCommands {
    /// List change orders with filtering
    List(ListArgs),

    /// Create a new change order
    New(NewArgs),

    /// Show a change order's details
    Show(ShowArgs),

    /// Update fields on a change order
    Update(UpdateArgs),

    /// Delete a change order
    Delete(DeleteArgs),
}

/// Change order status filter
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusFilter {
    Draft,
    Submitted,
    Pending,
    Approved,
    Rejected,
    All,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortField {
    Description,
    Amount,
    Status,
    Date,
    Created,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by change order status
    #[arg(long, short = 's', default_value = "all")]
    pub status: StatusFilter,

    /// Search in description and reason
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
    /// What changed (required unless interactive)
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Justification for the change
    #[arg(long, default_value = "")]
    pub reason: String,

    /// Amount of this change
    #[arg(long, default_value_t = 0.0)]
    pub amount: f64,

    /// Schedule days added
    #[arg(long, default_value_t = 0)]
    pub days: i32,

    /// Id of the contract this change order amends
    #[arg(long)]
    pub contract: Option<String>,

    /// Interactive mode (prompt for fields)
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Change order ID (CO-YYYY-NNN)
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// Change order ID (CO-YYYY-NNN)
    pub id: String,

    /// New description
    #[arg(long)]
    pub description: Option<String>,

    /// New reason
    #[arg(long)]
    pub reason: Option<String>,

    /// New amount for this change
    #[arg(long)]
    pub amount: Option<f64>,

    /// New schedule days added
    #[arg(long)]
    pub days: Option<i32>,

    /// New status (any status may be set; no transition rules apply)
    #[arg(long, short = 's')]
    pub status: Option<String>,

    /// New effective date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Append a signature, e.g. "Contractor: John Doe"
    #[arg(long)]
    pub sign: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Change order ID (CO-YYYY-NNN)
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Run a change order subcommand
pub fn run(cmd: CoCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        CoCommands::List(args) => run_list(args, global),
        CoCommands::New(args) => run_new(args, global),
        CoCommands::Show(args) => run_show(args, global),
        CoCommands::Update(args) => run_update(args, global),
        CoCommands::Delete(args) => run_delete(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let project = resolve_project(global)?;
    let store: FileStore<ChangeOrder> = FileStore::for_project(&project);

    let mut change_orders: Vec<ChangeOrder> = store
        .load()
        .into_iter()
        .filter(|co| match args.status {
            StatusFilter::Draft => co.status == ChangeOrderStatus::Draft,
            StatusFilter::Submitted => co.status == ChangeOrderStatus::Submitted,
            StatusFilter::Pending => co.status == ChangeOrderStatus::PendingApproval,
            StatusFilter::Approved => co.status == ChangeOrderStatus::Approved,
            StatusFilter::Rejected => co.status == ChangeOrderStatus::Rejected,
            StatusFilter::All => true,
        })
        .filter(|co| {
            if let Some(ref search) = args.search {
                let needle = search.to_lowercase();
                co.description.to_lowercase().contains(&needle)
                    || co.reason.to_lowercase().contains(&needle)
            } else {
                true
            }
        })
        .collect();

    match args.sort {
        SortField::Description => {
            change_orders.sort_by(|a, b| a.description.cmp(&b.description))
        }
        SortField::Amount => change_orders.sort_by(|a, b| {
            a.this_change
                .partial_cmp(&b.this_change)
                .unwrap_or(std::cmp::Ordering::Equal)
        }),
        SortField::Status => {
            change_orders.sort_by(|a, b| a.status.to_string().cmp(&b.status.to_string()))
        }
        SortField::Date => change_orders.sort_by(|a, b| a.date.cmp(&b.date)),
        SortField::Created => change_orders.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
    }

    if args.reverse {
        change_orders.reverse();
    }

    if let Some(limit) = args.limit {
        change_orders.truncate(limit);
    }

    if args.count {
        println!("{}", change_orders.len());
        return Ok(());
    }

    if change_orders.is_empty() {
        println!("No change orders found.");
        return Ok(());
    }

    let format = if global.format == OutputFormat::Auto {
        OutputFormat::Tsv
    } else {
        global.format
    };

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&change_orders).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Csv => {
            println!("id,description,reason,status,this_change,days_added,revised_amount");
            for co in &change_orders {
                println!(
                    "{},{},{},{},{:.2},{},{:.2}",
                    display_id(co),
                    escape_csv(&co.description),
                    escape_csv(&co.reason),
                    co.status,
                    co.this_change,
                    co.days_added,
                    co.revised_amount()
                );
            }
        }
        OutputFormat::Tsv => {
            println!(
                "{:<13} {:<30} {:<18} {:<18} {:>14} {:>6}",
                style("ID").bold(),
                style("DESCRIPTION").bold(),
                style("REASON").bold(),
                style("STATUS").bold(),
                style("AMOUNT").bold(),
                style("DAYS").bold()
            );
            println!("{}", "-".repeat(104));

            for co in &change_orders {
                let status_styled = match co.status {
                    ChangeOrderStatus::Approved => style(co.status.to_string()).green(),
                    ChangeOrderStatus::Rejected => style(co.status.to_string()).red(),
                    ChangeOrderStatus::PendingApproval | ChangeOrderStatus::Submitted => {
                        style(co.status.to_string()).yellow()
                    }
                    _ => style(co.status.to_string()).white(),
                };

                println!(
                    "{:<13} {:<30} {:<18} {:<18} {:>14} {:>6}",
                    style(display_id(co)).cyan(),
                    truncate_str(&co.description, 28),
                    truncate_str(&co.reason, 16),
                    status_styled,
                    format_money(co.this_change),
                    co.days_added
                );
            }

            println!();
            println!(
                "{} change order(s) found.",
                style(change_orders.len()).cyan()
            );
        }
        OutputFormat::Id => {
            for co in &change_orders {
                println!("{}", display_id(co));
            }
        }
        OutputFormat::Md => {
            println!("| ID | Description | Reason | Status | Amount | Days |");
            println!("|---|---|---|---|---|---|");
            for co in &change_orders {
                println!(
                    "| {} | {} | {} | {} | {} | {} |",
                    display_id(co),
                    co.description,
                    co.reason,
                    co.status,
                    format_money(co.this_change),
                    co.days_added
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
    let store: FileStore<ChangeOrder> = FileStore::for_project(&project);

    let description: String;
    let reason: String;
    let amount: f64;

    if args.interactive || args.description.is_none() {
        use dialoguer::Input;

        description = Input::new()
            .with_prompt("Description")
            .interact_text()
            .into_diagnostic()?;

        reason = Input::new()
            .with_prompt("Reason")
            .allow_empty(true)
            .interact_text()
            .into_diagnostic()?;

        let amount_str: String = Input::new()
            .with_prompt("Amount of this change")
            .default("0".to_string())
            .interact_text()
            .into_diagnostic()?;
        amount = amount_str
            .parse::<f64>()
            .map_err(|_| miette::miette!("Invalid amount: {}", amount_str))?;
    } else {
        description = args
            .description
            .ok_or_else(|| miette::miette!("Description is required (use --description or -d)"))?;
        reason = args.reason;
        amount = args.amount;
    }

    let mut co = ChangeOrder::new(config.project_name(), description, reason, amount);
    co.days_added = args.days;
    co.contract_id = args.contract;

    let created = store.create(co);
    let id = display_id(&created);

    println!(
        "{} Created change order {}",
        style("✓").green(),
        style(&id).cyan()
    );
    println!(
        "   {} | {}",
        style(&created.description).white(),
        style(format_money(created.this_change)).white()
    );

    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let project = resolve_project(global)?;
    let store: FileStore<ChangeOrder> = FileStore::for_project(&project);

    let co = store
        .get(&args.id)
        .ok_or_else(|| miette::miette!("No change order found matching '{}'", args.id))?;

    match global.format {
        OutputFormat::Json | OutputFormat::Auto => {
            let json = serde_json::to_string_pretty(&co).into_diagnostic()?;
            println!("{}", json);
        }
        _ => {
            println!("{}  {}", style(display_id(&co)).cyan(), co.description);
            println!("Reason:          {}", co.reason);
            println!("Status:          {}", co.status);
            println!("This change:     {}", format_money(co.this_change));
            println!("Days added:      {}", co.days_added);
            println!("Revised amount:  {}", format_money(co.revised_amount()));
            for signature in &co.signatures {
                println!("Signed:          {}", signature);
            }
        }
    }

    Ok(())
}

fn run_update(args: UpdateArgs, global: &GlobalOpts) -> Result<()> {
    let project = resolve_project(global)?;
    let store: FileStore<ChangeOrder> = FileStore::for_project(&project);

    let mut co = store
        .get(&args.id)
        .ok_or_else(|| miette::miette!("No change order found matching '{}'", args.id))?;

    if let Some(description) = args.description {
        co.description = description;
    }
    if let Some(reason) = args.reason {
        co.reason = reason;
    }
    if let Some(amount) = args.amount {
        co.this_change = amount;
    }
    if let Some(days) = args.days {
        co.days_added = days;
    }
    if let Some(status) = args.status {
        co.status = status.parse().map_err(|e| miette::miette!("{}", e))?;
    }
    if let Some(date) = args.date {
        co.date = Some(parse_date(&date)?);
    }
    if let Some(signature) = args.sign {
        co.signatures.push(signature);
    }

    let updated = store
        .update(&args.id, co)
        .ok_or_else(|| miette::miette!("No change order found matching '{}'", args.id))?;

    println!(
        "{} Updated change order {}",
        style("✓").green(),
        style(display_id(&updated)).cyan()
    );
    println!(
        "   {} | {}",
        style(&updated.description).white(),
        style(updated.status.to_string()).yellow()
    );

    Ok(())
}

fn run_delete(args: DeleteArgs, global: &GlobalOpts) -> Result<()> {
    let project = resolve_project(global)?;
    let store: FileStore<ChangeOrder> = FileStore::for_project(&project);

    if !args.yes {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!("Delete change order {}?", args.id))
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
            "{} Deleted change order {}",
            style("✓").green(),
            style(&args.id).cyan()
        );
    } else {
        println!(
            "{} No change order found matching '{}'",
            style("!").yellow(),
            args.id
        );
    }

    Ok(())
}

fn display_id(co: &ChangeOrder) -> String {
    co.id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string())
}
