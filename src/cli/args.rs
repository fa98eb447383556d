//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    change_order::CoCommands,
    completions::CompletionsArgs,
    contract::ContractCommands,
    init::InitArgs,
    invoice::InvoiceCommands,
    settings::SettingsCommands,
    status::StatusArgs,
    subcontract::SubCommands,
};

#[derive(Parser)]
#[command(name = "gcpanel")]
#[command(author, version, about = "Highland Tower construction dashboard")]
#[command(
    long_about = "Record store for construction contract administration: contracts, change orders, subcontracts, and invoices as plain JSON files, plus session-scoped application settings."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Project root (default: auto-detect by finding .gcpanel/)
    #[arg(long, global = true)]
    pub project: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new gcPanel project
    Init(InitArgs),

    /// Contract management
    #[command(subcommand)]
    Contract(ContractCommands),

    /// Change order management
    #[command(subcommand)]
    Co(CoCommands),

    /// Subcontract management
    #[command(subcommand)]
    Sub(SubCommands),

    /// Invoice management
    #[command(subcommand)]
    Invoice(InvoiceCommands),

    /// Application settings (preferences, configuration, integrations)
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// Show project status dashboard
    Status(StatusArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (tsv for list, json for show)
    #[default]
    Auto,
    /// JSON format (full fidelity)
    Json,
    /// Tab-separated values (for piping)
    Tsv,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
    /// Just IDs, one per line
    Id,
}
