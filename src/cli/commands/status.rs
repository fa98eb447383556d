//! `gcpanel status` command - Project status dashboard

use console::style;
use miette::Result;

use crate::cli::helpers::{format_money, resolve_project};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::metrics::{
    change_order_metrics, contract_metrics, invoice_metrics, subcontract_metrics,
    ChangeOrderMetrics, ContractMetrics, InvoiceMetrics, SubcontractMetrics,
};
use crate::entities::{ChangeOrder, Contract, Invoice, Subcontract};
use crate::store::FileStore;

#[derive(clap::Args, Debug)]
pub struct StatusArgs {}

pub fn run(_args: StatusArgs, global: &GlobalOpts) -> Result<()> {
    let project = resolve_project(global)?;

    let contracts = FileStore::<Contract>::for_project(&project).load();
    let change_orders = FileStore::<ChangeOrder>::for_project(&project).load();
    let subcontracts = FileStore::<Subcontract>::for_project(&project).load();
    let invoices = FileStore::<Invoice>::for_project(&project).load();

    let con = contract_metrics(&contracts);
    let co = change_order_metrics(&change_orders);
    let sub = subcontract_metrics(&subcontracts);
    let inv = invoice_metrics(&invoices);

    match global.format {
        OutputFormat::Json => {
            let status = serde_json::json!({
                "contracts": con,
                "change_orders": co,
                "subcontracts": sub,
                "invoices": inv,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&status).unwrap_or_default()
            );
        }
        _ => {
            let width = 68;

            println!("{}", style("gcPanel Project Status").bold().underlined());
            println!("{}", "═".repeat(width));
            println!();

            print_two_columns(
                "CONTRACTS",
                &format_contract_metrics(&con),
                "CHANGE ORDERS",
                &format_change_order_metrics(&co),
            );

            println!();

            print_two_columns(
                "SUBCONTRACTS",
                &format_subcontract_metrics(&sub),
                "INVOICES",
                &format_invoice_metrics(&inv),
            );

            println!();
            println!("{}", "═".repeat(width));

            let health = calculate_health(&con, &co, &inv);
            let health_style = match health.as_str() {
                "Healthy" => style(health.clone()).green().bold(),
                "Warning" => style(health.clone()).yellow().bold(),
                "Critical" => style(health.clone()).red().bold(),
                _ => style(health.clone()).dim(),
            };
            println!("Project Health: {}", health_style);
        }
    }

    Ok(())
}

fn format_contract_metrics(m: &ContractMetrics) -> Vec<String> {
    vec![
        format!("Total:      {}", m.total),
        format!("Active:     {}", m.by_status.get("Active").unwrap_or(&0)),
        format!("Draft:      {}", m.by_status.get("Draft").unwrap_or(&0)),
        format!("Original:   {}", format_money(m.original_value)),
        format!("Current:    {}", format_money(m.current_value)),
    ]
}

fn format_change_order_metrics(m: &ChangeOrderMetrics) -> Vec<String> {
    let mut lines = vec![
        format!("Total:      {}", m.total),
        format!("Approved:   {}", m.by_status.get("Approved").unwrap_or(&0)),
    ];

    if m.pending > 0 {
        lines.push(format!("Pending:    {} {}", m.pending, style("⚠").yellow()));
    } else {
        lines.push("Pending:    0".to_string());
    }
    lines.push(format!("Value:      {}", format_money(m.approved_amount)));
    lines.push(format!("Days added: {}", m.total_days_added));

    lines
}

fn format_subcontract_metrics(m: &SubcontractMetrics) -> Vec<String> {
    vec![
        format!("Total:      {}", m.total),
        format!("Executed:   {}", m.by_status.get("Executed").unwrap_or(&0)),
        format!("Trades:     {}", m.by_scope.len()),
        format!("Committed:  {}", format_money(m.committed_amount)),
    ]
}

fn format_invoice_metrics(m: &InvoiceMetrics) -> Vec<String> {
    let mut lines = vec![
        format!("Total:      {}", m.total),
        format!("Paid:       {}", m.paid),
        format!("Billed:     {}", format_money(m.total_billed)),
        format!("Retainage:  {}", format_money(m.total_retainage)),
    ];

    let rejected = *m.by_status.get("Rejected").unwrap_or(&0);
    if rejected > 0 {
        lines.push(format!("Rejected:   {} {}", rejected, style("⚠").red()));
    }

    lines
}

fn print_two_columns(title1: &str, lines1: &[String], title2: &str, lines2: &[String]) {
    let col_width = 32;

    println!("{:<col_width$} {}", style(title1).bold(), style(title2).bold());
    println!("{:-<col_width$} {:-<col_width$}", "", "");

    let max_lines = lines1.len().max(lines2.len());

    for i in 0..max_lines {
        let l1 = lines1.get(i).map(|s| s.as_str()).unwrap_or("");
        let l2 = lines2.get(i).map(|s| s.as_str()).unwrap_or("");
        println!("  {:<30} {}", l1, l2);
    }
}

fn calculate_health(con: &ContractMetrics, co: &ChangeOrderMetrics, inv: &InvoiceMetrics) -> String {
    let mut score = 100i32;

    let terminated = *con.by_status.get("Terminated").unwrap_or(&0);
    if terminated > 0 {
        score -= 15 * terminated as i32;
    }

    if co.pending > 3 {
        score -= 15;
    } else if co.pending > 0 {
        score -= 5;
    }

    let rejected = *co.by_status.get("Rejected").unwrap_or(&0);
    if rejected > 0 {
        score -= 10 * rejected as i32;
    }

    let rejected_invoices = *inv.by_status.get("Rejected").unwrap_or(&0);
    if rejected_invoices > 0 {
        score -= 10 * rejected_invoices as i32;
    }

    match score {
        80..=100 => "Healthy".to_string(),
        50..=79 => "Warning".to_string(),
        _ => "Critical".to_string(),
    }
}
