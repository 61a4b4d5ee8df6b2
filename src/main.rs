//! Deposit Yield CLI
//!
//! Summarizes a portfolio snapshot and prints the monthly allowance schedule

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use deposit_yield::deposit::load_portfolio;
use deposit_yield::projection::{total_net, within_horizon, write_allowances_csv};
use deposit_yield::summary::matured_unsettled_override;
use deposit_yield::{
    summarize_portfolio, CashFlowProjector, DepositStatus, DepositSummary, MonthlyAllowance,
    PortfolioTotals, ProjectionConfig,
};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "deposit-yield",
    version,
    about = "Deposit yield and monthly allowance projection"
)]
struct Cli {
    /// Portfolio snapshot (JSON with `banks` and `deposits`)
    portfolio: PathBuf,

    /// Projection date (YYYY-MM-DD); defaults to the local date
    #[arg(long, env = "DEPOSIT_YIELD_TODAY")]
    today: Option<NaiveDate>,

    /// Months of allowance schedule to show, starting this month
    #[arg(long, default_value_t = 12, env = "DEPOSIT_YIELD_HORIZON")]
    horizon: u32,

    /// Write the allowance schedule to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Keep settled deposits in the projection
    #[arg(long)]
    include_settled: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    today: NaiveDate,
    totals: &'a PortfolioTotals,
    summaries: &'a [DepositSummary],
    allowances: &'a [MonthlyAllowance],
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let today = cli.today.unwrap_or_else(|| chrono::Local::now().date_naive());
    let config = ProjectionConfig::default();

    let portfolio = load_portfolio(&cli.portfolio)
        .with_context(|| format!("Failed to load portfolio {}", cli.portfolio.display()))?;

    let summaries: Vec<DepositSummary> = summarize_portfolio(&portfolio, &config)?
        .into_iter()
        .map(|summary| match matured_unsettled_override(&summary, today) {
            Some(status) => summary.with_effective_status(status),
            None => summary,
        })
        .filter(|summary| cli.include_settled || summary.status() != DepositStatus::Settled)
        .collect();

    let totals = PortfolioTotals::from_summaries(&summaries);
    let projected = CashFlowProjector::new(config).project(&summaries, today);
    let allowances = within_horizon(&projected, today, cli.horizon);

    if let Some(path) = &cli.csv {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        write_allowances_csv(BufWriter::new(file), &allowances)?;
        log::info!("Allowance schedule written to {}", path.display());
    }

    if cli.json {
        let report = Report {
            today,
            totals: &totals,
            summaries: &summaries,
            allowances: &allowances,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_summaries(&summaries);
    print_totals(&totals);
    print_allowances(&allowances, today, cli.horizon);

    Ok(())
}

fn print_summaries(summaries: &[DepositSummary]) {
    println!("Deposits ({}):", summaries.len());
    println!(
        "{:<10} {:<24} {:<18} {:>14} {:>12} {:>12} {:>12} {:<18}",
        "Id", "Name", "Bank", "Principal", "Gross", "Net", "Maturity", "Status"
    );
    println!("{}", "-".repeat(128));

    for s in summaries {
        let maturity = match s.maturity_date {
            Some(date) => date.to_string(),
            None => "open (12m)".to_string(),
        };
        println!(
            "{:<10} {:<24} {:<18} {:>14.2} {:>12.2} {:>12.2} {:>12} {:<18}",
            s.deposit.id,
            s.deposit.name,
            s.bank.name,
            s.deposit.principal,
            s.gross_interest,
            s.net_interest,
            maturity,
            s.status().as_str(),
        );
    }
}

fn print_totals(totals: &PortfolioTotals) {
    println!("\nPortfolio:");
    println!("  Deposits: {} ({} open-ended)", totals.deposit_count, totals.open_ended_count);
    println!("  Total Principal: ${:.2}", totals.total_principal);
    println!("  Gross Interest: ${:.2}", totals.total_gross_interest);
    println!("  Net Interest: ${:.2}", totals.total_net_interest);
    println!("  Net Value: ${:.2}", totals.total_net_value);
    println!("  Weighted Rate: {:.4}%", totals.weighted_average_rate * 100.0);
}

/// Month line of the allowance table, with the principal coming back that month
fn month_header(allowance: &MonthlyAllowance) -> String {
    let principal = allowance.principal_returned();
    if principal > 0.0 {
        format!(
            "  {:<9} {:>12.2}  (principal back {:.2})",
            allowance.label, allowance.net, principal
        )
    } else {
        format!("  {:<9} {:>12.2}", allowance.label, allowance.net)
    }
}

fn print_allowances(allowances: &[MonthlyAllowance], today: NaiveDate, horizon: u32) {
    println!("\nMonthly allowance from {} ({} months):", today, horizon);
    for allowance in allowances {
        println!("{}", month_header(allowance));
        for entry in &allowance.entries {
            let principal = if entry.principal_returned > 0.0 {
                format!(" + principal {:.2}", entry.principal_returned)
            } else {
                String::new()
            };
            println!(
                "      {:<24} {:<18} {:<8} {:>12.2}{}",
                entry.name,
                entry.bank_name,
                entry.payout_frequency.as_str(),
                entry.net,
                principal
            );
        }
    }
    println!("  Total: ${:.2}", total_net(allowances));
}
