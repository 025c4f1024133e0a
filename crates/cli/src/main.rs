mod config;
mod logger;
mod table;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::path::PathBuf;

use ynab_peak_core::{ConversionRate, FrankfurterClient, ReportService, YnabClient};

use crate::config::CurrencyConfig;

#[derive(Parser)]
#[command(
    name = "ynab-peak",
    about = "Yearly maximum cleared-balance report for YNAB budgets",
    version
)]
struct Cli {
    /// Path to the TOML config file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Target year (overrides the config file)
    #[arg(short, long)]
    year: Option<i32>,

    /// YNAB personal access token (overrides the config file)
    #[arg(long, env = "YNAB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let cfg = config::load(&cli.config)?;
    let year = cli.year.or(cfg.year).ok_or_else(|| {
        anyhow!(
            "No target year given: pass --year or set `year` in {}",
            cli.config.display()
        )
    })?;
    let token = cli.token.unwrap_or(cfg.ynab.token);

    let rate = resolve_rate(&cfg.currency).await?;
    tracing::debug!(base = %rate.base, quote = %rate.quote, rate.quote_to_base, "using exchange rate");

    let service = ReportService::new(YnabClient::new(token));
    let report = service.yearly_report(year, &rate).await?;

    for failure in &report.failures {
        tracing::error!("Failed to fetch {}: {}", failure.scope, failure.message);
    }

    println!("Maximum cleared balance per account in {year}");
    print!("{}", table::render(&report, &rate));

    if !report.failures.is_empty() {
        eprintln!(
            "{} fetch(es) failed; the affected accounts are missing above.",
            report.failures.len()
        );
    }
    Ok(())
}

/// Resolve the exchange rate: a pinned `quote_to_base` wins, otherwise a
/// single lookup against the exchange-rate API.
async fn resolve_rate(currency: &CurrencyConfig) -> Result<ConversionRate> {
    let quote_to_base = match currency.quote_to_base {
        Some(pinned) => pinned,
        None => FrankfurterClient::new()
            .latest_rate(&currency.base, &currency.quote)
            .await
            .with_context(|| {
                format!(
                    "Failed to fetch the {}/{} exchange rate; set `currency.quote_to_base` in the config to run without the lookup",
                    currency.base, currency.quote
                )
            })?,
    };
    Ok(ConversionRate::new(
        &currency.base,
        &currency.quote,
        quote_to_base,
    )?)
}
