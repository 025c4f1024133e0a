use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// TOML configuration for the report run.
///
/// ```toml
/// year = 2024
///
/// [ynab]
/// token = "personal-access-token"
///
/// [currency]
/// base = "EUR"
/// quote = "USD"
/// # Pin the rate to skip the exchange-rate lookup:
/// # quote_to_base = 0.92
/// ```
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Target year; `--year` on the command line takes precedence.
    pub year: Option<i32>,

    pub ynab: YnabConfig,

    #[serde(default)]
    pub currency: CurrencyConfig,
}

#[derive(Debug, Deserialize)]
pub struct YnabConfig {
    /// YNAB personal access token.
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct CurrencyConfig {
    /// Currency the budgets are kept in.
    #[serde(default = "default_base")]
    pub base: String,

    /// Second currency shown in the report.
    #[serde(default = "default_quote")]
    pub quote: String,

    /// Base units per one quote unit. When absent the rate is fetched
    /// from the exchange-rate API at startup.
    pub quote_to_base: Option<f64>,
}

fn default_base() -> String {
    "EUR".to_string()
}

fn default_quote() -> String {
    "USD".to_string()
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            base: default_base(),
            quote: default_quote(),
            quote_to_base: None,
        }
    }
}

pub fn load(path: &Path) -> Result<Config> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let cfg: Config =
        toml::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))?;
    validate(&cfg)?;
    Ok(cfg)
}

fn validate(cfg: &Config) -> Result<()> {
    if cfg.ynab.token.trim().is_empty() {
        bail!("Config field `ynab.token` must not be empty");
    }
    if let Some(year) = cfg.year {
        if !(1..=9999).contains(&year) {
            bail!("Config field `year` must be a 4-digit calendar year, got {year}");
        }
    }
    if cfg.currency.base.trim().is_empty() || cfg.currency.quote.trim().is_empty() {
        bail!("Config fields `currency.base` and `currency.quote` must not be empty");
    }
    if let Some(rate) = cfg.currency.quote_to_base {
        if !rate.is_finite() || rate <= 0.0 {
            bail!("Config field `currency.quote_to_base` must be finite and positive, got {rate}");
        }
    }
    Ok(())
}
