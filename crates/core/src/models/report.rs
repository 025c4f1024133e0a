use chrono::NaiveDate;

use crate::errors::CoreError;

use super::max_balance::MaxBalance;
use super::Milliunits;

/// Convert an integer milliunit amount to decimal display units,
/// rounded to 2 decimal places. Presentation only — never used while
/// balances are still being accumulated.
pub fn milliunits_to_major(amount: Milliunits) -> f64 {
    round2(amount as f64 / 1000.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A fixed exchange rate between the budget's base currency and a quote
/// currency, expressed as base units per quote unit (e.g. a `usd_to_eur`
/// rate of 0.92 means 1 USD = 0.92 EUR).
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRate {
    /// Currency the budget is kept in (e.g. "EUR")
    pub base: String,

    /// Currency the report also shows (e.g. "USD")
    pub quote: String,

    /// Base units per one quote unit
    pub quote_to_base: f64,
}

impl ConversionRate {
    pub fn new(
        base: impl Into<String>,
        quote: impl Into<String>,
        quote_to_base: f64,
    ) -> Result<Self, CoreError> {
        if !quote_to_base.is_finite() || quote_to_base <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Exchange rate must be finite and positive, got {quote_to_base}"
            )));
        }
        Ok(Self {
            base: base.into().to_uppercase(),
            quote: quote.into().to_uppercase(),
            quote_to_base,
        })
    }

    /// Convert an amount in base display units to quote display units,
    /// rounded to 2 decimal places.
    pub fn convert(&self, amount_base: f64) -> f64 {
        round2(amount_base / self.quote_to_base)
    }
}

/// One rendered line of the yearly report, with balances already in
/// decimal display units for both currencies.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub account_name: String,
    pub balance_base: f64,
    pub balance_quote: f64,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportRow {
    /// Build a row from a discovered maximum.
    pub fn from_max_balance(
        account_name: impl Into<String>,
        max: &MaxBalance,
        rate: &ConversionRate,
    ) -> Self {
        let balance_base = milliunits_to_major(max.balance);
        Self {
            account_name: account_name.into(),
            balance_base,
            balance_quote: rate.convert(balance_base),
            start: max.start,
            end: max.end,
        }
    }

    /// Zero placeholder for an account with no transaction in the target
    /// year: 0.00 in both currencies, spanning the whole year.
    pub fn placeholder(
        account_name: impl Into<String>,
        year_start: NaiveDate,
        year_end: NaiveDate,
    ) -> Self {
        Self {
            account_name: account_name.into(),
            balance_base: 0.0,
            balance_quote: 0.0,
            start: year_start,
            end: year_end,
        }
    }
}

/// A fetch that failed for one resource without aborting the rest of the
/// report run. `CoreError` is not `Clone`, so only the rendered message
/// is carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    /// What was being fetched (e.g. "transactions for account Checking")
    pub scope: String,
    pub message: String,
}

/// The full result of one report run: rendered rows in API order, plus
/// any per-resource fetch failures that were skipped over.
#[derive(Debug, Clone, PartialEq)]
pub struct YearlyReport {
    pub year: i32,
    pub rows: Vec<ReportRow>,
    pub failures: Vec<FetchFailure>,
}
