//! Core library for ynab-peak.
//!
//! Fetches budgets, accounts, and transactions from the YNAB API,
//! reconstructs each account's historical balances backward from the
//! present-day cleared balance, and reports the maximum balance reached
//! during a target calendar year together with the date range over which
//! it held.

pub mod client;
pub mod errors;
pub mod models;
pub mod services;

pub use client::frankfurter::FrankfurterClient;
pub use client::traits::BudgetDataSource;
pub use client::ynab::YnabClient;
pub use errors::CoreError;
pub use models::max_balance::MaxBalance;
pub use models::report::{ConversionRate, FetchFailure, ReportRow, YearlyReport};
pub use models::Milliunits;
pub use services::balance::max_cleared_balance;
pub use services::report::ReportService;
