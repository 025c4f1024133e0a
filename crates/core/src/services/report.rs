use chrono::NaiveDate;

use crate::client::traits::BudgetDataSource;
use crate::errors::CoreError;
use crate::models::account::Account;
use crate::models::report::{ConversionRate, FetchFailure, ReportRow, YearlyReport};
use crate::models::transaction::Transaction;

use super::balance::max_cleared_balance;

/// Builds the yearly maximum-balance report by orchestrating the data
/// source and the balance reconstruction.
///
/// A failed fetch for one budget's accounts or one account's
/// transactions is recorded in the report's `failures` and skipped; the
/// remaining resources are still reported. Only a failed budgets fetch
/// is fatal — there is nothing to report without it.
pub struct ReportService<S: BudgetDataSource> {
    source: S,
}

impl<S: BudgetDataSource> ReportService<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Generate the report for `year`, converting balances with `rate`.
    /// Rows keep API ordering: budgets in listing order, then accounts.
    pub async fn yearly_report(
        &self,
        year: i32,
        rate: &ConversionRate,
    ) -> Result<YearlyReport, CoreError> {
        let year_start = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(|| {
            CoreError::ValidationError(format!("Invalid target year: {year}"))
        })?;
        let year_end = NaiveDate::from_ymd_opt(year, 12, 31).ok_or_else(|| {
            CoreError::ValidationError(format!("Invalid target year: {year}"))
        })?;

        let budgets = self.source.budgets().await?;
        tracing::debug!(count = budgets.len(), "fetched budgets");

        let mut rows = Vec::new();
        let mut failures = Vec::new();

        for budget in &budgets {
            let accounts = match self.source.accounts(&budget.id).await {
                Ok(accounts) => accounts,
                Err(e) => {
                    failures.push(FetchFailure {
                        scope: format!("accounts for budget '{}'", budget.name),
                        message: e.to_string(),
                    });
                    continue;
                }
            };

            for account in &accounts {
                match self
                    .account_row(&budget.id, account, year, year_start, year_end, rate)
                    .await
                {
                    Ok(row) => rows.push(row),
                    Err(e) => failures.push(FetchFailure {
                        scope: format!("transactions for account '{}'", account.name),
                        message: e.to_string(),
                    }),
                }
            }
        }

        Ok(YearlyReport {
            year,
            rows,
            failures,
        })
    }

    async fn account_row(
        &self,
        budget_id: &str,
        account: &Account,
        year: i32,
        year_start: NaiveDate,
        year_end: NaiveDate,
        rate: &ConversionRate,
    ) -> Result<ReportRow, CoreError> {
        let mut transactions: Vec<Transaction> = self
            .source
            .transactions(budget_id, &account.id, year_start)
            .await?
            .into_iter()
            .filter(Transaction::is_settled)
            .collect();

        // Newest first — the reconstruction's ordering invariant.
        transactions.sort_by(|a, b| b.date.cmp(&a.date));

        let row = match max_cleared_balance(account.cleared_balance, &transactions, year) {
            Some(max) => ReportRow::from_max_balance(&account.name, &max, rate),
            None => ReportRow::placeholder(&account.name, year_start, year_end),
        };
        Ok(row)
    }
}
