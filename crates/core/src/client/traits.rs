use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::account::Account;
use crate::models::budget::Budget;
use crate::models::transaction::Transaction;

/// Trait abstraction over the budget backend.
///
/// The report service only ever talks to this trait: the real
/// `YnabClient` implements it against the HTTP API, and tests implement
/// it with in-memory fixtures. A configured client is passed in
/// explicitly wherever it is needed — there is no process-wide cached
/// instance.
#[async_trait]
pub trait BudgetDataSource: Send + Sync {
    /// All budgets visible to the authenticated user.
    async fn budgets(&self) -> Result<Vec<Budget>, CoreError>;

    /// All accounts belonging to a budget.
    async fn accounts(&self, budget_id: &str) -> Result<Vec<Account>, CoreError>;

    /// Transactions for one account, on or after `since_date`.
    /// No ordering is guaranteed; callers sort as they need.
    async fn transactions(
        &self,
        budget_id: &str,
        account_id: &str,
        since_date: NaiveDate,
    ) -> Result<Vec<Transaction>, CoreError>;
}
