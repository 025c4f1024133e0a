use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::account::Account;
use crate::models::budget::Budget;
use crate::models::transaction::Transaction;

use super::traits::BudgetDataSource;

const BASE_URL: &str = "https://api.ynab.com/v1";

/// YNAB REST API client.
///
/// - **Auth**: personal access token, sent as a bearer header.
/// - **Endpoints**: `/budgets`, `/budgets/{id}/accounts`,
///   `/budgets/{id}/accounts/{id}/transactions?since_date=...`
/// - **Envelope**: every response wraps its payload in `{"data": {...}}`.
///
/// Amounts are milliunits throughout; dates are ISO `YYYY-MM-DD`.
pub struct YnabClient {
    client: Client,
    token: String,
    base_url: String,
}

impl YnabClient {
    pub fn new(token: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            token: token.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the client at a different base URL (mock servers in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        query: &[(&str, String)],
        resource: &str,
    ) -> Result<T, CoreError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoreError::Api {
                resource: resource.to_string(),
                message: format!("YNAB API returned HTTP {status}"),
            });
        }

        response.json().await.map_err(|e| CoreError::Api {
            resource: resource.to_string(),
            message: format!("Failed to parse response: {e}"),
        })
    }
}

// ── YNAB API response envelopes ─────────────────────────────────────

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct BudgetsData {
    budgets: Vec<Budget>,
}

#[derive(Deserialize)]
struct AccountsData {
    accounts: Vec<Account>,
}

#[derive(Deserialize)]
struct TransactionsData {
    transactions: Vec<Transaction>,
}

#[async_trait]
impl BudgetDataSource for YnabClient {
    async fn budgets(&self) -> Result<Vec<Budget>, CoreError> {
        let url = format!("{}/budgets", self.base_url);
        let resp: Envelope<BudgetsData> = self.get_json(&url, &[], "budgets").await?;
        Ok(resp.data.budgets)
    }

    async fn accounts(&self, budget_id: &str) -> Result<Vec<Account>, CoreError> {
        let url = format!("{}/budgets/{budget_id}/accounts", self.base_url);
        let resp: Envelope<AccountsData> = self.get_json(&url, &[], "accounts").await?;
        Ok(resp.data.accounts)
    }

    async fn transactions(
        &self,
        budget_id: &str,
        account_id: &str,
        since_date: NaiveDate,
    ) -> Result<Vec<Transaction>, CoreError> {
        let url = format!(
            "{}/budgets/{budget_id}/accounts/{account_id}/transactions",
            self.base_url
        );
        let query = [("since_date", since_date.format("%Y-%m-%d").to_string())];
        let resp: Envelope<TransactionsData> =
            self.get_json(&url, &query, "transactions").await?;
        Ok(resp.data.transactions)
    }
}
