// ═══════════════════════════════════════════════════════════════════
// Report service — orchestration over a mock data source
// ═══════════════════════════════════════════════════════════════════

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::NaiveDate;

use ynab_peak_core::models::account::Account;
use ynab_peak_core::models::budget::Budget;
use ynab_peak_core::models::transaction::{ClearedStatus, Transaction};
use ynab_peak_core::models::report::milliunits_to_major;
use ynab_peak_core::models::Milliunits;
use ynab_peak_core::{BudgetDataSource, ConversionRate, CoreError, ReportService};

fn make_date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn tx(
    y: i32,
    m: u32,
    d: u32,
    amount: Milliunits,
    cleared: ClearedStatus,
) -> Transaction {
    Transaction {
        id: format!("t-{y}-{m}-{d}-{amount}"),
        date: make_date(y, m, d),
        amount,
        cleared,
    }
}

fn account(id: &str, name: &str, cleared_balance: Milliunits) -> Account {
    Account {
        id: id.to_string(),
        name: name.to_string(),
        cleared_balance,
        closed: false,
    }
}

/// In-memory data source with per-resource failure injection.
#[derive(Default)]
struct MockSource {
    budgets: Vec<Budget>,
    accounts: HashMap<String, Vec<Account>>,
    transactions: HashMap<(String, String), Vec<Transaction>>,
    fail_budgets: bool,
    fail_accounts_for: HashSet<String>,
    fail_transactions_for: HashSet<String>,
}

impl MockSource {
    fn with_budget(mut self, id: &str, name: &str) -> Self {
        self.budgets.push(Budget {
            id: id.to_string(),
            name: name.to_string(),
        });
        self
    }

    fn with_account(mut self, budget_id: &str, account: Account) -> Self {
        self.accounts
            .entry(budget_id.to_string())
            .or_default()
            .push(account);
        self
    }

    fn with_transactions(
        mut self,
        budget_id: &str,
        account_id: &str,
        txs: Vec<Transaction>,
    ) -> Self {
        self.transactions
            .insert((budget_id.to_string(), account_id.to_string()), txs);
        self
    }
}

#[async_trait]
impl BudgetDataSource for MockSource {
    async fn budgets(&self) -> Result<Vec<Budget>, CoreError> {
        if self.fail_budgets {
            return Err(CoreError::Network("connection refused".to_string()));
        }
        Ok(self.budgets.clone())
    }

    async fn accounts(&self, budget_id: &str) -> Result<Vec<Account>, CoreError> {
        if self.fail_accounts_for.contains(budget_id) {
            return Err(CoreError::Api {
                resource: "accounts".to_string(),
                message: "YNAB API returned HTTP 503".to_string(),
            });
        }
        Ok(self.accounts.get(budget_id).cloned().unwrap_or_default())
    }

    async fn transactions(
        &self,
        budget_id: &str,
        account_id: &str,
        _since_date: NaiveDate,
    ) -> Result<Vec<Transaction>, CoreError> {
        if self.fail_transactions_for.contains(account_id) {
            return Err(CoreError::Network("timed out".to_string()));
        }
        Ok(self
            .transactions
            .get(&(budget_id.to_string(), account_id.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}

fn eur_usd_rate() -> ConversionRate {
    // 1 USD = 0.80 EUR
    ConversionRate::new("EUR", "USD", 0.8).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
// Happy path
// ═══════════════════════════════════════════════════════════════════

mod happy_path {
    use super::*;

    #[tokio::test]
    async fn converts_balances_and_keeps_api_order() {
        let source = MockSource::default()
            .with_budget("b1", "Household")
            .with_account("b1", account("a1", "Checking", 1_000_000))
            .with_account("b1", account("a2", "Savings", 2_500_000))
            .with_transactions(
                "b1",
                "a1",
                vec![tx(2024, 6, 1, 200_000, ClearedStatus::Cleared)],
            )
            .with_transactions(
                "b1",
                "a2",
                vec![tx(2024, 3, 1, -500_000, ClearedStatus::Reconciled)],
            );

        let report = ReportService::new(source)
            .yearly_report(2024, &eur_usd_rate())
            .await
            .unwrap();

        assert_eq!(report.year, 2024);
        assert!(report.failures.is_empty());
        assert_eq!(report.rows.len(), 2);

        let checking = &report.rows[0];
        assert_eq!(checking.account_name, "Checking");
        assert_eq!(checking.balance_base, 1000.0);
        assert_eq!(checking.balance_quote, 1250.0);
        assert_eq!(checking.start, make_date(2024, 6, 1));
        assert_eq!(checking.end, make_date(2024, 12, 31));

        let savings = &report.rows[1];
        assert_eq!(savings.account_name, "Savings");
        // Undoing the -500 outflow: 2500 + 500 = 3000 before it.
        assert_eq!(savings.balance_base, 3000.0);
        assert_eq!(savings.balance_quote, 3750.0);
        assert_eq!(savings.start, make_date(2024, 1, 1));
        assert_eq!(savings.end, make_date(2024, 3, 1));
    }

    #[tokio::test]
    async fn accounts_across_budgets_are_flattened_in_order() {
        let source = MockSource::default()
            .with_budget("b1", "Household")
            .with_budget("b2", "Business")
            .with_account("b1", account("a1", "Checking", 0))
            .with_account("b2", account("a2", "Invoices", 0));

        let report = ReportService::new(source)
            .yearly_report(2024, &eur_usd_rate())
            .await
            .unwrap();

        let names: Vec<&str> = report
            .rows
            .iter()
            .map(|r| r.account_name.as_str())
            .collect();
        assert_eq!(names, vec!["Checking", "Invoices"]);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Transaction handling
// ═══════════════════════════════════════════════════════════════════

mod transaction_handling {
    use super::*;

    #[tokio::test]
    async fn uncleared_transactions_are_ignored() {
        // The huge uncleared inflow would dominate the result if counted.
        let source = MockSource::default()
            .with_budget("b1", "Household")
            .with_account("b1", account("a1", "Checking", 1_000_000))
            .with_transactions(
                "b1",
                "a1",
                vec![
                    tx(2024, 8, 1, 99_000_000, ClearedStatus::Uncleared),
                    tx(2024, 6, 1, 200_000, ClearedStatus::Cleared),
                ],
            );

        let report = ReportService::new(source)
            .yearly_report(2024, &eur_usd_rate())
            .await
            .unwrap();

        assert_eq!(report.rows[0].balance_base, 1000.0);
        assert_eq!(report.rows[0].start, make_date(2024, 6, 1));
    }

    #[tokio::test]
    async fn unsorted_api_input_is_handled() {
        // Same fixture as the two-transaction walk, delivered oldest first.
        let source = MockSource::default()
            .with_budget("b1", "Household")
            .with_account("b1", account("a1", "Checking", 1_000))
            .with_transactions(
                "b1",
                "a1",
                vec![
                    tx(2024, 2, 20, 300, ClearedStatus::Cleared),
                    tx(2024, 9, 10, 500, ClearedStatus::Cleared),
                    tx(2024, 5, 2, -700, ClearedStatus::Cleared),
                ],
            );

        let report = ReportService::new(source)
            .yearly_report(2024, &eur_usd_rate())
            .await
            .unwrap();

        let row = &report.rows[0];
        assert_eq!(row.balance_base, 1.2);
        assert_eq!(row.start, make_date(2024, 2, 20));
        assert_eq!(row.end, make_date(2024, 5, 2));
    }

    #[tokio::test]
    async fn account_without_activity_gets_zero_placeholder_row() {
        let source = MockSource::default()
            .with_budget("b1", "Household")
            .with_account("b1", account("a1", "Dormant", 5_000_000));

        let report = ReportService::new(source)
            .yearly_report(2024, &eur_usd_rate())
            .await
            .unwrap();

        let row = &report.rows[0];
        assert_eq!(row.balance_base, 0.0);
        assert_eq!(row.balance_quote, 0.0);
        assert_eq!(row.start, make_date(2024, 1, 1));
        assert_eq!(row.end, make_date(2024, 12, 31));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Rounding — amounts that are not exact at 2 decimal places
// ═══════════════════════════════════════════════════════════════════

mod rounding {
    use super::*;

    #[test]
    fn milliunits_round_to_two_decimals() {
        assert_eq!(milliunits_to_major(1_234_567), 1234.57);
        assert_eq!(milliunits_to_major(-1_234_567), -1234.57);
        assert_eq!(milliunits_to_major(1_001), 1.0);
        assert_eq!(milliunits_to_major(9), 0.01);
    }

    #[test]
    fn conversion_rounds_repeating_quotients() {
        // 1234.57 / 3 = 411.5233... → 411.52
        let rate = ConversionRate::new("EUR", "CHF", 3.0).unwrap();
        assert_eq!(rate.convert(1234.57), 411.52);
    }

    #[tokio::test]
    async fn report_rows_carry_rounded_amounts() {
        // 1_234_567 milliunits is 1234.567, which must show as 1234.57;
        // dividing by 3 then yields a repeating quotient.
        let source = MockSource::default()
            .with_budget("b1", "Household")
            .with_account("b1", account("a1", "Checking", 1_234_567))
            .with_transactions(
                "b1",
                "a1",
                vec![tx(2024, 6, 1, 1_000, ClearedStatus::Cleared)],
            );

        let rate = ConversionRate::new("EUR", "CHF", 3.0).unwrap();
        let report = ReportService::new(source)
            .yearly_report(2024, &rate)
            .await
            .unwrap();

        let row = &report.rows[0];
        assert_eq!(row.balance_base, 1234.57);
        assert_eq!(row.balance_quote, 411.52);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Failure isolation
// ═══════════════════════════════════════════════════════════════════

mod failure_isolation {
    use super::*;

    #[tokio::test]
    async fn budgets_failure_is_fatal() {
        let source = MockSource {
            fail_budgets: true,
            ..MockSource::default()
        };

        let result = ReportService::new(source)
            .yearly_report(2024, &eur_usd_rate())
            .await;
        assert!(matches!(result, Err(CoreError::Network(_))));
    }

    #[tokio::test]
    async fn accounts_failure_skips_budget_and_records_it() {
        let mut source = MockSource::default()
            .with_budget("b1", "Broken")
            .with_budget("b2", "Business")
            .with_account("b2", account("a2", "Invoices", 0));
        source.fail_accounts_for.insert("b1".to_string());

        let report = ReportService::new(source)
            .yearly_report(2024, &eur_usd_rate())
            .await
            .unwrap();

        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].account_name, "Invoices");
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].scope.contains("Broken"));
    }

    #[tokio::test]
    async fn transactions_failure_skips_account_and_records_it() {
        let mut source = MockSource::default()
            .with_budget("b1", "Household")
            .with_account("b1", account("a1", "Flaky", 100))
            .with_account("b1", account("a2", "Savings", 200))
            .with_transactions(
                "b1",
                "a2",
                vec![tx(2024, 4, 1, 50, ClearedStatus::Cleared)],
            );
        source.fail_transactions_for.insert("a1".to_string());

        let report = ReportService::new(source)
            .yearly_report(2024, &eur_usd_rate())
            .await
            .unwrap();

        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].account_name, "Savings");
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].scope.contains("Flaky"));
        assert!(report.failures[0].message.contains("timed out"));
    }
}
