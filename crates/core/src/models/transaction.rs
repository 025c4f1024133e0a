use chrono::NaiveDate;
use serde::Deserialize;

use super::Milliunits;

/// Settlement status of a transaction, as reported by the YNAB API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClearedStatus {
    /// Confirmed against the real account
    Cleared,
    /// Confirmed and locked during account reconciliation
    Reconciled,
    /// Entered but not yet settled
    Uncleared,
}

/// A single account transaction: a dated, signed milliunit delta.
///
/// Only settled transactions (cleared or reconciled) participate in
/// balance reconstruction — an uncleared transaction has not affected
/// the cleared balance yet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Transaction {
    pub id: String,

    /// Date of the transaction (no time component — daily granularity)
    pub date: NaiveDate,

    /// Signed delta in milliunits (negative for outflows)
    pub amount: Milliunits,

    pub cleared: ClearedStatus,
}

impl Transaction {
    /// Whether this transaction has settled against the real account.
    pub fn is_settled(&self) -> bool {
        matches!(
            self.cleared,
            ClearedStatus::Cleared | ClearedStatus::Reconciled
        )
    }
}
