use serde::Deserialize;

use super::Milliunits;

/// A single account within a YNAB budget.
///
/// `cleared_balance` is the balance strictly *after* the most recent
/// cleared transaction — the anchor from which historical balances are
/// reconstructed by undoing transactions backward in time.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub cleared_balance: Milliunits,

    /// Closed accounts are still reported; the flag is kept for display.
    #[serde(default)]
    pub closed: bool,
}
