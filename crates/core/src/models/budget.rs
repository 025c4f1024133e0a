use serde::Deserialize;

/// A YNAB budget. Accounts and transactions are always addressed
/// relative to a budget id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Budget {
    pub id: String,
    pub name: String,
}
