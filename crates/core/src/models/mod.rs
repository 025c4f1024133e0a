pub mod account;
pub mod budget;
pub mod max_balance;
pub mod report;
pub mod transaction;

/// Signed amount in milliunits, YNAB's minor currency unit (1/1000 of a
/// currency unit). All balance arithmetic stays in integer milliunits;
/// conversion to decimal display units happens only at presentation time.
pub type Milliunits = i64;
