pub mod frankfurter;
pub mod traits;
pub mod ynab;
