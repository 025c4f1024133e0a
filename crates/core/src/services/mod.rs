pub mod balance;
pub mod report;
