use chrono::{Datelike, NaiveDate};

use crate::models::max_balance::MaxBalance;
use crate::models::transaction::Transaction;
use crate::models::Milliunits;

/// Find the maximum balance an account reached during `year`, walking the
/// transaction history backward from the present-day cleared balance.
///
/// `current_balance` is the balance strictly after the newest transaction
/// in `transactions`, which **must** be sorted descending by date — the
/// caller establishes that invariant, this function trusts it. Undoing a
/// transaction (subtracting its signed amount from the running total)
/// yields the balance that held immediately before it.
///
/// The first in-year transaction encountered seeds the result with the
/// balance that held from that transaction through December 31. After
/// each in-year undo, a strictly greater running balance replaces the
/// result; the range then ends at that transaction's date and starts at
/// the next older transaction's date (January 1 when none exists).
///
/// Strict `>` is definitional: when several dates share the maximum, the
/// latest-dated occurrence wins and a plateau does not extend the range.
///
/// Pure function; returns `None` when no transaction falls within `year`
/// (or when `year` is outside chrono's calendar range).
pub fn max_cleared_balance(
    current_balance: Milliunits,
    transactions: &[Transaction],
    year: i32,
) -> Option<MaxBalance> {
    let year_start = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let year_end = NaiveDate::from_ymd_opt(year, 12, 31)?;

    let mut running = current_balance;
    let mut best: Option<MaxBalance> = None;

    for (idx, tx) in transactions.iter().enumerate() {
        let in_year = tx.date.year() == year;

        // The balance before undoing anything held from the last in-year
        // transaction through year-end.
        if in_year && best.is_none() {
            best = Some(MaxBalance {
                balance: running,
                start: tx.date,
                end: year_end,
            });
        }

        // Undo the transaction: balance that held before it occurred.
        running -= tx.amount;

        if in_year {
            if let Some(current_best) = &mut best {
                if running > current_best.balance {
                    let start = transactions
                        .get(idx + 1)
                        .map(|older| older.date)
                        .unwrap_or(year_start);
                    *current_best = MaxBalance {
                        balance: running,
                        start,
                        end: tx.date,
                    };
                }
            }
        }
    }

    best
}
