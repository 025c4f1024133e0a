use chrono::NaiveDate;

use super::Milliunits;

/// The maximum balance an account reached during a target year, together
/// with the inclusive date span over which that balance held (no
/// transaction altered it within `[start, end]`).
///
/// Absence of a maximum (no transaction fell within the year) is a valid
/// outcome and is represented as `Option::None` by the reconstruction,
/// never through an error channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxBalance {
    /// Peak balance in milliunits
    pub balance: Milliunits,

    /// First day the balance held (inclusive)
    pub start: NaiveDate,

    /// Last day the balance held (inclusive)
    pub end: NaiveDate,
}
