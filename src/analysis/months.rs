//! Calendar-month slices of a table, for the monthly detail charts.

use chrono::{Datelike, Month};

use crate::models::table::TimeTable;

/// Calendar order, used to drive the twelve monthly sub-charts.
pub const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Rows whose timestep falls in the given calendar month, across every
/// period and year. Empty tables come back unchanged.
pub fn split_by_month(table: &TimeTable, month: Month) -> TimeTable {
    if table.is_empty() {
        return table.clone();
    }
    let number = month.number_from_month();
    table.filter(|snapshot| snapshot.timestep.month() == number)
}
