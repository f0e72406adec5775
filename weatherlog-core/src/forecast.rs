//! Per-day reduction of a forecast time series.
//!
//! The provider returns one entry per 3-hour step. The UI wants one
//! representative entry per calendar day: the first entry encountered for
//! that date, in the order the provider sent them. No re-sorting happens,
//! so "next N days" relies on the provider returning chronological order.

use crate::model::ForecastEntry;

/// One reduced forecast day: the date key and its first entry.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyEntry {
    pub date: String,
    pub entry: ForecastEntry,
}

/// Collapse a forecast series to the first entry per calendar date,
/// preserving the encounter order of first appearances.
pub fn reduce_daily(entries: &[ForecastEntry]) -> Vec<DailyEntry> {
    let mut days: Vec<DailyEntry> = Vec::new();

    for entry in entries {
        let date = date_part(&entry.timestamp);

        if days.iter().any(|d| d.date == date) {
            continue;
        }

        days.push(DailyEntry { date: date.to_string(), entry: entry.clone() });
    }

    days
}

/// The first `n` reduced days, in insertion order.
pub fn next_days(entries: &[ForecastEntry], n: usize) -> Vec<DailyEntry> {
    let mut days = reduce_daily(entries);
    days.truncate(n);
    days
}

/// Date portion of a `"YYYY-MM-DD HH:MM:SS"` timestamp; the whole string
/// when there is no time component.
fn date_part(timestamp: &str) -> &str {
    timestamp.split(' ').next().unwrap_or(timestamp)
}
