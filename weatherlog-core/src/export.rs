//! CSV export of persisted records.
//!
//! Each export writes the whole file from scratch; repeated exports
//! overwrite, never append.

use anyhow::{Context, Result};
use std::borrow::Cow;
use std::fs;
use std::path::Path;

use crate::model::WeatherRecord;

const CSV_HEADER: &str = "id,location,date,temperature,description";

/// Serialize all records to a CSV file at `path`, overwriting it.
pub fn export_csv(records: &[WeatherRecord], path: &Path) -> Result<()> {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');

    for record in records {
        out.push_str(&csv_row(record));
        out.push('\n');
    }

    fs::write(path, out)
        .with_context(|| format!("Failed to write CSV export to {}", path.display()))
}

fn csv_row(record: &WeatherRecord) -> String {
    format!(
        "{},{},{},{},{}",
        record.id,
        csv_field(&record.location),
        record.date.format("%Y-%m-%d"),
        record.temperature_c,
        csv_field(&record.description),
    )
}

/// Quote a field when it contains a delimiter, quote, or newline;
/// embedded quotes are doubled.
fn csv_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
