use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A resolved geographic position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Current conditions at a location, already reduced to the fields the UI shows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub city: String,
    pub temperature_c: f64,
    pub condition: String,
    pub icon: String,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
}

/// One time-stamped snapshot within a multi-day forecast series.
///
/// `timestamp` keeps the provider's `"YYYY-MM-DD HH:MM:SS"` form; the daily
/// reducer keys on the date part before the first space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub timestamp: String,
    pub temperature_c: f64,
    pub condition: String,
    pub icon: String,
}

/// A persisted weather observation.
///
/// `id` is assigned by the store on creation and never reused, even after
/// deletion. `location` and `date` are immutable once created; updates touch
/// only `temperature_c` and `description`.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct WeatherRecord {
    pub id: i64,
    pub location: String,
    pub date: NaiveDate,
    #[sqlx(rename = "temperature")]
    pub temperature_c: f64,
    pub description: String,
}

/// Fields of a record before the store has assigned an id.
#[derive(Debug, Clone)]
pub struct NewRecord {
    pub location: String,
    pub date: NaiveDate,
    pub temperature_c: f64,
    pub description: String,
}

/// URL of the provider's icon image for a condition icon code.
pub fn icon_url(icon: &str) -> String {
    format!("https://openweathermap.org/img/wn/{icon}@2x.png")
}

/// Inclusive date bounds accepted for a new record: a fixed epoch up to today.
pub fn record_date_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let epoch = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or(NaiveDate::MIN);
    (epoch, today)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_url_embeds_code() {
        assert_eq!(icon_url("10d"), "https://openweathermap.org/img/wn/10d@2x.png");
    }

    #[test]
    fn record_date_bounds_run_from_epoch_to_today() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let (min, max) = record_date_bounds(today);
        assert_eq!(min, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(max, today);
    }
}
