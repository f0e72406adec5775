//! Human-friendly output formatting for the terminal.

use weatherlog_core::forecast::DailyEntry;
use weatherlog_core::model::{CurrentConditions, WeatherRecord, icon_url};

pub fn print_current(current: &CurrentConditions) {
    println!();
    println!("Current weather in {}", current.city);
    println!("  Temperature: {:.1} °C", current.temperature_c);
    println!("  Condition:   {}", title_case(&current.condition));
    println!("  Humidity:    {} %", current.humidity_pct);
    println!("  Wind speed:  {:.1} m/s", current.wind_speed_mps);
    if !current.icon.is_empty() {
        println!("  Icon:        {}", icon_url(&current.icon));
    }
    println!();
}

pub fn print_forecast(days: &[DailyEntry]) {
    if days.is_empty() {
        return;
    }

    println!("{}-day forecast:", days.len());
    for day in days {
        println!(
            "  {}  {}, {:.1} °C",
            day.date,
            title_case(&day.entry.condition),
            day.entry.temperature_c
        );
    }
    println!();
}

pub fn print_records(records: &[WeatherRecord]) {
    println!();
    println!("{:>4}  {:<10}  {:<24}  {:>8}  {}", "ID", "Date", "Location", "Temp °C", "Description");

    for record in records {
        println!(
            "{:>4}  {:<10}  {:<24}  {:>8.1}  {}",
            record.id,
            record.date.format("%Y-%m-%d"),
            record.location,
            record.temperature_c,
            record.description,
        );
    }
    println!();
}

/// Uppercase the first letter of each whitespace-separated word, for display
/// only; stored descriptions keep the provider's original casing.
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
