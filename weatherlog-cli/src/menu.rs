//! Interactive menu: live weather plus CRUD over stored records.
//!
//! Every resolver/provider/store failure is rendered as a message and the
//! loop continues; no failure terminates the process.

use anyhow::{Context, Result};
use chrono::Local;
use inquire::{Confirm, CustomType, DateSelect, InquireError, Select, Text};
use std::fmt;
use std::path::Path;

use weatherlog_core::model::{NewRecord, record_date_bounds};
use weatherlog_core::provider::provider_from_config;
use weatherlog_core::{
    Config, LocationResolver, RecordStore, WeatherProvider, export, forecast,
};

use crate::output;

/// How many reduced forecast days the live view shows.
const FORECAST_DAYS: usize = 5;

/// Default CSV export target, relative to the working directory.
const EXPORT_FILE: &str = "weather_data.csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    LiveWeather,
    CreateRecord,
    ReadRecords,
    UpdateRecord,
    DeleteRecord,
    Quit,
}

impl MenuAction {
    const fn all() -> [MenuAction; 6] {
        [
            MenuAction::LiveWeather,
            MenuAction::CreateRecord,
            MenuAction::ReadRecords,
            MenuAction::UpdateRecord,
            MenuAction::DeleteRecord,
            MenuAction::Quit,
        ]
    }
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MenuAction::LiveWeather => "Live weather",
            MenuAction::CreateRecord => "Create record",
            MenuAction::ReadRecords => "Read records",
            MenuAction::UpdateRecord => "Update record",
            MenuAction::DeleteRecord => "Delete record",
            MenuAction::Quit => "Quit",
        };
        f.write_str(label)
    }
}

/// Run the interactive menu until the user quits.
pub async fn run(config: Config) -> Result<()> {
    let store = RecordStore::open(&config.database_path)
        .await
        .context("Failed to open the record database")?;

    let resolver =
        LocationResolver::new(config.request_timeout).context("Failed to build HTTP client")?;

    println!(
        "weatherlog: enter a city, landmark, or coordinates (e.g. 28.6139,77.2090), \
         or leave blank to use your current location."
    );

    loop {
        let choice = prompt(Select::new("Menu:", MenuAction::all().to_vec()).prompt())?;

        match choice {
            Some(MenuAction::LiveWeather) => live_weather_action(&config, &resolver).await?,
            Some(MenuAction::CreateRecord) => create_record(&config, &resolver, &store).await?,
            Some(MenuAction::ReadRecords) => read_records(&store).await?,
            Some(MenuAction::UpdateRecord) => update_record(&store).await?,
            Some(MenuAction::DeleteRecord) => delete_record(&store).await?,
            Some(MenuAction::Quit) | None => return Ok(()),
        }
    }
}

/// One-shot live weather, shared by the `show` subcommand and the menu action.
pub async fn live_weather(config: &Config, input: &str) -> Result<()> {
    let resolver =
        LocationResolver::new(config.request_timeout).context("Failed to build HTTP client")?;

    fetch_and_render(config, &resolver, input).await;
    Ok(())
}

async fn live_weather_action(config: &Config, resolver: &LocationResolver) -> Result<()> {
    let input = prompt(
        Text::new("Enter location:")
            .with_help_message("leave blank to use your current position")
            .prompt(),
    )?;

    if let Some(input) = input {
        fetch_and_render(config, resolver, &input).await;
    }

    Ok(())
}

async fn fetch_and_render(config: &Config, resolver: &LocationResolver, input: &str) {
    let coords = match resolver.resolve(input).await {
        Ok(coords) => coords,
        Err(err) => {
            tracing::debug!(%err, "location resolution failed");
            println!("Could not find that location.");
            return;
        }
    };

    let provider = match provider_from_config(config) {
        Ok(provider) => provider,
        Err(err) => {
            tracing::warn!(%err, "weather provider unavailable");
            println!("Could not fetch weather data.");
            return;
        }
    };

    match provider.current(coords).await {
        Ok(current) => output::print_current(&current),
        Err(err) => {
            tracing::warn!(%err, "current-weather fetch failed");
            println!("Could not fetch weather data.");
            return;
        }
    }

    match provider.forecast(coords).await {
        Ok(entries) => output::print_forecast(&forecast::next_days(&entries, FORECAST_DAYS)),
        Err(err) => {
            tracing::warn!(%err, "forecast fetch failed");
            println!("Could not fetch weather data.");
        }
    }
}

async fn create_record(
    config: &Config,
    resolver: &LocationResolver,
    store: &RecordStore,
) -> Result<()> {
    let Some(location) = prompt(Text::new("Location:").prompt())? else {
        return Ok(());
    };

    if location.trim().is_empty() {
        println!("A location is required.");
        return Ok(());
    }

    let today = Local::now().date_naive();
    let (min_date, max_date) = record_date_bounds(today);

    let Some(date) = prompt(
        DateSelect::new("Date:")
            .with_default(today)
            .with_min_date(min_date)
            .with_max_date(max_date)
            .prompt(),
    )?
    else {
        return Ok(());
    };

    let coords = match resolver.resolve(&location).await {
        Ok(coords) => coords,
        Err(err) => {
            tracing::debug!(%err, "location resolution failed");
            println!("Could not find that location.");
            return Ok(());
        }
    };

    let current = match provider_from_config(config) {
        Ok(provider) => match provider.current(coords).await {
            Ok(current) => current,
            Err(err) => {
                tracing::warn!(%err, "current-weather fetch failed");
                println!("Could not fetch weather data.");
                return Ok(());
            }
        },
        Err(err) => {
            tracing::warn!(%err, "weather provider unavailable");
            println!("Could not fetch weather data.");
            return Ok(());
        }
    };

    let record = store
        .create(NewRecord {
            location: location.clone(),
            date,
            temperature_c: current.temperature_c,
            description: current.condition,
        })
        .await
        .context("Failed to save the record")?;

    println!("Record {} saved to the database.", record.id);
    Ok(())
}

async fn read_records(store: &RecordStore) -> Result<()> {
    let records = store.list().await.context("Failed to read records")?;

    if records.is_empty() {
        println!("No records found.");
        return Ok(());
    }

    output::print_records(&records);

    let export_now = prompt(
        Confirm::new(&format!("Export to {EXPORT_FILE}?")).with_default(false).prompt(),
    )?;

    if export_now == Some(true) {
        export::export_csv(&records, Path::new(EXPORT_FILE))?;
        println!("Data exported as {EXPORT_FILE}.");
    }

    Ok(())
}

async fn update_record(store: &RecordStore) -> Result<()> {
    let ids = store.ids().await.context("Failed to read records")?;

    if ids.is_empty() {
        println!("No records to update.");
        return Ok(());
    }

    let Some(id) = prompt(Select::new("Select ID to update:", ids).prompt())? else {
        return Ok(());
    };

    let Some(record) = store.get(id).await.context("Failed to read the record")? else {
        println!("Record {id} not found.");
        return Ok(());
    };

    let Some(temperature_c) = prompt(
        CustomType::<f64>::new("New temperature (°C):")
            .with_default(record.temperature_c)
            .with_error_message("Please enter a number")
            .prompt(),
    )?
    else {
        return Ok(());
    };

    let Some(description) = prompt(
        Text::new("New description:").with_initial_value(&record.description).prompt(),
    )?
    else {
        return Ok(());
    };

    match store
        .update(id, temperature_c, &description)
        .await
        .context("Failed to update the record")?
    {
        Some(_) => println!("Record {id} updated."),
        None => println!("Record {id} not found."),
    }

    Ok(())
}

async fn delete_record(store: &RecordStore) -> Result<()> {
    let ids = store.ids().await.context("Failed to read records")?;

    if ids.is_empty() {
        println!("No records to delete.");
        return Ok(());
    }

    let Some(id) = prompt(Select::new("Select ID to delete:", ids).prompt())? else {
        return Ok(());
    };

    let confirmed = prompt(
        Confirm::new(&format!("Delete record {id}?")).with_default(false).prompt(),
    )?;

    if confirmed != Some(true) {
        return Ok(());
    }

    if store.delete(id).await.context("Failed to delete the record")? {
        println!("Record {id} deleted.");
    } else {
        println!("Record {id} not found.");
    }

    Ok(())
}

/// Map a cancelled prompt (Esc / Ctrl-C) to `None` so the caller returns to
/// the menu; any other prompt failure is a terminal problem and propagates.
fn prompt<T>(result: Result<T, InquireError>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err.into()),
    }
}
