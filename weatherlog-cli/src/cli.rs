use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use weatherlog_core::{Config, RecordStore, export};

use crate::menu;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherlog", version, about = "Weather lookup and record keeping")]
pub struct Cli {
    /// Override the database file path (also: WEATHERLOG_DB).
    #[arg(long, value_name = "PATH")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print live weather for a location once and exit.
    Show {
        /// City, landmark, or "lat,lon" pair; omit to use your current position.
        location: Option<String>,
    },

    /// Export all stored records to a CSV file and exit.
    Export {
        /// Output file; overwritten if it exists.
        #[arg(default_value = "weather_data.csv")]
        path: PathBuf,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::from_env()?;
        if let Some(db) = self.db {
            config.database_path = db;
        }

        match self.command {
            Some(Command::Show { location }) => {
                menu::live_weather(&config, location.as_deref().unwrap_or("")).await
            }
            Some(Command::Export { path }) => {
                let store = RecordStore::open(&config.database_path)
                    .await
                    .context("Failed to open the record database")?;

                let records = store.list().await.context("Failed to read records")?;
                export::export_csv(&records, &path)?;
                println!("Exported {} record(s) to {}", records.len(), path.display());
                Ok(())
            }
            None => menu::run(config).await,
        }
    }
}
