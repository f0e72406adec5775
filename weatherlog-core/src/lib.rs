//! Core library for the `weatherlog` app.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Location resolution (coordinate pairs, geocoding, IP fallback)
//! - The weather provider client and forecast reduction
//! - The persisted weather-record store and CSV export
//!
//! It is used by `weatherlog-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod export;
pub mod forecast;
pub mod location;
pub mod model;
pub mod provider;
pub mod store;

pub use config::Config;
pub use error::{ResolveError, WeatherError};
pub use forecast::{DailyEntry, next_days, reduce_daily};
pub use location::LocationResolver;
pub use model::{Coordinates, CurrentConditions, ForecastEntry, NewRecord, WeatherRecord};
pub use provider::{WeatherProvider, provider_from_config};
pub use store::RecordStore;
