use async_trait::async_trait;
use std::fmt::Debug;

use crate::config::Config;
use crate::error::WeatherError;
use crate::model::{Coordinates, CurrentConditions, ForecastEntry};
use crate::provider::openweather::OpenWeatherProvider;

pub mod openweather;

/// A remote source of current conditions and multi-day forecasts.
///
/// Implementations perform exactly one network round trip per call; there is
/// no caching and no retry.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, coords: Coordinates) -> Result<CurrentConditions, WeatherError>;

    /// The raw forecast series in provider order, typically 5 days at
    /// 3-hour steps. See [`crate::forecast`] for the per-day reduction.
    async fn forecast(&self, coords: Coordinates) -> Result<Vec<ForecastEntry>, WeatherError>;
}

/// Construct the weather provider from config.
///
/// A missing API key is reported here, at fetch-construction time, so the
/// application itself still starts without one.
pub fn provider_from_config(config: &Config) -> Result<OpenWeatherProvider, WeatherError> {
    let api_key = config.api_key.as_deref().ok_or(WeatherError::MissingApiKey)?;

    OpenWeatherProvider::new(api_key.to_owned(), config.request_timeout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::from_values(None, Some("/tmp/wx.db".into())).unwrap();
        let err = provider_from_config(&cfg).unwrap_err();
        assert!(matches!(err, WeatherError::MissingApiKey));
    }

    #[test]
    fn provider_from_config_works_when_key_is_set() {
        let cfg = Config::from_values(Some("KEY".into()), Some("/tmp/wx.db".into())).unwrap();
        assert!(provider_from_config(&cfg).is_ok());
    }
}
