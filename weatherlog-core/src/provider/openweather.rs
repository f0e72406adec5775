use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::error::WeatherError;
use crate::model::{Coordinates, CurrentConditions, ForecastEntry};

use super::WeatherProvider;

const BASE_URL: &str = "https://api.openweathermap.org";

/// Client for the OpenWeather current-weather and 5-day forecast endpoints.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    http: Client,
    base_url: String,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, WeatherError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            api_key,
            http,
            base_url: BASE_URL.to_string(),
        })
    }

    /// Same client, pointed at an alternative base URL (test doubles).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn get_json(&self, path: &str, coords: Coordinates) -> Result<String, WeatherError> {
        let url = format!("{}{path}", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("lat", coords.latitude.to_string().as_str()),
                ("lon", coords.longitude.to_string().as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            tracing::warn!(%status, path, "OpenWeather request failed");
            return Err(WeatherError::Status { status, body: truncate_body(&body) });
        }

        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt_txt: String,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

fn condition_of(weather: &[OwWeather]) -> (String, String) {
    weather
        .first()
        .map(|w| (w.description.clone(), w.icon.clone()))
        .unwrap_or_else(|| ("Unknown".to_string(), String::new()))
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, coords: Coordinates) -> Result<CurrentConditions, WeatherError> {
        let body = self.get_json("/data/2.5/weather", coords).await?;

        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;
        let (condition, icon) = condition_of(&parsed.weather);

        Ok(CurrentConditions {
            city: parsed.name,
            temperature_c: parsed.main.temp,
            condition,
            icon,
            humidity_pct: parsed.main.humidity,
            wind_speed_mps: parsed.wind.speed,
        })
    }

    async fn forecast(&self, coords: Coordinates) -> Result<Vec<ForecastEntry>, WeatherError> {
        let body = self.get_json("/data/2.5/forecast", coords).await?;

        let parsed: OwForecastResponse = serde_json::from_str(&body)?;

        Ok(parsed
            .list
            .into_iter()
            .map(|e| {
                let (condition, icon) = condition_of(&e.weather);
                ForecastEntry {
                    timestamp: e.dt_txt,
                    temperature_c: e.main.temp,
                    condition,
                    icon,
                }
            })
            .collect())
    }
}

// Char-based so multibyte error bodies never split a code point.
fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        let head: String = body.chars().take(MAX).collect();
        format!("{head}...")
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_condition_entry_degrades_to_unknown() {
        let (condition, icon) = condition_of(&[]);
        assert_eq!(condition, "Unknown");
        assert!(icon.is_empty());
    }

    #[test]
    fn truncate_body_caps_long_bodies() {
        let long = "x".repeat(500);
        let truncated = truncate_body(&long);
        assert!(truncated.len() < long.len());
        assert!(truncated.ends_with("..."));
        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn truncate_body_keeps_multibyte_chars_whole() {
        let long = "日".repeat(300);
        let truncated = truncate_body(&long);
        assert_eq!(truncated.chars().count(), 203);
        assert!(truncated.ends_with("..."));
        assert!(truncated.trim_end_matches('.').chars().all(|c| c == '日'));
    }
}
