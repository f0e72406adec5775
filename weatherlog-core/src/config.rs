use anyhow::{Result, anyhow};
use directories::ProjectDirs;
use std::{env, path::PathBuf, time::Duration};

/// Environment variable holding the OpenWeather API key.
pub const API_KEY_VAR: &str = "OPENWEATHER_API_KEY";

/// Environment variable overriding the datastore path.
pub const DB_PATH_VAR: &str = "WEATHERLOG_DB";

/// Timeout applied to every outbound HTTP call, so a hung provider
/// cannot freeze the interface. A timed-out call is an ordinary fetch failure.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Runtime configuration, read from the process environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Weather provider credential. Absence is not a startup fault: every
    /// weather fetch simply fails with a user-visible message.
    pub api_key: Option<String>,

    /// Path of the SQLite database file.
    pub database_path: PathBuf,

    /// Per-request timeout for all HTTP clients.
    pub request_timeout: Duration,
}

impl Config {
    /// Read configuration from the environment.
    pub fn from_env() -> Result<Self> {
        Self::from_values(env::var(API_KEY_VAR).ok(), env::var(DB_PATH_VAR).ok())
    }

    /// Build a config from already-looked-up values. Split out of
    /// [`Config::from_env`] so tests never mutate the process environment.
    pub fn from_values(api_key: Option<String>, db_path: Option<String>) -> Result<Self> {
        let database_path = match db_path {
            Some(p) => PathBuf::from(p),
            None => Self::default_database_path()?,
        };

        Ok(Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            database_path,
            request_timeout: REQUEST_TIMEOUT,
        })
    }

    /// Default location of the database file, under the platform data directory.
    pub fn default_database_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherlog", "weatherlog")
            .ok_or_else(|| anyhow!("Could not determine platform data directory"))?;

        Ok(dirs.data_dir().join("weather.db"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_db_path_is_used() {
        let cfg = Config::from_values(Some("KEY".into()), Some("/tmp/wx.db".into())).unwrap();
        assert_eq!(cfg.database_path, PathBuf::from("/tmp/wx.db"));
        assert_eq!(cfg.api_key.as_deref(), Some("KEY"));
    }

    #[test]
    fn missing_api_key_is_not_an_error() {
        let cfg = Config::from_values(None, Some("/tmp/wx.db".into())).unwrap();
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let cfg = Config::from_values(Some("   ".into()), Some("/tmp/wx.db".into())).unwrap();
        assert!(cfg.api_key.is_none());
    }
}
