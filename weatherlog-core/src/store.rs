//! SQLite-backed persistence for weather records.
//!
//! One pool is opened per process and reused; operations are serialized by
//! the single-threaded UI loop, so no transaction isolation concerns arise.
//! The `AUTOINCREMENT` primary key guarantees an id is never reused, even
//! after the row it identified has been deleted.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::{fs, path::Path};

use crate::model::{NewRecord, WeatherRecord};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS weather_records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    location TEXT NOT NULL,
    date TEXT NOT NULL,
    temperature REAL NOT NULL,
    description TEXT NOT NULL
)";

/// CRUD store for [`WeatherRecord`] rows.
#[derive(Debug, Clone)]
pub struct RecordStore {
    pool: SqlitePool,
}

impl RecordStore {
    /// Open (creating if missing) the database file and apply the schema.
    pub async fn open(path: &Path) -> Result<Self, sqlx::Error> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(sqlx::Error::Io)?;
        }

        let options = SqliteConnectOptions::new().filename(path).create_if_missing(true);

        Self::connect(options).await
    }

    /// In-memory store, used by tests.
    pub async fn open_in_memory() -> Result<Self, sqlx::Error> {
        Self::connect(SqliteConnectOptions::new().in_memory(true)).await
    }

    async fn connect(options: SqliteConnectOptions) -> Result<Self, sqlx::Error> {
        // A single connection, kept alive for the process lifetime. More
        // would be pointless for one interactive session, and an in-memory
        // database does not survive its connection anyway.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        sqlx::query(SCHEMA).execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Persist a new record, returning it with its freshly assigned id.
    pub async fn create(&self, record: NewRecord) -> Result<WeatherRecord, sqlx::Error> {
        sqlx::query_as::<_, WeatherRecord>(
            "INSERT INTO weather_records (location, date, temperature, description)
             VALUES (?, ?, ?, ?)
             RETURNING id, location, date, temperature, description",
        )
        .bind(&record.location)
        .bind(record.date)
        .bind(record.temperature_c)
        .bind(&record.description)
        .fetch_one(&self.pool)
        .await
    }

    /// Every persisted record, in storage-native (insertion) order.
    pub async fn list(&self) -> Result<Vec<WeatherRecord>, sqlx::Error> {
        sqlx::query_as::<_, WeatherRecord>(
            "SELECT id, location, date, temperature, description FROM weather_records ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
    }

    /// A single record by id, or `None` if it does not exist.
    pub async fn get(&self, id: i64) -> Result<Option<WeatherRecord>, sqlx::Error> {
        sqlx::query_as::<_, WeatherRecord>(
            "SELECT id, location, date, temperature, description FROM weather_records WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Overwrite temperature and description in place. `location` and `date`
    /// are immutable after creation. Returns `None` when the id is unknown.
    pub async fn update(
        &self,
        id: i64,
        temperature_c: f64,
        description: &str,
    ) -> Result<Option<WeatherRecord>, sqlx::Error> {
        sqlx::query_as::<_, WeatherRecord>(
            "UPDATE weather_records SET temperature = ?, description = ?
             WHERE id = ?
             RETURNING id, location, date, temperature, description",
        )
        .bind(temperature_c)
        .bind(description)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Remove a record by id. Returns `false` when the id is unknown, and the
    /// store is left unchanged.
    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM weather_records WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Ids of all persisted records, for selection prompts.
    pub async fn ids(&self) -> Result<Vec<i64>, sqlx::Error> {
        sqlx::query_scalar("SELECT id FROM weather_records ORDER BY id")
            .fetch_all(&self.pool)
            .await
    }
}
