use async_trait::async_trait;
use climate_core::is_file;
use log::{debug, info};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::time::Duration;

/// `(date, prcp)` from `measurement`, `prcp` is null when not recorded
pub type PrecipitationRow = (String, Option<f64>);

/// `(date, tobs)` from `measurement`
pub type TemperatureRow = (String, f64);

/// `(id, station, name, latitude, longitude, elevation)` from `station`
pub type StationRow = (i64, String, String, f64, f64, f64);

/// `(min, avg, max)` of `tobs` over a date range
pub type TemperatureStatsRow = (f64, f64, f64);

pub const MEASUREMENT_TABLE: &str = "measurement";
pub const STATION_TABLE: &str = "station";

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to query sqlite: {0}")]
    Query(#[from] sqlx::Error),
    #[error("Dataset not found: {0}")]
    DatasetNotFound(String),
}

/// Read-only access to the climate dataset.
///
/// Dates are ISO `YYYY-MM-DD` strings and every range is inclusive on both
/// ends, compared as text.
#[async_trait]
pub trait ClimateData: Sync + Send {
    async fn precipitation(&self) -> Result<Vec<PrecipitationRow>, Error>;
    async fn stations(&self) -> Result<Vec<StationRow>, Error>;
    async fn temperature_observations(
        &self,
        from: &str,
        to: &str,
    ) -> Result<Vec<TemperatureRow>, Error>;
    /// Most recent `date` across every station, `None` for an empty table
    async fn latest_date(&self) -> Result<Option<String>, Error>;
    /// `None` when no measurement falls inside the range
    async fn temperature_stats(
        &self,
        from: &str,
        to: &str,
    ) -> Result<Option<TemperatureStatsRow>, Error>;
    /// Check the store can still serve a connection.
    async fn health_check(&self) -> Result<(), Error>;
}

pub struct ClimateAccess {
    pool: SqlitePool,
}

impl ClimateAccess {
    /// Opens the dataset file read-only and checks both tables are present.
    pub async fn open(path: &str, max_connections: u32) -> Result<Self, Error> {
        if !is_file(path) {
            return Err(Error::DatasetNotFound(path.to_owned()));
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await?;

        let access = Self { pool };
        access.check_tables().await?;
        info!("climate dataset opened read-only: {}", path);

        Ok(access)
    }

    async fn check_tables(&self) -> Result<(), Error> {
        for table in [MEASUREMENT_TABLE, STATION_TABLE] {
            sqlx::query(&format!("SELECT 1 FROM {} LIMIT 1", table))
                .fetch_optional(&self.pool)
                .await?;
            debug!("found table {}", table);
        }
        Ok(())
    }
}

#[async_trait]
impl ClimateData for ClimateAccess {
    async fn precipitation(&self) -> Result<Vec<PrecipitationRow>, Error> {
        let rows = sqlx::query_as("SELECT date, prcp FROM measurement ORDER BY rowid")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn stations(&self) -> Result<Vec<StationRow>, Error> {
        let rows = sqlx::query_as(
            "SELECT id, station, name, latitude, longitude, elevation
             FROM station ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn temperature_observations(
        &self,
        from: &str,
        to: &str,
    ) -> Result<Vec<TemperatureRow>, Error> {
        let rows = sqlx::query_as(
            "SELECT date, tobs FROM measurement
             WHERE date >= ? AND date <= ?
             ORDER BY rowid",
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn latest_date(&self) -> Result<Option<String>, Error> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT date FROM measurement ORDER BY date DESC LIMIT 1")
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|(date,)| date))
    }

    async fn temperature_stats(
        &self,
        from: &str,
        to: &str,
    ) -> Result<Option<TemperatureStatsRow>, Error> {
        let (min, avg, max): (Option<f64>, Option<f64>, Option<f64>) = sqlx::query_as(
            "SELECT MIN(tobs), AVG(tobs), MAX(tobs) FROM measurement
             WHERE date >= ? AND date <= ?",
        )
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await?;

        // An aggregate over zero rows comes back as a single all-NULL row
        Ok(match (min, avg, max) {
            (Some(min), Some(avg), Some(max)) => Some((min, avg, max)),
            _ => None,
        })
    }

    async fn health_check(&self) -> Result<(), Error> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}
