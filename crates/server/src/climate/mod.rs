//! Query layer between the HTTP routes and the climate store.

pub mod aggregate;
pub mod projection;
pub mod window;

pub use aggregate::{aggregate, TemperatureStats};
pub use projection::{project, Precipitation, Station, TemperatureObservation, TemperatureSummary};
pub use window::{parse_date, resolve, trailing_year, DateWindow, TRAILING_WINDOW_DAYS};

use log::debug;
use std::sync::Arc;

use crate::db::{self, ClimateData};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Malformed date '{0}', expected YYYY-MM-DD")]
    MalformedDate(String),
    #[error("Stored date '{0}' is not a usable YYYY-MM-DD date")]
    InvalidStoredDate(String),
    #[error("Climate store unavailable: {0}")]
    StoreUnavailable(#[from] db::Error),
}

/// Stateless entry point for every query the API serves.
pub struct ClimateService {
    store: Arc<dyn ClimateData>,
}

impl ClimateService {
    pub fn new(store: Arc<dyn ClimateData>) -> Self {
        Self { store }
    }

    pub async fn precipitation(&self) -> Result<Vec<Precipitation>, Error> {
        let rows = self.store.precipitation().await?;
        Ok(project(rows).collect())
    }

    pub async fn stations(&self) -> Result<Vec<Station>, Error> {
        let rows = self.store.stations().await?;
        Ok(project(rows).collect())
    }

    /// Observations in the trailing-year window ending at the latest
    /// recorded date. Empty when nothing has been recorded.
    pub async fn recent_temperatures(&self) -> Result<Vec<TemperatureObservation>, Error> {
        let Some(latest) = self.store.latest_date().await? else {
            return Ok(vec![]);
        };
        let window = trailing_year(&latest)?;
        debug!("trailing window {} to {}", window.from, window.to);

        let rows = self
            .store
            .temperature_observations(&window.from, &window.to)
            .await?;
        Ok(project(rows).collect())
    }

    /// MIN/AVG/MAX temperature from `start` through `end`, or through the
    /// latest recorded date when `end` is absent.
    pub async fn temperature_summary(
        &self,
        start: &str,
        end: Option<&str>,
    ) -> Result<TemperatureSummary, Error> {
        let stats = match resolve(self.store.as_ref(), start, end).await? {
            Some(window) => aggregate(self.store.as_ref(), &window).await?,
            None => None,
        };
        Ok(stats.into())
    }

    pub async fn health_check(&self) -> Result<(), Error> {
        Ok(self.store.health_check().await?)
    }
}
