//! Response shapes of the API and the row mappings that produce them.
//!
//! Key names are part of the wire contract.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::TemperatureStats;
use crate::db::{PrecipitationRow, StationRow, TemperatureRow};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct Precipitation {
    pub date: String,
    /// Inches, null when not recorded
    pub prcp: Option<f64>,
}

impl From<PrecipitationRow> for Precipitation {
    fn from((date, prcp): PrecipitationRow) -> Self {
        Self { date, prcp }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct Station {
    pub id: i64,
    /// Network station code, e.g. `USC00519397`
    pub station: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

impl From<StationRow> for Station {
    fn from((id, station, name, latitude, longitude, elevation): StationRow) -> Self {
        Self {
            id,
            station,
            name,
            latitude,
            longitude,
            elevation,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct TemperatureObservation {
    pub date: String,
    /// Degrees Fahrenheit
    pub tobs: f64,
}

impl From<TemperatureRow> for TemperatureObservation {
    fn from((date, tobs): TemperatureRow) -> Self {
        Self { date, tobs }
    }
}

/// Temperature aggregate, every field null when no measurement matched.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, ToSchema)]
pub struct TemperatureSummary {
    #[serde(rename = "TMIN")]
    pub min: Option<f64>,
    #[serde(rename = "TAVG")]
    pub avg: Option<f64>,
    #[serde(rename = "TMAX")]
    pub max: Option<f64>,
}

impl From<Option<TemperatureStats>> for TemperatureSummary {
    fn from(stats: Option<TemperatureStats>) -> Self {
        match stats {
            Some(TemperatureStats { min, avg, max }) => Self {
                min: Some(min),
                avg: Some(avg),
                max: Some(max),
            },
            None => Self {
                min: None,
                avg: None,
                max: None,
            },
        }
    }
}

/// Maps rows lazily, keeping the order the store returned them in.
pub fn project<R, T: From<R>>(rows: Vec<R>) -> impl Iterator<Item = T> {
    rows.into_iter().map(T::from)
}
