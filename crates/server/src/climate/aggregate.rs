//! MIN/AVG/MAX of temperature observations over a date window.

use super::{DateWindow, Error};
use crate::db::ClimateData;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureStats {
    pub min: f64,
    pub avg: f64,
    pub max: f64,
}

impl From<(f64, f64, f64)> for TemperatureStats {
    fn from((min, avg, max): (f64, f64, f64)) -> Self {
        Self { min, avg, max }
    }
}

/// Aggregates `tobs` over every measurement with `from <= date <= to`.
///
/// `None` when nothing matched. The three values always come from the same
/// filtered set.
pub async fn aggregate(
    store: &dyn ClimateData,
    window: &DateWindow,
) -> Result<Option<TemperatureStats>, Error> {
    let stats = store.temperature_stats(&window.from, &window.to).await?;
    Ok(stats.map(TemperatureStats::from))
}
