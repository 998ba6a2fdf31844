pub mod climate;
pub mod db;
mod routes;
mod startup;
pub mod templates;
mod utils;

pub use climate::{
    ClimateService, DateWindow, Precipitation, Station, TemperatureObservation,
    TemperatureStats, TemperatureSummary,
};
pub use db::{ClimateAccess, ClimateData};
pub use routes::*;
pub use startup::*;
pub use utils::*;
