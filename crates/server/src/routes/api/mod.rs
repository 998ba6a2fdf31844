pub mod climate_routes;
pub mod error;
pub mod health;

pub use climate_routes::*;
pub use error::*;
pub use health::*;
