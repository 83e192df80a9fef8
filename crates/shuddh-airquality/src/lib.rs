//! Air-quality data for Shuddh.
//!
//! - [`WaqiClient`]: current conditions (AQICN)
//! - [`OwmForecastClient`]: multi-day forecast (OpenWeatherMap)
//! - [`AirQualityService`]: the combined snapshot, degrading to mock data
//! - [`simulate_forecast`]: the randomized trend projection

pub mod error;
pub mod forecast;
pub mod owm;
pub mod service;
pub mod waqi;

pub use error::{AirQualityError, ForecastError};
pub use forecast::{simulate_forecast, ForecastInput, AQI_FLOOR};
pub use owm::{OwmForecastClient, FORECAST_DAYS};
pub use service::AirQualityService;
pub use waqi::{CurrentReading, WaqiClient};
