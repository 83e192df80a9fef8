//! Shared domain model for the Shuddh air-quality advisory service.
//!
//! Holds the wire types passed between the fetchers, the orchestrator and the
//! HTTP layer, the AQI category bands, the per-provider pollutant tables,
//! environment-driven configuration and the injectable randomness source.

pub mod aqi;
pub mod app_config;
pub mod config;
pub mod entropy;
pub mod pollutants;
pub mod types;

use thiserror::Error;

pub use aqi::{aqi_category, owm_level_to_aqi, AqiCategory};
pub use app_config::{AppConfig, Environment, ProviderKeys, RedditCredentials};
pub use config::{load_app_config, load_app_config_from_env};
pub use entropy::Entropy;
pub use pollutants::{map_pollutant, round2, PollutantSpec, OWM_POLLUTANTS, WAQI_POLLUTANTS};
pub use types::{
    format_forecast_date, AdvisoryLocation, AdvisoryResult, AdvisoryUser, AirQualitySnapshot,
    Coordinates, CurrentConditions, DailyForecast, NewsItem, NewsSource, Pollutant, Weather,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
