use chrono::NaiveDate;
use shuddh_core::{
    format_forecast_date, AirQualitySnapshot, AppConfig, Coordinates, CurrentConditions, Entropy,
    Weather,
};

use crate::error::AirQualityError;
use crate::owm::{OwmForecastClient, FORECAST_DAYS};
use crate::waqi::WaqiClient;

/// Combines current conditions and the official forecast for one location.
pub struct AirQualityService {
    current: WaqiClient,
    forecast: OwmForecastClient,
}

impl AirQualityService {
    #[must_use]
    pub fn new(current: WaqiClient, forecast: OwmForecastClient) -> Self {
        Self { current, forecast }
    }

    /// Production clients keyed and timed out per `config`.
    ///
    /// # Errors
    ///
    /// Returns [`AirQualityError::Http`] if an HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, AirQualityError> {
        let current = WaqiClient::new(config.keys.aqicn.clone(), config.http_timeout_secs)?
            .with_demo_mode(config.demo_mode);
        let forecast =
            OwmForecastClient::new(config.keys.openweathermap.clone(), config.http_timeout_secs)?
                .with_demo_mode(config.demo_mode);
        Ok(Self::new(current, forecast))
    }

    /// `(current, forecast)` configuration state, for health reporting.
    #[must_use]
    pub fn configured_sources(&self) -> [(&'static str, bool); 2] {
        [
            ("aqicn", self.current.is_configured()),
            ("openweathermap", self.forecast.is_configured()),
        ]
    }

    /// Fetches both sources concurrently; failures degrade to mock data, so this never fails.
    ///
    /// `today` is dropped from the forecast, leaving at most five future days.
    /// `current` is `None` only when the provider reported no reading at all.
    pub async fn snapshot(
        &self,
        coords: Coordinates,
        today: NaiveDate,
        entropy: &mut Entropy,
    ) -> AirQualitySnapshot {
        let mut current_entropy = entropy.fork();
        let mut forecast_entropy = entropy.fork();

        let (reading, forecast) = tokio::join!(
            self.current.current_or_mock(coords, &mut current_entropy),
            self.forecast
                .forecast_or_mock(coords, today, &mut forecast_entropy),
        );

        let today_label = format_forecast_date(today);
        let forecast: Vec<_> = forecast
            .into_iter()
            .filter(|day| day.date != today_label)
            .take(FORECAST_DAYS)
            .collect();

        let weather = synthesize_weather(entropy);
        let current = reading
            .map(|reading| CurrentConditions::new(reading.aqi, reading.pollutants, weather));

        tracing::debug!(
            has_current = current.is_some(),
            forecast_days = forecast.len(),
            "air quality snapshot assembled"
        );

        AirQualitySnapshot { current, forecast }
    }
}

/// No weather provider is queried; conditions are drawn from `entropy`.
fn synthesize_weather(entropy: &mut Entropy) -> Weather {
    Weather {
        temp: f64::from(entropy.int_inclusive(15, 34)),
        humidity: f64::from(entropy.int_inclusive(40, 89)),
        wind: f64::from(entropy.int_inclusive(5, 19)),
    }
}
