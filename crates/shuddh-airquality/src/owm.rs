//! Multi-day pollution forecast from the OpenWeatherMap air-pollution API.
//!
//! The API returns hourly samples with a categorical AQI level (1–5) and
//! component concentrations. Samples are bucketed by UTC calendar day and
//! averaged into one [`DailyForecast`] per day.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use chrono::{DateTime, Days, NaiveDate};
use reqwest::Client;
use serde::Deserialize;
use shuddh_core::{
    format_forecast_date, map_pollutant, owm_level_to_aqi, round2, Coordinates, DailyForecast,
    Entropy, OWM_POLLUTANTS,
};

use crate::error::AirQualityError;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
const PROVIDER: &str = "OpenWeatherMap";

/// Upper bound on days returned by the fetcher and the mock.
pub const FORECAST_DAYS: usize = 5;

pub struct OwmForecastClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    demo_mode: bool,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    list: Vec<Sample>,
}

#[derive(Debug, Deserialize)]
struct Sample {
    dt: i64,
    main: SampleMain,
    #[serde(default)]
    components: HashMap<String, f64>,
}

#[derive(Debug, Deserialize)]
struct SampleMain {
    aqi: u8,
}

#[derive(Default)]
struct DayBucket {
    aqi_sum: u32,
    samples: u32,
    /// Indexed like [`OWM_POLLUTANTS`]: (sum, count).
    components: [(f64, u32); OWM_POLLUTANTS.len()],
}

impl OwmForecastClient {
    /// # Errors
    ///
    /// Returns [`AirQualityError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(api_key: Option<String>, timeout_secs: u64) -> Result<Self, AirQualityError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`AirQualityError::Http`] if the `reqwest::Client` cannot be built.
    pub fn with_base_url(
        api_key: Option<String>,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, AirQualityError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_owned(),
            demo_mode: false,
        })
    }

    #[must_use]
    pub fn with_demo_mode(mut self, demo_mode: bool) -> Self {
        self.demo_mode = demo_mode;
        self
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() && !self.demo_mode
    }

    /// Daily averages, ascending by date, at most [`FORECAST_DAYS`] entries.
    /// The first entry is usually today.
    ///
    /// # Errors
    ///
    /// Not configured, transport, non-2xx, or an unexpected body shape.
    pub async fn fetch_forecast(
        &self,
        coords: Coordinates,
    ) -> Result<Vec<DailyForecast>, AirQualityError> {
        let key = match (&self.api_key, self.demo_mode) {
            (Some(key), false) => key,
            _ => return Err(AirQualityError::NotConfigured(PROVIDER)),
        };

        let url = format!("{}/data/2.5/air_pollution/forecast", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
                ("appid", key.clone()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AirQualityError::Status {
                provider: PROVIDER,
                status: status.as_u16(),
            });
        }

        let body: serde_json::Value = response.json().await?;
        let parsed: ForecastResponse =
            serde_json::from_value(body).map_err(|source| AirQualityError::Deserialize {
                context: "owm air_pollution/forecast".to_string(),
                source,
            })?;

        Ok(aggregate_daily(&parsed.list))
    }

    /// [`Self::fetch_forecast`], degrading to [`FORECAST_DAYS`] synthetic days after `today`.
    pub async fn forecast_or_mock(
        &self,
        coords: Coordinates,
        today: NaiveDate,
        entropy: &mut Entropy,
    ) -> Vec<DailyForecast> {
        match self.fetch_forecast(coords).await {
            Ok(days) => days,
            Err(AirQualityError::NotConfigured(_)) => {
                tracing::warn!(source = "owm", "OpenWeatherMap key not set; using mock forecast");
                mock_forecast(today, entropy)
            }
            Err(e) => {
                tracing::warn!(source = "owm", error = %e, "forecast fetch failed; using mock data");
                mock_forecast(today, entropy)
            }
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn aggregate_daily(samples: &[Sample]) -> Vec<DailyForecast> {
    let mut days: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();

    for sample in samples {
        let Some(instant) = DateTime::from_timestamp(sample.dt, 0) else {
            continue;
        };
        let bucket = days.entry(instant.date_naive()).or_default();
        bucket.aqi_sum += owm_level_to_aqi(sample.main.aqi);
        bucket.samples += 1;

        for (slot, spec) in bucket.components.iter_mut().zip(OWM_POLLUTANTS) {
            if let Some(value) = sample.components.get(spec.key) {
                slot.0 += value;
                slot.1 += 1;
            }
        }
    }

    days.into_iter()
        .take(FORECAST_DAYS)
        .map(|(date, bucket)| {
            let aqi = (f64::from(bucket.aqi_sum) / f64::from(bucket.samples)).round() as u32;
            let pollutants = bucket
                .components
                .iter()
                .zip(OWM_POLLUTANTS)
                .filter(|((_, count), _)| *count > 0)
                .filter_map(|((sum, count), spec)| {
                    map_pollutant(OWM_POLLUTANTS, spec.key, round2(sum / f64::from(*count)))
                })
                .collect();

            DailyForecast {
                date: format_forecast_date(date),
                aqi,
                pollutants,
            }
        })
        .collect()
}

/// A random baseline in `[50, 199]` jittered by ±20 per day, floored at 0.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn mock_forecast(today: NaiveDate, entropy: &mut Entropy) -> Vec<DailyForecast> {
    let base = f64::from(entropy.int_inclusive(50, 199));

    (1..=FORECAST_DAYS as u64)
        .filter_map(|offset| today.checked_add_days(Days::new(offset)))
        .map(|date| {
            let aqi = (base + entropy.symmetric(20.0)).round();
            DailyForecast {
                date: format_forecast_date(date),
                aqi: aqi.max(0.0) as u32,
                pollutants: map_pollutant(OWM_POLLUTANTS, "pm2_5", round2(aqi / 2.0))
                    .into_iter()
                    .collect(),
            }
        })
        .collect()
}
