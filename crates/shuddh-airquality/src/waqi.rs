//! Current conditions from the World Air Quality Index (AQICN) feed API.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use shuddh_core::{map_pollutant, round2, Coordinates, Entropy, Pollutant, WAQI_POLLUTANTS};

use crate::error::AirQualityError;

const DEFAULT_BASE_URL: &str = "https://api.waqi.info";
const PROVIDER: &str = "AQICN";

/// Headline AQI plus the pollutants the station reports.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentReading {
    pub aqi: u32,
    pub pollutants: Vec<Pollutant>,
}

pub struct WaqiClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    demo_mode: bool,
}

#[derive(Debug, Deserialize)]
struct FeedEnvelope {
    status: String,
    #[serde(default)]
    data: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct FeedData {
    #[serde(default)]
    aqi: serde_json::Value,
    #[serde(default)]
    iaqi: HashMap<String, IaqiReading>,
}

#[derive(Debug, Deserialize)]
struct IaqiReading {
    v: f64,
}

impl WaqiClient {
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

    /// In demo mode the client never calls out and always serves mock data.
    #[must_use]
    pub fn with_demo_mode(mut self, demo_mode: bool) -> Self {
        self.demo_mode = demo_mode;
        self
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() && !self.demo_mode
    }

    /// Fetches the nearest station's reading.
    ///
    /// `Ok(None)` means the provider answered but had no AQI for the location.
    ///
    /// # Errors
    ///
    /// Not configured, transport, non-2xx, `status != "ok"`, or an unexpected body shape.
    pub async fn fetch_current(
        &self,
        coords: Coordinates,
    ) -> Result<Option<CurrentReading>, AirQualityError> {
        let key = match (&self.api_key, self.demo_mode) {
            (Some(key), false) => key,
            _ => return Err(AirQualityError::NotConfigured(PROVIDER)),
        };

        let url = format!(
            "{}/feed/geo:{};{}/",
            self.base_url, coords.latitude, coords.longitude
        );
        let response = self
            .client
            .get(&url)
            .query(&[("token", key.as_str())])
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
        parse_feed(body)
    }

    /// [`Self::fetch_current`], degrading to a random reading on any failure.
    pub async fn current_or_mock(
        &self,
        coords: Coordinates,
        entropy: &mut Entropy,
    ) -> Option<CurrentReading> {
        match self.fetch_current(coords).await {
            Ok(reading) => reading,
            Err(AirQualityError::NotConfigured(_)) => {
                tracing::warn!(source = "waqi", "AQICN key not set; using mock current conditions");
                Some(mock_current(entropy))
            }
            Err(e) => {
                tracing::warn!(source = "waqi", error = %e, "current conditions fetch failed; using mock data");
                Some(mock_current(entropy))
            }
        }
    }
}

fn parse_feed(body: serde_json::Value) -> Result<Option<CurrentReading>, AirQualityError> {
    let envelope: FeedEnvelope =
        serde_json::from_value(body).map_err(|source| AirQualityError::Deserialize {
            context: "waqi feed envelope".to_string(),
            source,
        })?;

    if envelope.status != "ok" {
        let message = match envelope.data {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
        return Err(AirQualityError::Provider(format!("AQICN: {message}")));
    }

    let data: FeedData =
        serde_json::from_value(envelope.data).map_err(|source| AirQualityError::Deserialize {
            context: "waqi feed data".to_string(),
            source,
        })?;

    let Some(aqi) = headline_aqi(&data.aqi) else {
        return Ok(None);
    };

    let pollutants = WAQI_POLLUTANTS
        .iter()
        .filter_map(|spec| {
            let reading = data.iaqi.get(spec.key)?;
            map_pollutant(WAQI_POLLUTANTS, spec.key, reading.v)
        })
        .collect();

    Ok(Some(CurrentReading { aqi, pollutants }))
}

/// Stations with no reading report `"-"` instead of a number.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn headline_aqi(value: &serde_json::Value) -> Option<u32> {
    let aqi = match value {
        serde_json::Value::Number(n) => n.as_f64()?,
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    aqi.is_finite().then(|| aqi.max(0.0).round() as u32)
}

/// Random reading with AQI in `[1, 250]` and PM2.5/O₃ scaled from it.
pub(crate) fn mock_current(entropy: &mut Entropy) -> CurrentReading {
    let aqi = entropy.int_inclusive(1, 250);
    let base = f64::from(aqi);
    let pollutants = [("pm25", base / 2.0), ("o3", base / 4.0)]
        .into_iter()
        .filter_map(|(key, value)| map_pollutant(WAQI_POLLUTANTS, key, round2(value)))
        .collect();
    CurrentReading { aqi, pollutants }
}
