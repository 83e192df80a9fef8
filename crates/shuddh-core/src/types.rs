use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aqi::aqi_category;

/// One tracked pollutant reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pollutant {
    pub name: String,
    pub value: f64,
    pub unit: String,
}

/// One calendar day of observed or projected air quality. Sequences are chronological.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    /// Human-readable day, e.g. `"Mon, Jan 1"`.
    pub date: String,
    pub aqi: u32,
    pub pollutants: Vec<Pollutant>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    /// °C
    pub temp: f64,
    /// Relative humidity, 0–100.
    pub humidity: f64,
    /// km/h
    pub wind: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditions {
    pub aqi: u32,
    pub aqi_category: String,
    pub pollutants: Vec<Pollutant>,
    pub weather: Weather,
}

impl CurrentConditions {
    /// Builds conditions with the category derived from `aqi`.
    #[must_use]
    pub fn new(aqi: u32, pollutants: Vec<Pollutant>, weather: Weather) -> Self {
        Self {
            aqi,
            aqi_category: aqi_category(aqi).to_string(),
            pollutants,
            weather,
        }
    }

    /// `"PM2.5: 12.5 µg/m³, O₃: 4 µg/m³"`, the form handed to prompts.
    #[must_use]
    pub fn pollutant_summary(&self) -> String {
        self.pollutants
            .iter()
            .map(|p| format!("{}: {} {}", p.name, p.value, p.unit))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Current conditions plus the official multi-day forecast for one location.
///
/// `current` is `None` when the provider answered but had no reading at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQualitySnapshot {
    pub current: Option<CurrentConditions>,
    pub forecast: Vec<DailyForecast>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryLocation {
    pub city: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryUser {
    pub name: String,
}

/// The terminal artifact of one advisory request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryResult {
    pub current: CurrentConditions,
    pub forecast: Vec<DailyForecast>,
    pub model_forecast: Vec<DailyForecast>,
    pub advisory: String,
    pub location: AdvisoryLocation,
    pub user: AdvisoryUser,
}

/// Origin label of a news item; drives the icon picked by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NewsSource {
    YouTube,
    #[serde(rename = "Google News")]
    GoogleNews,
    Reddit,
}

impl NewsSource {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::YouTube => "YouTube",
            Self::GoogleNews => "Google News",
            Self::Reddit => "Reddit",
        }
    }
}

impl std::fmt::Display for NewsSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub snippet: String,
    pub link: String,
    pub source: NewsSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Finite and within ±90 / ±180.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Formats a forecast day the way the UI displays it (`"Mon, Jan 1"`).
#[must_use]
pub fn format_forecast_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather() -> Weather {
        Weather {
            temp: 25.0,
            humidity: 60.0,
            wind: 10.0,
        }
    }

    #[test]
    fn current_conditions_derive_category_from_aqi() {
        let current = CurrentConditions::new(151, vec![], weather());
        assert_eq!(current.aqi_category, "Unhealthy");
    }

    #[test]
    fn current_conditions_serialize_camel_case() {
        let current = CurrentConditions::new(42, vec![], weather());
        let json = serde_json::to_value(&current).expect("serialize");
        assert_eq!(json["aqiCategory"], "Good");
        assert_eq!(json["weather"]["humidity"], 60.0);
    }

    #[test]
    fn pollutant_summary_lists_name_value_unit() {
        let current = CurrentConditions::new(
            80,
            vec![
                Pollutant {
                    name: "PM2.5".into(),
                    value: 40.5,
                    unit: "µg/m³".into(),
                },
                Pollutant {
                    name: "O₃".into(),
                    value: 20.0,
                    unit: "µg/m³".into(),
                },
            ],
            weather(),
        );
        assert_eq!(current.pollutant_summary(), "PM2.5: 40.5 µg/m³, O₃: 20 µg/m³");
    }

    #[test]
    fn news_source_serializes_to_origin_label() {
        let item = NewsItem {
            title: "t".into(),
            snippet: "s".into(),
            link: "l".into(),
            source: NewsSource::GoogleNews,
        };
        let json = serde_json::to_value(&item).expect("serialize");
        assert_eq!(json["source"], "Google News");
    }

    #[test]
    fn forecast_date_uses_short_weekday_and_month() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).expect("date");
        assert_eq!(format_forecast_date(date), "Mon, Jan 1");
    }

    #[test]
    fn coordinates_reject_out_of_range_values() {
        assert!(Coordinates::new(17.385, 78.4867).is_valid());
        assert!(!Coordinates::new(91.0, 0.0).is_valid());
        assert!(!Coordinates::new(0.0, -181.0).is_valid());
        assert!(!Coordinates::new(f64::NAN, 0.0).is_valid());
    }
}
