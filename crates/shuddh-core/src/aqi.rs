//! AQI category bands.
//!
//! Every place that shows or reasons about a category goes through
//! [`AqiCategory::from_aqi`], so the band edges live in exactly one match.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AqiCategory {
    Good,
    Moderate,
    #[serde(rename = "Unhealthy for Sensitive Groups")]
    UnhealthyForSensitiveGroups,
    Unhealthy,
    #[serde(rename = "Very Unhealthy")]
    VeryUnhealthy,
    Hazardous,
}

impl AqiCategory {
    /// Upper bounds are inclusive: 50 is `Good`, 51 is `Moderate`.
    #[must_use]
    pub fn from_aqi(aqi: u32) -> Self {
        match aqi {
            0..=50 => Self::Good,
            51..=100 => Self::Moderate,
            101..=150 => Self::UnhealthyForSensitiveGroups,
            151..=200 => Self::Unhealthy,
            201..=300 => Self::VeryUnhealthy,
            _ => Self::Hazardous,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            Self::Unhealthy => "Unhealthy",
            Self::VeryUnhealthy => "Very Unhealthy",
            Self::Hazardous => "Hazardous",
        }
    }
}

impl std::fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Category label for a numeric AQI.
#[must_use]
pub fn aqi_category(aqi: u32) -> &'static str {
    AqiCategory::from_aqi(aqi).label()
}

/// Maps the OpenWeatherMap 1–5 air-quality level onto the 0–500 AQI scale.
///
/// Each level lands in the middle of the matching band; unknown levels map to 0.
#[must_use]
pub fn owm_level_to_aqi(level: u8) -> u32 {
    match level {
        1 => 25,
        2 => 75,
        3 => 125,
        4 => 175,
        5 => 250,
        _ => 0,
    }
}
