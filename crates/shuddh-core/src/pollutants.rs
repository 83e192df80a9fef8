//! Provider pollutant key tables.
//!
//! Each upstream names pollutants its own way (`pm25` for AQICN, `pm2_5` for
//! OpenWeatherMap). A key missing from the table is dropped, never defaulted.

use crate::types::Pollutant;

const MICROGRAMS: &str = "µg/m³";

/// One row of a provider table: the upstream key plus canonical name and unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollutantSpec {
    pub key: &'static str,
    pub name: &'static str,
    pub unit: &'static str,
}

/// AQICN (`api.waqi.info`) `iaqi` keys.
pub const WAQI_POLLUTANTS: &[PollutantSpec] = &[
    PollutantSpec { key: "pm25", name: "PM2.5", unit: MICROGRAMS },
    PollutantSpec { key: "pm10", name: "PM10", unit: MICROGRAMS },
    PollutantSpec { key: "o3", name: "O₃", unit: MICROGRAMS },
    PollutantSpec { key: "no2", name: "NO₂", unit: MICROGRAMS },
    PollutantSpec { key: "so2", name: "SO₂", unit: MICROGRAMS },
    PollutantSpec { key: "co", name: "CO", unit: MICROGRAMS },
];

/// OpenWeatherMap air-pollution `components` keys.
pub const OWM_POLLUTANTS: &[PollutantSpec] = &[
    PollutantSpec { key: "pm2_5", name: "PM2.5", unit: MICROGRAMS },
    PollutantSpec { key: "pm10", name: "PM10", unit: MICROGRAMS },
    PollutantSpec { key: "o3", name: "O₃", unit: MICROGRAMS },
    PollutantSpec { key: "no2", name: "NO₂", unit: MICROGRAMS },
    PollutantSpec { key: "so2", name: "SO₂", unit: MICROGRAMS },
    PollutantSpec { key: "co", name: "CO", unit: MICROGRAMS },
];

/// Looks up `key` in `table` and builds the canonical pollutant.
///
/// The value passes through untouched; only name and unit come from the table.
#[must_use]
pub fn map_pollutant(table: &[PollutantSpec], key: &str, value: f64) -> Option<Pollutant> {
    table.iter().find(|spec| spec.key == key).map(|spec| Pollutant {
        name: spec.name.to_string(),
        value,
        unit: spec.unit.to_string(),
    })
}

/// Rounds to two decimals, the precision used for averaged and synthetic values.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_preserves_value_and_attaches_table_unit() {
        for table in [WAQI_POLLUTANTS, OWM_POLLUTANTS] {
            for (i, spec) in table.iter().enumerate() {
                #[allow(clippy::cast_precision_loss)]
                let value = 3.17 * (i as f64 + 1.0);
                let p = map_pollutant(table, spec.key, value).expect("mapped key");
                assert_eq!(p.name, spec.name);
                assert_eq!(p.unit, spec.unit);
                assert!((p.value - value).abs() < f64::EPSILON);
            }
        }
    }

    #[test]
    fn unknown_keys_are_dropped() {
        assert!(map_pollutant(WAQI_POLLUTANTS, "t", 21.0).is_none());
        assert!(map_pollutant(WAQI_POLLUTANTS, "pm2_5", 1.0).is_none());
        assert!(map_pollutant(OWM_POLLUTANTS, "nh3", 1.0).is_none());
        assert!(map_pollutant(OWM_POLLUTANTS, "pm25", 1.0).is_none());
    }

    #[test]
    fn provider_keys_converge_on_the_same_names() {
        let waqi = map_pollutant(WAQI_POLLUTANTS, "pm25", 1.0).expect("waqi");
        let owm = map_pollutant(OWM_POLLUTANTS, "pm2_5", 1.0).expect("owm");
        assert_eq!(waqi.name, owm.name);
    }

    #[test]
    fn round2_keeps_two_decimals() {
        assert!((round2(12.345_67) - 12.35).abs() < 1e-9);
        assert!((round2(62.5) - 62.5).abs() < 1e-9);
    }
}
