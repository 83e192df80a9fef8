//! Stand-in for a predictive AQI model.
//!
//! Extrapolates the current AQI day by day from the trend of the official
//! forecast, a weather adjustment and uniform noise. The output is not a real
//! prediction and carries no accuracy guarantee.

use chrono::{Days, NaiveDate};
use shuddh_core::{format_forecast_date, DailyForecast, Entropy, Weather};

use crate::error::ForecastError;

/// Lowest AQI the simulator will emit.
pub const AQI_FLOOR: f64 = 10.0;

#[derive(Debug, Clone)]
pub struct ForecastInput<'a> {
    pub current_aqi: f64,
    pub weather: Weather,
    pub days: usize,
    /// Oldest first.
    pub history: &'a [DailyForecast],
}

impl ForecastInput<'_> {
    pub const DEFAULT_DAYS: usize = 5;
}

/// Projects `input.days` days starting tomorrow.
///
/// Each day is `round(previous + trend + weather + noise)`, floored at
/// [`AQI_FLOOR`], and becomes `previous` for the next day. Pollutants are left
/// empty.
///
/// # Errors
///
/// [`ForecastError::InvalidInput`] for a zero horizon or non-finite AQI/weather.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn simulate_forecast(
    input: &ForecastInput<'_>,
    today: NaiveDate,
    entropy: &mut Entropy,
) -> Result<Vec<DailyForecast>, ForecastError> {
    validate(input)?;

    let trend = match input.history {
        [first, .., last] => {
            (f64::from(last.aqi) - f64::from(first.aqi)) / input.history.len() as f64
        }
        _ => 0.0,
    };
    let weather = &input.weather;
    let weather_adjustment = weather.wind / 10.0 - weather.humidity / 100.0 - weather.temp / 20.0;

    let mut previous = input.current_aqi;
    let mut predictions = Vec::with_capacity(input.days);

    for offset in 1..=input.days as u64 {
        let noise = entropy.symmetric(10.0);
        let next = (previous + trend + weather_adjustment + noise)
            .round()
            .max(AQI_FLOOR);
        previous = next;

        let Some(date) = today.checked_add_days(Days::new(offset)) else {
            break;
        };
        predictions.push(DailyForecast {
            date: format_forecast_date(date),
            aqi: next as u32,
            pollutants: Vec::new(),
        });
    }

    Ok(predictions)
}

fn validate(input: &ForecastInput<'_>) -> Result<(), ForecastError> {
    if input.days == 0 {
        return Err(ForecastError::InvalidInput("days must be at least 1".to_string()));
    }
    if !input.current_aqi.is_finite() {
        return Err(ForecastError::InvalidInput(format!(
            "current AQI is not finite: {}",
            input.current_aqi
        )));
    }
    let Weather {
        temp,
        humidity,
        wind,
    } = input.weather;
    if ![temp, humidity, wind].iter().all(|v| v.is_finite()) {
        return Err(ForecastError::InvalidInput(
            "weather values must be finite".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).expect("date")
    }

    fn calm() -> Weather {
        Weather {
            temp: 20.0,
            humidity: 50.0,
            wind: 10.0,
        }
    }

    fn day(aqi: u32) -> DailyForecast {
        DailyForecast {
            date: String::new(),
            aqi,
            pollutants: vec![],
        }
    }

    #[test]
    fn emits_one_day_per_horizon_step_starting_tomorrow() {
        let input = ForecastInput {
            current_aqi: 120.0,
            weather: calm(),
            days: ForecastInput::DEFAULT_DAYS,
            history: &[],
        };
        let days = simulate_forecast(&input, today(), &mut Entropy::seeded(1)).expect("forecast");

        assert_eq!(days.len(), 5);
        assert_eq!(days[0].date, "Tue, Jan 2");
        assert_eq!(days[4].date, "Sat, Jan 6");
        assert!(days.iter().all(|d| d.pollutants.is_empty()));
    }

    #[test]
    fn aqi_never_drops_below_floor() {
        let history = [day(300), day(200), day(100), day(20)];
        let hot_and_humid = Weather {
            temp: 45.0,
            humidity: 100.0,
            wind: 0.0,
        };
        for seed in 0..50 {
            let input = ForecastInput {
                current_aqi: 12.0,
                weather: hot_and_humid,
                days: 10,
                history: &history,
            };
            let days = simulate_forecast(&input, today(), &mut Entropy::seeded(seed)).expect("forecast");
            assert!(days.iter().all(|d| d.aqi >= 10), "seed {seed}: {days:?}");
        }
    }

    #[test]
    fn each_step_stays_within_noise_of_the_previous_day() {
        // trend = (150 - 100) / 2 = 25, weather = 1 - 0.5 - 1 = -0.5
        let history = [day(100), day(150)];
        let input = ForecastInput {
            current_aqi: 100.0,
            weather: calm(),
            days: 5,
            history: &history,
        };
        let days = simulate_forecast(&input, today(), &mut Entropy::seeded(42)).expect("forecast");

        let mut previous = 100.0;
        for d in &days {
            let aqi = f64::from(d.aqi);
            let expected = previous + 25.0 - 0.5;
            assert!((aqi - expected).abs() <= 10.5, "{aqi} vs {expected}");
            previous = aqi;
        }
    }

    #[test]
    fn single_history_point_has_no_trend() {
        let history = [day(400)];
        let input = ForecastInput {
            current_aqi: 50.0,
            weather: calm(),
            days: 1,
            history: &history,
        };
        let days = simulate_forecast(&input, today(), &mut Entropy::seeded(3)).expect("forecast");
        assert!((39..=61).contains(&days[0].aqi));
    }

    #[test]
    fn same_seed_reproduces_the_projection() {
        let input = ForecastInput {
            current_aqi: 80.0,
            weather: calm(),
            days: 5,
            history: &[],
        };
        let a = simulate_forecast(&input, today(), &mut Entropy::seeded(77)).expect("a");
        let b = simulate_forecast(&input, today(), &mut Entropy::seeded(77)).expect("b");
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_zero_horizon_and_non_finite_inputs() {
        let mut input = ForecastInput {
            current_aqi: 80.0,
            weather: calm(),
            days: 0,
            history: &[],
        };
        assert!(simulate_forecast(&input, today(), &mut Entropy::seeded(0)).is_err());

        input.days = 5;
        input.current_aqi = f64::NAN;
        assert!(simulate_forecast(&input, today(), &mut Entropy::seeded(0)).is_err());

        input.current_aqi = 80.0;
        input.weather.wind = f64::INFINITY;
        assert!(simulate_forecast(&input, today(), &mut Entropy::seeded(0)).is_err());
    }
}
