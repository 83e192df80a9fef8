//! Action inputs and their validation.
//!
//! Every validator collects all field messages and joins them with `", "`,
//! so one response reports every problem with the form.

use serde::Deserialize;

use crate::error::AdvisoryError;

pub const SUPPORTED_LANGUAGES: [&str; 6] = ["en", "ta", "hi", "bn", "te", "mr"];
pub const MAX_AGE: f64 = 120.0;

/// Age as submitted: forms send strings, API clients send numbers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AgeInput {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthForm {
    pub name: String,
    pub age: AgeInput,
    pub location: String,
    #[serde(default)]
    pub health_conditions: Option<String>,
    pub language_preference: String,
    /// Text previously extracted from an uploaded report.
    #[serde(default)]
    pub health_report: Option<String>,
}

/// A [`HealthForm`] that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidHealthForm {
    pub name: String,
    pub age: u32,
    pub location: String,
    pub health_conditions: Option<String>,
    pub language: String,
    pub health_report: Option<String>,
}

impl ValidHealthForm {
    /// Conditions as handed to the advisory prompt; `"None"` when nothing was reported.
    #[must_use]
    pub fn conditions_for_prompt(&self) -> String {
        match (&self.health_conditions, &self.health_report) {
            (Some(conditions), Some(report)) => {
                format!("{conditions}\n\nFrom the user's health report:\n{report}")
            }
            (Some(conditions), None) => conditions.clone(),
            (None, Some(report)) => format!("From the user's health report:\n{report}"),
            (None, None) => "None".to_string(),
        }
    }
}

impl HealthForm {
    /// # Errors
    ///
    /// [`AdvisoryError::Validation`] listing every failing field.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn validate(self) -> Result<ValidHealthForm, AdvisoryError> {
        let mut messages = Vec::new();

        if self.name.chars().count() < 2 {
            messages.push("Name must be at least 2 characters.".to_string());
        }

        let age = match coerce_age(&self.age) {
            Some(age) if age < 0.0 => {
                messages.push("Number must be greater than or equal to 0".to_string());
                None
            }
            Some(age) if age > MAX_AGE => {
                messages.push("Number must be less than or equal to 120".to_string());
                None
            }
            Some(age) => Some(age.round() as u32),
            None => {
                messages.push("Expected number, received string".to_string());
                None
            }
        };

        if self.location.chars().count() < 2 {
            messages.push("Location is required.".to_string());
        }

        if !SUPPORTED_LANGUAGES.contains(&self.language_preference.as_str()) {
            messages.push(format!(
                "Invalid enum value. Expected 'en' | 'ta' | 'hi' | 'bn' | 'te' | 'mr', received '{}'",
                self.language_preference
            ));
        }

        match age {
            Some(age) if messages.is_empty() => Ok(ValidHealthForm {
                name: self.name,
                age,
                location: self.location,
                health_conditions: non_blank(self.health_conditions),
                language: self.language_preference,
                health_report: non_blank(self.health_report),
            }),
            _ => Err(AdvisoryError::Validation(messages.join(", "))),
        }
    }
}

fn coerce_age(age: &AgeInput) -> Option<f64> {
    let value = match age {
        AgeInput::Number(n) => *n,
        AgeInput::Text(s) => s.trim().parse::<f64>().ok()?,
    };
    value.is_finite().then_some(value)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TipsRequest {
    pub location: String,
    pub aqi: f64,
    pub pollutants: String,
}

impl TipsRequest {
    /// # Errors
    ///
    /// [`AdvisoryError::Validation`] for a blank location or a negative/non-finite AQI.
    pub fn validate(&self) -> Result<(), AdvisoryError> {
        let mut messages = Vec::new();
        if self.location.trim().is_empty() {
            messages.push("Location is required.");
        }
        if !self.aqi.is_finite() || self.aqi < 0.0 {
            messages.push("AQI must be a non-negative number.");
        }
        finish(&messages)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewsRequest {
    pub city: String,
}

impl NewsRequest {
    /// # Errors
    ///
    /// [`AdvisoryError::Validation`] for a blank city.
    pub fn validate(&self) -> Result<(), AdvisoryError> {
        if self.city.trim().is_empty() {
            return finish(&["City is required."]);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ReverseGeocodeRequest {
    pub latitude: f64,
    pub longitude: f64,
}

impl ReverseGeocodeRequest {
    /// # Errors
    ///
    /// [`AdvisoryError::Validation`] for coordinates outside ±90 / ±180.
    pub fn validate(&self) -> Result<(), AdvisoryError> {
        let mut messages = Vec::new();
        if !(self.latitude.is_finite() && (-90.0..=90.0).contains(&self.latitude)) {
            messages.push("Latitude must be between -90 and 90.");
        }
        if !(self.longitude.is_finite() && (-180.0..=180.0).contains(&self.longitude)) {
            messages.push("Longitude must be between -180 and 180.");
        }
        finish(&messages)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReportRequest {
    /// `data:<mime>;base64,<payload>`
    pub report_data_uri: String,
}

fn finish(messages: &[&str]) -> Result<(), AdvisoryError> {
    if messages.is_empty() {
        Ok(())
    } else {
        Err(AdvisoryError::Validation(messages.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> HealthForm {
        HealthForm {
            name: "Ravi".into(),
            age: AgeInput::Text("42".into()),
            location: "Chennai".into(),
            health_conditions: Some("  ".into()),
            language_preference: "ta".into(),
            health_report: None,
        }
    }

    fn message(result: Result<ValidHealthForm, AdvisoryError>) -> String {
        match result {
            Err(AdvisoryError::Validation(message)) => message,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn numeric_string_age_is_coerced() {
        let valid = form().validate().expect("valid");
        assert_eq!(valid.age, 42);
        assert_eq!(valid.health_conditions, None);
        assert_eq!(valid.conditions_for_prompt(), "None");
    }

    #[test]
    fn age_bounds_are_inclusive() {
        let mut f = form();
        f.age = AgeInput::Number(0.0);
        assert!(f.clone().validate().is_ok());
        f.age = AgeInput::Number(120.0);
        assert!(f.clone().validate().is_ok());
        f.age = AgeInput::Number(121.0);
        assert_eq!(message(f.validate()), "Number must be less than or equal to 120");
    }

    #[test]
    fn negative_and_non_numeric_ages_are_rejected() {
        let mut f = form();
        f.age = AgeInput::Number(-1.0);
        assert_eq!(message(f.clone().validate()), "Number must be greater than or equal to 0");
        f.age = AgeInput::Text("forty".into());
        assert_eq!(message(f.validate()), "Expected number, received string");
    }

    #[test]
    fn all_field_messages_are_joined() {
        let f = HealthForm {
            name: "R".into(),
            age: AgeInput::Number(30.0),
            location: String::new(),
            health_conditions: None,
            language_preference: "fr".into(),
            health_report: None,
        };
        let message = message(f.validate());
        assert!(message.starts_with("Name must be at least 2 characters., Location is required., "));
        assert!(message.contains("received 'fr'"));
    }

    #[test]
    fn form_deserializes_from_camel_case_json() {
        let f: HealthForm = serde_json::from_value(serde_json::json!({
            "name": "Meera",
            "age": 67,
            "location": "Kolkata",
            "healthConditions": "COPD",
            "languagePreference": "bn",
            "healthReport": "FEV1 58%"
        }))
        .expect("deserialize");
        assert_eq!(f.age, AgeInput::Number(67.0));

        let valid = f.validate().expect("valid");
        assert_eq!(
            valid.conditions_for_prompt(),
            "COPD\n\nFrom the user's health report:\nFEV1 58%"
        );
    }

    #[test]
    fn tips_and_coordinates_are_range_checked() {
        let tips = TipsRequest {
            location: " ".into(),
            aqi: -3.0,
            pollutants: String::new(),
        };
        let err = tips.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Location is required., AQI must be a non-negative number."
        );

        assert!(ReverseGeocodeRequest { latitude: 13.0, longitude: 80.2 }.validate().is_ok());
        assert!(ReverseGeocodeRequest { latitude: 95.0, longitude: 80.2 }.validate().is_err());
        assert!(NewsRequest { city: String::new() }.validate().is_err());
    }
}
