use serde::Deserialize;
use shuddh_core::aqi_category;

use super::{generate_json, non_blank};
use crate::error::LlmError;
use crate::generator::{GenerationRequest, TextGenerator};

/// Profile plus conditions for a personalized advisory.
#[derive(Debug, Clone)]
pub struct AdvisoryPrompt {
    pub name: String,
    pub age: u32,
    pub location: String,
    /// `"None"` when the user reported nothing.
    pub health_conditions: String,
    /// ISO 639-1 code, e.g. `en`, `ta`, `hi`.
    pub language: String,
    pub aqi: u32,
    /// Pre-rendered `"PM2.5: 12 µg/m³, ..."` list.
    pub pollutants: String,
}

#[derive(Debug, Clone)]
pub struct TipsPrompt {
    pub location: String,
    pub aqi: f64,
    pub pollutants: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AdvisoryOutput {
    health_advisory: String,
}

#[derive(Debug, Deserialize)]
struct TipsOutput {
    tips: String,
}

/// Personalized health advisory, written in the user's preferred language.
///
/// # Errors
///
/// Backend failures, unparseable output, or a blank advisory.
pub async fn generate_health_advisory(
    generator: &dyn TextGenerator,
    input: &AdvisoryPrompt,
) -> Result<String, LlmError> {
    let prompt = format!(
        "You are a health advisor specializing in air quality and its effect on health.\n\
         Using the user's details and the current air quality, write personalized health recommendations.\n\
         The advisory MUST be written in the language given under Language Preference.\n\n\
         User Information:\n\
         - Name: {name}\n\
         - Age: {age}\n\
         - Location: {location}\n\
         - Health Conditions: {conditions}\n\
         - Language Preference: {language}\n\n\
         Air Quality Information:\n\
         - AQI: {aqi} ({category})\n\
         - Pollutants: {pollutants}\n\n\
         Respond with JSON only, in the form {{ \"healthAdvisory\": \"<advisory>\" }}.",
        name = input.name,
        age = input.age,
        location = input.location,
        conditions = input.health_conditions,
        language = input.language,
        aqi = input.aqi,
        category = aqi_category(input.aqi),
        pollutants = input.pollutants,
    );

    let output: AdvisoryOutput = generate_json(
        generator,
        GenerationRequest::json(prompt),
        "generateHealthAdvisory",
    )
    .await?;
    non_blank(output.health_advisory, "health advisory")
}

/// Community and personal actions for lowering pollution, as a Markdown list.
///
/// # Errors
///
/// Backend failures, unparseable output, or blank tips.
pub async fn generate_pollution_tips(
    generator: &dyn TextGenerator,
    input: &TipsPrompt,
) -> Result<String, LlmError> {
    let prompt = format!(
        "You are an environmental expert specializing in air quality management.\n\
         Based on the user's location and current air quality, list practical actions that reduce air pollution \
         in their area and help keep the AQI good. Split them into two groups:\n\
         1. **Community Actions**: things the community can do together.\n\
         2. **Personal Actions**: things an individual can do.\n\n\
         User Location: {location}\n\
         Current AQI: {aqi}\n\
         Main Pollutants: {pollutants}\n\n\
         Keep the tone helpful and encouraging and format the tips as a Markdown list.\n\
         Respond with JSON only, in the form {{ \"tips\": \"<markdown>\" }}.",
        location = input.location,
        aqi = input.aqi,
        pollutants = input.pollutants,
    );

    let output: TipsOutput = generate_json(
        generator,
        GenerationRequest::json(prompt),
        "generatePollutionReductionTips",
    )
    .await?;
    non_blank(output.tips, "tips")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flows::testing::Canned;

    fn advisory_input() -> AdvisoryPrompt {
        AdvisoryPrompt {
            name: "Asha".into(),
            age: 34,
            location: "Chennai".into(),
            health_conditions: "Asthma".into(),
            language: "ta".into(),
            aqi: 162,
            pollutants: "PM2.5: 81 µg/m³".into(),
        }
    }

    #[tokio::test]
    async fn advisory_prompt_carries_profile_and_category() {
        let llm = Canned::ok(r#"{"healthAdvisory": "Stay indoors."}"#);
        let text = generate_health_advisory(&llm, &advisory_input())
            .await
            .expect("advisory");
        assert_eq!(text, "Stay indoors.");

        let prompt = llm.last_prompt();
        assert!(prompt.contains("Name: Asha"));
        assert!(prompt.contains("Health Conditions: Asthma"));
        assert!(prompt.contains("Language Preference: ta"));
        assert!(prompt.contains("AQI: 162 (Unhealthy)"));
        assert!(prompt.contains("PM2.5: 81 µg/m³"));
    }

    #[tokio::test]
    async fn advisory_backend_failure_propagates() {
        let llm = Canned::failing();
        assert!(generate_health_advisory(&llm, &advisory_input())
            .await
            .is_err());
    }

    #[tokio::test]
    async fn blank_advisory_is_rejected() {
        let llm = Canned::ok(r#"{"healthAdvisory": "   "}"#);
        let err = generate_health_advisory(&llm, &advisory_input())
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::InvalidOutput(_)));
    }

    #[tokio::test]
    async fn tips_are_parsed() {
        let llm = Canned::ok(r#"{"tips": "- Use public transport"}"#);
        let tips = generate_pollution_tips(
            &llm,
            &TipsPrompt {
                location: "Pune".into(),
                aqi: 88.0,
                pollutants: "PM10: 60 µg/m³".into(),
            },
        )
        .await
        .expect("tips");
        assert_eq!(tips, "- Use public transport");
        assert!(llm.last_prompt().contains("User Location: Pune"));
    }
}
