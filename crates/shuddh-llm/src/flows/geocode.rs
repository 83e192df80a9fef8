use serde::Deserialize;
use shuddh_core::Coordinates;

use super::{generate_json, non_blank};
use crate::error::LlmError;
use crate::generator::{GenerationRequest, TextGenerator};

#[derive(Debug, Deserialize)]
struct GeocodeOutput {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct ReverseGeocodeOutput {
    city: String,
}

/// Resolves a city name to coordinates.
///
/// # Errors
///
/// Backend failures, unparseable output, or coordinates outside ±90/±180.
pub async fn geocode_city(
    generator: &dyn TextGenerator,
    city: &str,
) -> Result<Coordinates, LlmError> {
    let prompt = format!(
        "You are a geocoding expert. Given a city name, return its latitude and longitude.\n\
         City: {city}\n\
         Respond with JSON only, in the form {{ \"latitude\": <latitude>, \"longitude\": <longitude> }}."
    );

    let output: GeocodeOutput =
        generate_json(generator, GenerationRequest::json(prompt), "geocodeCity").await?;
    let coordinates = Coordinates::new(output.latitude, output.longitude);

    if !coordinates.is_valid() {
        return Err(LlmError::InvalidOutput(format!(
            "coordinates out of range for '{city}': ({}, {})",
            output.latitude, output.longitude
        )));
    }
    Ok(coordinates)
}

/// Resolves coordinates to the nearest city name.
///
/// # Errors
///
/// Backend failures, unparseable output, or a blank city.
pub async fn reverse_geocode(
    generator: &dyn TextGenerator,
    latitude: f64,
    longitude: f64,
) -> Result<String, LlmError> {
    let prompt = format!(
        "You are a reverse geocoding expert. Given a latitude and longitude, return the name of the city there. Only return the city name.\n\
         Latitude: {latitude}\n\
         Longitude: {longitude}\n\
         Respond with JSON only, in the form {{ \"city\": \"<city_name>\" }}."
    );

    let output: ReverseGeocodeOutput =
        generate_json(generator, GenerationRequest::json(prompt), "reverseGeocode").await?;
    non_blank(output.city, "city")
}
