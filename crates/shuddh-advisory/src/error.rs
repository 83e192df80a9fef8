use shuddh_airquality::AirQualityError;
use shuddh_llm::LlmError;
use shuddh_news::NewsError;
use thiserror::Error;

pub const NO_CURRENT_DATA_MESSAGE: &str =
    "Could not fetch current air quality data for the specified location. Please try another city.";
pub const NETWORK_FAILURE_MESSAGE: &str =
    "Failed to fetch air quality data. Please check your internet connection and API keys.";
const UNEXPECTED_MESSAGE: &str =
    "An unexpected error occurred while fetching air quality data.";

/// How an action failed, for callers that map failures onto a transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionErrorKind {
    Validation,
    NotFound,
    Upstream,
}

#[derive(Debug, Error)]
pub enum AdvisoryError {
    /// Field messages, already joined with `", "`.
    #[error("{0}")]
    Validation(String),

    #[error("no current air quality data for the location")]
    NoCurrentData,

    /// A spawned fetch task panicked or was cancelled.
    #[error("background task failed: {0}")]
    TaskFailed(String),

    #[error("air quality client setup failed: {0}")]
    AirQuality(#[from] AirQualityError),

    #[error("news client setup failed: {0}")]
    News(#[from] NewsError),

    #[error("text generation setup failed: {0}")]
    Llm(#[from] LlmError),
}

impl AdvisoryError {
    #[must_use]
    pub fn kind(&self) -> ActionErrorKind {
        match self {
            Self::Validation(_) => ActionErrorKind::Validation,
            Self::NoCurrentData => ActionErrorKind::NotFound,
            _ => ActionErrorKind::Upstream,
        }
    }

    /// The short string shown to the user in place of this error.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::NoCurrentData => NO_CURRENT_DATA_MESSAGE.to_string(),
            other if is_connectivity_failure(&other.to_string()) => {
                NETWORK_FAILURE_MESSAGE.to_string()
            }
            _ => UNEXPECTED_MESSAGE.to_string(),
        }
    }
}

fn is_connectivity_failure(detail: &str) -> bool {
    let detail = detail.to_ascii_lowercase();
    [
        "fetch failed",
        "error sending request",
        "connection refused",
        "connection reset",
        "dns error",
        "timed out",
    ]
    .iter()
    .any(|signature| detail.contains(signature))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connectivity_signatures_get_the_network_message() {
        let err = AdvisoryError::TaskFailed("error sending request for url (https://api.waqi.info)".into());
        assert_eq!(err.user_message(), NETWORK_FAILURE_MESSAGE);
        assert_eq!(err.kind(), ActionErrorKind::Upstream);
    }

    #[test]
    fn other_failures_get_a_generic_message() {
        let err = AdvisoryError::TaskFailed("task 12 panicked".into());
        assert_eq!(err.user_message(), UNEXPECTED_MESSAGE);
    }

    #[test]
    fn no_current_data_is_not_found() {
        let err = AdvisoryError::NoCurrentData;
        assert_eq!(err.kind(), ActionErrorKind::NotFound);
        assert_eq!(err.user_message(), NO_CURRENT_DATA_MESSAGE);
    }

    #[test]
    fn validation_message_passes_through() {
        let err = AdvisoryError::Validation("Location is required.".into());
        assert_eq!(err.user_message(), "Location is required.");
        assert_eq!(err.kind(), ActionErrorKind::Validation);
    }
}
