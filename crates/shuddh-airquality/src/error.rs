use thiserror::Error;

/// Errors from the upstream air-quality providers.
///
/// None of these reach the caller of [`crate::AirQualityService::snapshot`];
/// they are logged and replaced with mock data.
#[derive(Debug, Error)]
pub enum AirQualityError {
    /// No API key, or demo mode is on.
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{provider} returned status {status}")]
    Status { provider: &'static str, status: u16 },

    /// The provider answered 200 but reported an error in its envelope.
    #[error("provider error: {0}")]
    Provider(String),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("invalid forecast input: {0}")]
    InvalidInput(String),
}
