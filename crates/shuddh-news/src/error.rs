use thiserror::Error;

#[derive(Debug, Error)]
pub enum NewsError {
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{source_name} returned status {status}")]
    Status {
        source_name: &'static str,
        status: u16,
    },

    /// Reddit token exchange failed or returned no token.
    #[error("Reddit auth error: {0}")]
    Auth(String),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("HTML scrape error: {0}")]
    Scrape(String),
}
