use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    /// No API key was configured for the text-generation backend.
    #[error("text generation is not configured")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("model returned no text")]
    EmptyResponse,

    #[error("JSON parse error for {context}: {source}")]
    Parse {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Well-formed output that fails a semantic check (e.g. latitude out of range).
    #[error("invalid model output: {0}")]
    InvalidOutput(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}
