//! Prompt flows: structured input in, typed output back.
//!
//! Every JSON flow asks the backend for a single JSON object and tolerates a
//! Markdown code fence around it.

mod advisory;
mod chat;
mod geocode;
mod news;
mod report;

pub use advisory::{generate_health_advisory, generate_pollution_tips, AdvisoryPrompt, TipsPrompt};
pub use chat::chat;
pub use geocode::{geocode_city, reverse_geocode};
pub use news::{generate_news_title, summarize_news, NO_NEWS_SUMMARY};
pub use report::extract_health_report_text;

use serde::de::DeserializeOwned;

use crate::error::LlmError;
use crate::generator::{GenerationRequest, TextGenerator};

pub(crate) async fn generate_json<T: DeserializeOwned>(
    generator: &dyn TextGenerator,
    request: GenerationRequest,
    context: &str,
) -> Result<T, LlmError> {
    let raw = generator.generate(request).await?;
    parse_json_output(&raw, context)
}

pub(crate) fn parse_json_output<T: DeserializeOwned>(raw: &str, context: &str) -> Result<T, LlmError> {
    serde_json::from_str(strip_code_fence(raw)).map_err(|source| LlmError::Parse {
        context: context.to_string(),
        source,
    })
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

/// Rejects blank generated text.
pub(crate) fn non_blank(text: String, what: &str) -> Result<String, LlmError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(LlmError::InvalidOutput(format!("{what} is empty")))
    } else {
        Ok(trimmed.to_string())
    }
}
