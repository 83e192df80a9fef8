use std::fmt::Write as _;

use serde::Deserialize;
use shuddh_core::NewsItem;

use super::{generate_json, non_blank};
use crate::error::LlmError;
use crate::generator::{GenerationRequest, TextGenerator};

/// Summary used when there is nothing to summarize.
pub const NO_NEWS_SUMMARY: &str = "No recent news found for this location.";

#[derive(Debug, Deserialize)]
struct SummaryOutput {
    summary: String,
}

#[derive(Debug, Deserialize)]
struct TitleOutput {
    title: String,
}

/// One-paragraph summary of the air-quality situation in `location`.
///
/// An empty `items` slice returns [`NO_NEWS_SUMMARY`] without calling the model.
///
/// # Errors
///
/// Backend failures, unparseable output, or a blank summary.
pub async fn summarize_news(
    generator: &dyn TextGenerator,
    location: &str,
    items: &[NewsItem],
) -> Result<String, LlmError> {
    if items.is_empty() {
        return Ok(NO_NEWS_SUMMARY.to_string());
    }

    let mut listing = String::new();
    for item in items {
        let _ = writeln!(listing, "- [{}]: {} - {}", item.source, item.title, item.snippet);
    }

    let prompt = format!(
        "You are a news analyst specializing in environmental topics.\n\
         From the news articles and video titles below for {location}, write a concise single-paragraph \
         summary of the current air quality situation. Highlight significant events, trends or official announcements.\n\n\
         News Items:\n{listing}\n\
         Respond with JSON only, in the form {{ \"summary\": \"<paragraph>\" }}."
    );

    let output: SummaryOutput =
        generate_json(generator, GenerationRequest::json(prompt), "summarizeNews").await?;
    non_blank(output.summary, "summary")
}

/// A 5–10 word headline for an article that was scraped without one.
///
/// # Errors
///
/// Backend failures, unparseable output, or a blank title.
pub async fn generate_news_title(
    generator: &dyn TextGenerator,
    snippet: &str,
) -> Result<String, LlmError> {
    let prompt = format!(
        "Write a concise, relevant title of 5 to 10 words for the following news snippet.\n\
         Snippet: {snippet}\n\
         Respond with JSON only, in the form {{ \"title\": \"<title>\" }}."
    );

    let output: TitleOutput =
        generate_json(generator, GenerationRequest::json(prompt), "generateNewsTitle").await?;
    non_blank(output.title, "title")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flows::testing::Canned;
    use shuddh_core::NewsSource;

    #[tokio::test]
    async fn empty_news_short_circuits_without_a_call() {
        let llm = Canned::ok(r#"{"summary": "unused"}"#);
        let summary = summarize_news(&llm, "Delhi", &[]).await.expect("summary");
        assert_eq!(summary, NO_NEWS_SUMMARY);
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn summary_prompt_lists_items_with_source_labels() {
        let llm = Canned::ok(r#"{"summary": "Smog persists."}"#);
        let items = vec![NewsItem {
            title: "Smog blankets city".into(),
            snippet: "AQI crossed 400".into(),
            link: "https://example.com".into(),
            source: NewsSource::GoogleNews,
        }];
        let summary = summarize_news(&llm, "Delhi", &items).await.expect("summary");
        assert_eq!(summary, "Smog persists.");
        assert!(llm
            .last_prompt()
            .contains("- [Google News]: Smog blankets city - AQI crossed 400"));
    }

    #[tokio::test]
    async fn title_is_generated_from_snippet() {
        let llm = Canned::ok(r#"{"title": "City issues smog alert"}"#);
        let title = generate_news_title(&llm, "Officials warned residents today")
            .await
            .expect("title");
        assert_eq!(title, "City issues smog alert");
        assert!(llm.last_prompt().contains("Officials warned residents today"));
    }
}
