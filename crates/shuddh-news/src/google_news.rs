//! Google News search results, scraped from the HTML page.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use shuddh_core::{NewsItem, NewsSource};
use shuddh_llm::flows::generate_news_title;
use shuddh_llm::TextGenerator;

use crate::error::NewsError;
use crate::feed::NewsFeed;

const DEFAULT_BASE_URL: &str = "https://news.google.com";
const LINK_ORIGIN: &str = "https://news.google.com";
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const MAX_ARTICLES: usize = 5;
const FALLBACK_TITLE_CHARS: usize = 50;

pub struct GoogleNewsFeed {
    client: Client,
    base_url: String,
    titler: Option<Arc<dyn TextGenerator>>,
}

/// One `<article>` as found on the page, before title resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ScrapedArticle {
    title: Option<String>,
    snippet: Option<String>,
    link: String,
}

impl GoogleNewsFeed {
    /// `titler` writes headlines for articles scraped without one.
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        timeout_secs: u64,
        titler: Option<Arc<dyn TextGenerator>>,
    ) -> Result<Self, NewsError> {
        Self::with_base_url(timeout_secs, titler, DEFAULT_BASE_URL)
    }

    /// Creates a feed with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::Http`] if the `reqwest::Client` cannot be built.
    pub fn with_base_url(
        timeout_secs: u64,
        titler: Option<Arc<dyn TextGenerator>>,
        base_url: &str,
    ) -> Result<Self, NewsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(BROWSER_USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            titler,
        })
    }

    async fn resolve(&self, article: ScrapedArticle) -> Option<NewsItem> {
        let (title, snippet) = match (article.title, article.snippet) {
            (Some(title), snippet) => {
                let snippet = snippet.unwrap_or_else(|| title.clone());
                (title, snippet)
            }
            (None, Some(snippet)) => (self.title_for(&snippet).await, snippet),
            (None, None) => return None,
        };

        Some(NewsItem {
            title,
            snippet,
            link: article.link,
            source: NewsSource::GoogleNews,
        })
    }

    async fn title_for(&self, snippet: &str) -> String {
        if let Some(titler) = &self.titler {
            match generate_news_title(titler.as_ref(), snippet).await {
                Ok(title) => return title,
                Err(e) => {
                    tracing::warn!(source = "google_news", error = %e, "title generation failed; truncating snippet");
                }
            }
        }
        snippet.chars().take(FALLBACK_TITLE_CHARS).collect()
    }
}

#[async_trait]
impl NewsFeed for GoogleNewsFeed {
    fn label(&self) -> &'static str {
        "google_news"
    }

    fn is_configured(&self) -> bool {
        true
    }

    async fn fetch(&self, city: &str) -> Result<Vec<NewsItem>, NewsError> {
        let query = format!("air quality {city}");
        let encoded = utf8_percent_encode(&query, NON_ALPHANUMERIC).to_string();
        let url = format!(
            "{}/search?q={encoded}&hl=en-US&gl=US&ceid=US:en",
            self.base_url
        );

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NewsError::Status {
                source_name: "Google News",
                status: status.as_u16(),
            });
        }

        let html = response.text().await?;
        let articles = parse_articles(&html)?;

        let items = join_all(articles.into_iter().map(|article| self.resolve(article))).await;
        Ok(items.into_iter().flatten().collect())
    }
}

fn selector(css: &str) -> Result<Selector, NewsError> {
    Selector::parse(css).map_err(|e| NewsError::Scrape(format!("bad selector '{css}': {e}")))
}

/// First five `<article>` elements that carry a link.
///
/// `Html` is not `Send`, so parsing stays in this synchronous function.
fn parse_articles(html: &str) -> Result<Vec<ScrapedArticle>, NewsError> {
    let article_sel = selector("article")?;
    let title_sel = selector("h3")?;
    let link_sel = selector("a[href]")?;
    let span_sel = selector("span")?;

    let doc = Html::parse_document(html);
    let articles = doc
        .select(&article_sel)
        .take(MAX_ARTICLES)
        .filter_map(|article| {
            let href = article
                .select(&link_sel)
                .next()
                .and_then(|a| a.value().attr("href"))?;

            Some(ScrapedArticle {
                title: first_text(&article, &title_sel),
                snippet: first_text(&article, &span_sel),
                link: resolve_link(href),
            })
        })
        .collect();

    Ok(articles)
}

fn first_text(scope: &ElementRef<'_>, sel: &Selector) -> Option<String> {
    let text: String = scope.select(sel).next()?.text().collect();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Article links are relative (`./articles/...`).
fn resolve_link(href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    let path = href.strip_prefix('.').unwrap_or(href);
    format!("{LINK_ORIGIN}{path}")
}
