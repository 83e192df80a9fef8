//! YouTube Data API v3 video search.

use std::time::Duration;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::Client;
use serde::Deserialize;
use shuddh_core::{NewsItem, NewsSource};

use crate::error::NewsError;
use crate::feed::NewsFeed;

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com";
const MAX_RESULTS: usize = 5;

pub struct YouTubeFeed {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: VideoId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
}

impl YouTubeFeed {
    /// # Errors
    ///
    /// Returns [`NewsError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(api_key: Option<String>, timeout_secs: u64) -> Result<Self, NewsError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a feed with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::Http`] if the `reqwest::Client` cannot be built.
    pub fn with_base_url(
        api_key: Option<String>,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, NewsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }
}

#[async_trait]
impl NewsFeed for YouTubeFeed {
    fn label(&self) -> &'static str {
        "youtube"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn fetch(&self, city: &str) -> Result<Vec<NewsItem>, NewsError> {
        let Some(key) = &self.api_key else {
            return Err(NewsError::NotConfigured("YouTube"));
        };

        let query = format!("air quality news {city}");
        let encoded = utf8_percent_encode(&query, NON_ALPHANUMERIC).to_string();
        let url = format!(
            "{}/youtube/v3/search?part=snippet&q={encoded}&type=video&maxResults={MAX_RESULTS}",
            self.base_url
        );

        let response = self
            .client
            .get(&url)
            .query(&[("key", key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NewsError::Status {
                source_name: "YouTube",
                status: status.as_u16(),
            });
        }

        let body: serde_json::Value = response.json().await?;
        let parsed: SearchResponse =
            serde_json::from_value(body).map_err(|source| NewsError::Deserialize {
                context: "youtube search".to_string(),
                source,
            })?;

        Ok(parsed.items.into_iter().filter_map(to_item).collect())
    }
}

fn to_item(item: SearchItem) -> Option<NewsItem> {
    let video_id = item.id.video_id.filter(|id| !id.is_empty())?;
    Some(NewsItem {
        title: item.snippet.title,
        snippet: item.snippet.description,
        link: format!("https://www.youtube.com/watch?v={video_id}"),
        source: NewsSource::YouTube,
    })
}
