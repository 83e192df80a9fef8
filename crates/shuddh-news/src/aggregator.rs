use std::sync::Arc;

use futures::future::join_all;
use shuddh_core::{AppConfig, NewsItem};
use shuddh_llm::TextGenerator;

use crate::error::NewsError;
use crate::feed::NewsFeed;
use crate::google_news::GoogleNewsFeed;
use crate::reddit::RedditFeed;
use crate::youtube::YouTubeFeed;

/// Fans a city query out to every feed and concatenates the results.
pub struct NewsAggregator {
    feeds: Vec<Box<dyn NewsFeed>>,
    demo_mode: bool,
}

impl NewsAggregator {
    /// Feeds are queried concurrently but their results keep this order.
    #[must_use]
    pub fn new(feeds: Vec<Box<dyn NewsFeed>>) -> Self {
        Self {
            feeds,
            demo_mode: false,
        }
    }

    /// In demo mode no feed is queried and `collect` returns nothing.
    #[must_use]
    pub fn with_demo_mode(mut self, demo_mode: bool) -> Self {
        self.demo_mode = demo_mode;
        self
    }

    /// YouTube, Google News and Reddit, in that order.
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::Http`] if an HTTP client cannot be built.
    pub fn from_config(
        config: &AppConfig,
        titler: Option<Arc<dyn TextGenerator>>,
    ) -> Result<Self, NewsError> {
        let timeout = config.http_timeout_secs;
        Ok(Self::new(vec![
            Box::new(YouTubeFeed::new(config.keys.youtube.clone(), timeout)?),
            Box::new(GoogleNewsFeed::new(timeout, titler)?),
            Box::new(RedditFeed::new(config.keys.reddit.clone(), timeout)?),
        ])
        .with_demo_mode(config.demo_mode))
    }

    #[must_use]
    pub fn configured_sources(&self) -> Vec<(&'static str, bool)> {
        self.feeds
            .iter()
            .map(|feed| (feed.label(), !self.demo_mode && feed.is_configured()))
            .collect()
    }

    /// Never fails. Unconfigured feeds are skipped without a request, and
    /// failing feeds contribute nothing.
    pub async fn collect(&self, city: &str) -> Vec<NewsItem> {
        if self.demo_mode {
            tracing::info!(city, "demo mode; skipping news sources");
            return Vec::new();
        }

        let batches = join_all(self.feeds.iter().map(|feed| collect_one(feed.as_ref(), city))).await;
        let items: Vec<NewsItem> = batches.into_iter().flatten().collect();

        tracing::debug!(city, count = items.len(), "collected news items");
        items
    }
}

async fn collect_one(feed: &dyn NewsFeed, city: &str) -> Vec<NewsItem> {
    if !feed.is_configured() {
        tracing::warn!(source = feed.label(), "credentials not set; skipping news source");
        return Vec::new();
    }

    match feed.fetch(city).await {
        Ok(items) => {
            tracing::debug!(source = feed.label(), count = items.len(), "collected news items");
            items
        }
        Err(e) => {
            tracing::warn!(source = feed.label(), error = %e, "news fetch failed");
            Vec::new()
        }
    }
}
