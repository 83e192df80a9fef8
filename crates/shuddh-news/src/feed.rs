use async_trait::async_trait;
use shuddh_core::NewsItem;

use crate::error::NewsError;

/// One news source queried by city.
#[async_trait]
pub trait NewsFeed: Send + Sync {
    /// Short name used in logs (`"youtube"`, `"google_news"`, `"reddit"`).
    fn label(&self) -> &'static str;

    /// Whether the feed has every credential it needs.
    fn is_configured(&self) -> bool;

    /// Fetches up to five items about air quality in `city`.
    ///
    /// # Errors
    ///
    /// Any transport, auth or parse failure. The aggregator absorbs these.
    async fn fetch(&self, city: &str) -> Result<Vec<NewsItem>, NewsError>;
}
