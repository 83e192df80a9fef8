//! Air-quality news for a city from YouTube, Google News and Reddit.
//!
//! Each source implements [`NewsFeed`]. [`NewsAggregator`] queries them
//! concurrently and never fails: missing credentials and upstream errors
//! are logged and yield no items.

pub mod aggregator;
pub mod error;
pub mod feed;
pub mod google_news;
pub mod reddit;
pub mod youtube;

pub use aggregator::NewsAggregator;
pub use error::NewsError;
pub use feed::NewsFeed;
pub use google_news::GoogleNewsFeed;
pub use reddit::RedditFeed;
pub use youtube::YouTubeFeed;
