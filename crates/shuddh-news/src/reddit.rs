//! Reddit `r/news` search (password-grant OAuth).

use std::time::Duration;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::Client;
use serde::Deserialize;
use shuddh_core::{NewsItem, NewsSource, RedditCredentials};

use crate::error::NewsError;
use crate::feed::NewsFeed;

const DEFAULT_AUTH_URL: &str = "https://www.reddit.com";
const DEFAULT_API_URL: &str = "https://oauth.reddit.com";
const SEARCH_LIMIT: usize = 5;

/// Reddit OAuth token response. Failed grants come back as 200 with `error` set.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Post>,
}

#[derive(Debug, Deserialize)]
struct Post {
    data: PostData,
}

#[derive(Debug, Deserialize)]
struct PostData {
    title: Option<String>,
    selftext: Option<String>,
    permalink: Option<String>,
}

/// Credentials borrowed from a complete [`RedditCredentials`].
struct Grant<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    username: &'a str,
    password: &'a str,
}

pub struct RedditFeed {
    client: Client,
    credentials: RedditCredentials,
    auth_url: String,
    api_url: String,
}

impl RedditFeed {
    /// # Errors
    ///
    /// Returns [`NewsError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(credentials: RedditCredentials, timeout_secs: u64) -> Result<Self, NewsError> {
        Self::with_base_urls(credentials, timeout_secs, DEFAULT_AUTH_URL, DEFAULT_API_URL)
    }

    /// Creates a feed with custom token and API hosts (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::Http`] if the `reqwest::Client` cannot be built.
    pub fn with_base_urls(
        credentials: RedditCredentials,
        timeout_secs: u64,
        auth_url: &str,
        api_url: &str,
    ) -> Result<Self, NewsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            credentials,
            auth_url: auth_url.trim_end_matches('/').to_owned(),
            api_url: api_url.trim_end_matches('/').to_owned(),
        })
    }

    fn grant(&self) -> Option<Grant<'_>> {
        let c = &self.credentials;
        Some(Grant {
            client_id: c.client_id.as_deref()?,
            client_secret: c.client_secret.as_deref()?,
            username: c.username.as_deref()?,
            password: c.password.as_deref()?,
        })
    }

    async fn fetch_token(&self, grant: &Grant<'_>) -> Result<String, NewsError> {
        let response = self
            .client
            .post(format!("{}/api/v1/access_token", self.auth_url))
            .header("User-Agent", &self.credentials.user_agent)
            .basic_auth(grant.client_id, Some(grant.client_secret))
            .form(&[
                ("grant_type", "password"),
                ("username", grant.username),
                ("password", grant.password),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(NewsError::Auth(format!(
                "token exchange failed with status {}",
                response.status()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| NewsError::Auth(format!("token parse error: {e}")))?;

        match (token.access_token, token.error) {
            (Some(access_token), _) if !access_token.is_empty() => Ok(access_token),
            (_, Some(error)) => Err(NewsError::Auth(format!("token exchange rejected: {error}"))),
            _ => Err(NewsError::Auth("token response had no access_token".to_string())),
        }
    }
}

#[async_trait]
impl NewsFeed for RedditFeed {
    fn label(&self) -> &'static str {
        "reddit"
    }

    fn is_configured(&self) -> bool {
        self.credentials.is_complete()
    }

    async fn fetch(&self, city: &str) -> Result<Vec<NewsItem>, NewsError> {
        let Some(grant) = self.grant() else {
            return Err(NewsError::NotConfigured("Reddit"));
        };
        let token = self.fetch_token(&grant).await?;

        let query = format!("air quality {city}");
        let encoded = utf8_percent_encode(&query, NON_ALPHANUMERIC).to_string();
        let url = format!(
            "{}/r/news/search?q={encoded}&restrict_sr=on&sort=new&limit={SEARCH_LIMIT}",
            self.api_url
        );

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {token}"))
            .header("User-Agent", &self.credentials.user_agent)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NewsError::Status {
                source_name: "Reddit",
                status: status.as_u16(),
            });
        }

        let body: serde_json::Value = response.json().await?;
        let listing: Listing =
            serde_json::from_value(body).map_err(|source| NewsError::Deserialize {
                context: "reddit r/news search".to_string(),
                source,
            })?;

        Ok(listing.data.children.into_iter().filter_map(to_item).collect())
    }
}

fn to_item(post: Post) -> Option<NewsItem> {
    let permalink = post.data.permalink?;
    let title = post.data.title.filter(|t| !t.trim().is_empty())?;
    let snippet = post
        .data
        .selftext
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| title.clone());

    Some(NewsItem {
        title,
        snippet,
        link: format!("https://www.reddit.com{permalink}"),
        source: NewsSource::Reddit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: Option<&str>, selftext: Option<&str>, permalink: Option<&str>) -> Post {
        Post {
            data: PostData {
                title: title.map(str::to_string),
                selftext: selftext.map(str::to_string),
                permalink: permalink.map(str::to_string),
            },
        }
    }

    #[test]
    fn link_posts_use_title_as_snippet() {
        let item = to_item(post(Some("Smog in Lahore"), Some(""), Some("/r/news/comments/1/smog/")))
            .expect("item");
        assert_eq!(item.snippet, "Smog in Lahore");
        assert_eq!(item.link, "https://www.reddit.com/r/news/comments/1/smog/");
    }

    #[test]
    fn self_posts_use_selftext() {
        let item = to_item(post(Some("t"), Some("body text"), Some("/p"))).expect("item");
        assert_eq!(item.snippet, "body text");
    }

    #[test]
    fn posts_without_permalink_or_title_are_skipped() {
        assert!(to_item(post(Some("t"), None, None)).is_none());
        assert!(to_item(post(None, Some("s"), Some("/p"))).is_none());
    }

    #[test]
    fn incomplete_credentials_yield_no_grant() {
        let feed = RedditFeed::new(
            RedditCredentials {
                client_id: Some("id".into()),
                client_secret: Some("secret".into()),
                username: Some("user".into()),
                password: None,
                user_agent: "ShuddhAI/1.0".into(),
            },
            5,
        )
        .expect("feed");
        assert!(!feed.is_configured());
        assert!(feed.grant().is_none());
    }
}
