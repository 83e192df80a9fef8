use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Password-grant credentials for the Reddit API.
#[derive(Clone, Default)]
pub struct RedditCredentials {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub user_agent: String,
}

impl RedditCredentials {
    /// All four secrets present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.client_id.is_some()
            && self.client_secret.is_some()
            && self.username.is_some()
            && self.password.is_some()
    }
}

impl std::fmt::Debug for RedditCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedditCredentials")
            .field("client_id", &self.client_id.as_ref().map(|_| "[redacted]"))
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "[redacted]"),
            )
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[redacted]"))
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Upstream API keys. `None` means "not configured" and selects the fallback path.
#[derive(Clone, Default)]
pub struct ProviderKeys {
    pub aqicn: Option<String>,
    pub openweathermap: Option<String>,
    pub youtube: Option<String>,
    pub gemini: Option<String>,
    pub reddit: RedditCredentials,
}

impl std::fmt::Debug for ProviderKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "[redacted]");
        f.debug_struct("ProviderKeys")
            .field("aqicn", &redact(&self.aqicn))
            .field("openweathermap", &redact(&self.openweathermap))
            .field("youtube", &redact(&self.youtube))
            .field("gemini", &redact(&self.gemini))
            .field("reddit", &self.reddit)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Forces every upstream fetcher onto its mock path regardless of keys.
    pub demo_mode: bool,
    /// Fixed seed for all synthetic data; OS-seeded per request when `None`.
    pub rng_seed: Option<u64>,
    pub http_timeout_secs: u64,
    pub rate_limit_per_minute: usize,
    pub llm_model: String,
    pub keys: ProviderKeys,
}
