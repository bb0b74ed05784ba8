//! Centralized configuration for LeadHunter.
//!
//! All tunable parameters and settings are defined here to avoid
//! hard-coded values scattered throughout the codebase.

use std::path::PathBuf;
use std::time::Duration;

/// Credentials shorter than this are treated as absent.
pub const MIN_CREDENTIAL_LENGTH: usize = 20;

/// Central configuration for all LeadHunter components.
///
/// Supports environment variable overrides for runtime customization.
#[derive(Debug, Clone, Default)]
pub struct LeadHunterConfig {
    pub search: SearchConfig,
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

/// External search provider selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Google results through SerpApi (local and organic results)
    SerpApi,
    /// Google Places text search plus per-place details
    Places,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SerpApi => write!(f, "serpapi"),
            Self::Places => write!(f, "places"),
        }
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "serpapi" | "serp" => Ok(Self::SerpApi),
            "places" | "google-places" => Ok(Self::Places),
            _ => Err(format!(
                "Invalid provider: '{s}'. Valid options are: serpapi, places"
            )),
        }
    }
}

/// Locale parameters sent with every SerpApi request.
#[derive(Debug, Clone)]
pub struct SearchLocale {
    pub google_domain: &'static str,
    /// Country code (`gl`)
    pub country: &'static str,
    /// Interface language (`hl`)
    pub language: &'static str,
    pub location: &'static str,
}

impl Default for SearchLocale {
    fn default() -> Self {
        Self {
            google_domain: "google.es",
            country: "es",
            language: "es",
            location: "Spain",
        }
    }
}

/// Search provider configuration.
#[derive(Clone)]
pub struct SearchConfig {
    pub serpapi_key: String,
    pub places_api_key: String,
    /// Explicit provider choice; `None` picks the first one with a usable key
    pub provider: Option<ProviderKind>,
    pub serpapi_endpoint: String,
    pub places_endpoint: String,
    pub locale: SearchLocale,
    /// Result cap requested from the provider (`num`)
    pub result_limit: u32,
    pub request_timeout: Duration,
    /// Places looked up in detail per query
    pub places_detail_limit: usize,
    /// Pause between consecutive Places details requests
    pub places_detail_delay: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            serpapi_key: String::new(),
            places_api_key: String::new(),
            provider: None,
            serpapi_endpoint: "https://serpapi.com/search".to_string(),
            places_endpoint: "https://maps.googleapis.com/maps/api/place".to_string(),
            locale: SearchLocale::default(),
            result_limit: 20,
            request_timeout: Duration::from_secs(30),
            places_detail_limit: 10,
            places_detail_delay: Duration::from_millis(200),
        }
    }
}

// Keys stay out of logs.
impl std::fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchConfig")
            .field("serpapi_key", &redact(&self.serpapi_key))
            .field("places_api_key", &redact(&self.places_api_key))
            .field("provider", &self.provider)
            .field("serpapi_endpoint", &self.serpapi_endpoint)
            .field("places_endpoint", &self.places_endpoint)
            .field("locale", &self.locale)
            .field("result_limit", &self.result_limit)
            .field("request_timeout", &self.request_timeout)
            .field("places_detail_limit", &self.places_detail_limit)
            .field("places_detail_delay", &self.places_detail_delay)
            .finish()
    }
}

fn redact(key: &str) -> &'static str {
    if key.is_empty() { "<unset>" } else { "<redacted>" }
}

/// Returns true when a credential is long enough to be worth sending.
pub fn credential_is_plausible(key: &str) -> bool {
    key.trim().len() >= MIN_CREDENTIAL_LENGTH
}

impl SearchConfig {
    /// Provider to query.
    ///
    /// An explicit choice wins. Otherwise SerpApi is preferred when its key is
    /// usable, then Places. With no usable key SerpApi is returned and the
    /// adapter serves generated data.
    pub fn active_provider(&self) -> ProviderKind {
        if let Some(kind) = self.provider {
            return kind;
        }
        if credential_is_plausible(&self.serpapi_key) {
            ProviderKind::SerpApi
        } else if credential_is_plausible(&self.places_api_key) {
            ProviderKind::Places
        } else {
            ProviderKind::SerpApi
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Pre-built client served at `/` when set
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            static_dir: None,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Lead persistence configuration.
#[derive(Debug, Clone, Default)]
pub struct StorageConfig {
    /// SQLite URL such as `sqlite://leads.db`; `None` keeps leads in memory
    pub database_url: Option<String>,
}

impl LeadHunterConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Missing or short credentials are not an error: searches then serve
    /// generated example data.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(key) = lookup("SERPAPI_KEY") {
            config.search.serpapi_key = key;
        }
        if let Some(key) = lookup("GOOGLE_PLACES_API_KEY") {
            config.search.places_api_key = key;
        }

        if let Some(provider) = lookup("LEADHUNTER_PROVIDER") {
            match provider.parse() {
                Ok(kind) => config.search.provider = Some(kind),
                Err(e) => tracing::warn!("Ignoring LEADHUNTER_PROVIDER: {e}"),
            }
        }

        if let Some(timeout) = lookup("LEADHUNTER_REQUEST_TIMEOUT") {
            match timeout.parse::<u64>() {
                Ok(seconds) => config.search.request_timeout = Duration::from_secs(seconds),
                Err(e) => tracing::warn!("Ignoring LEADHUNTER_REQUEST_TIMEOUT '{timeout}': {e}"),
            }
        }

        if let Some(host) = lookup("LEADHUNTER_HOST") {
            config.server.host = host;
        }
        if let Some(port) = lookup("LEADHUNTER_PORT") {
            match port.parse::<u16>() {
                Ok(port) => config.server.port = port,
                Err(e) => tracing::warn!("Ignoring LEADHUNTER_PORT '{port}': {e}"),
            }
        }
        if let Some(dir) = lookup("LEADHUNTER_STATIC_DIR") {
            config.server.static_dir = Some(PathBuf::from(dir));
        }

        if let Some(url) = lookup("DATABASE_URL").filter(|url| !url.is_empty()) {
            config.storage.database_url = Some(url);
        }

        config
    }
}
