//! Provider implementations for business lead search.

use std::time::Duration;

use async_trait::async_trait;
use leadhunter_core::{BusinessLead, catalog};

use crate::errors::LeadSearchError;

pub mod mock;
pub mod places;
pub mod serpapi;

#[cfg(test)]
pub use mock::{MockBehavior, MockProvider, StubServer};
pub use places::PlacesProvider;
pub use serpapi::SerpApiProvider;

const USER_AGENT: &str = concat!("leadhunter/", env!("CARGO_PKG_VERSION"));

/// One provider request for a region and business type pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderQuery<'a> {
    pub region: &'a str,
    pub business_type: &'a str,
    /// Free-text query sent to the provider.
    pub text: String,
}

impl<'a> ProviderQuery<'a> {
    /// Builds `"<type query> in <region query>"` from the catalog mappings.
    pub fn new(region: &'a str, business_type: &'a str) -> Self {
        let text = format!(
            "{} in {}",
            catalog::business_type_query(business_type),
            catalog::region_query(region)
        );
        Self {
            region,
            business_type,
            text,
        }
    }
}

/// Trait for business search providers.
///
/// Implementations talk to one external search API and map its results to
/// leads tagged with the query's region and business type.
#[async_trait]
pub trait SearchProvider: Send + Sync + std::fmt::Debug {
    /// Short provider name used in logs.
    fn name(&self) -> &'static str;

    /// Whether the provider holds a credential worth sending.
    fn has_credentials(&self) -> bool;

    /// Search for businesses matching the query.
    ///
    /// # Errors
    /// - `LeadSearchError::QuotaExceeded` - Account out of searches or rate limited
    /// - `LeadSearchError::NetworkError` - Network connectivity issues
    /// - `LeadSearchError::HttpStatus` - Non-success HTTP response
    /// - `LeadSearchError::ParseError` - Response body could not be decoded
    /// - `LeadSearchError::ProviderError` - Provider-specific error
    async fn search(&self, query: &ProviderQuery<'_>) -> Result<Vec<BusinessLead>, LeadSearchError>;
}

pub(crate) fn http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!("HTTP client configuration rejected, using defaults: {e}");
            reqwest::Client::new()
        })
}

pub(crate) fn network_error(provider: &str, error: reqwest::Error) -> LeadSearchError {
    LeadSearchError::NetworkError {
        reason: format!("{provider} request failed: {error}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_text_uses_catalog_mappings() {
        let query = ProviderQuery::new("Madrid", "Catering companies");
        assert_eq!(query.text, "catering company in madrid spain");
    }

    #[test]
    fn test_query_text_falls_back_to_labels() {
        let query = ProviderQuery::new("Atlantis", "Bakeries");
        assert_eq!(query.text, "Bakeries in Atlantis");
    }
}
