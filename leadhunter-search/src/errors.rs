//! Error types for lead search functionality.

use thiserror::Error;

/// Errors that can occur while querying a search provider.
///
/// None of these reach API callers: the adapter answers every one of them
/// with generated example data. The variants only decide how the fallback
/// is logged.
#[derive(Debug, Clone, Error)]
pub enum LeadSearchError {
    /// Provider reported that the account ran out of searches or hit a rate limit.
    #[error("{provider} quota exceeded: {reason}")]
    QuotaExceeded {
        /// Provider that refused the request
        provider: &'static str,
        /// Message reported by the provider
        reason: String,
    },

    /// Network communication error occurred during search.
    #[error("Network error: {reason}")]
    NetworkError {
        /// The reason for the network error
        reason: String,
    },

    /// Provider answered with a non-success HTTP status.
    #[error("{provider} returned HTTP {status}: {reason}")]
    HttpStatus {
        /// Provider that answered
        provider: &'static str,
        /// HTTP status code
        status: u16,
        /// Error message extracted from the body, if any
        reason: String,
    },

    /// Failed to parse the provider response.
    #[error("Parse error: {reason}")]
    ParseError {
        /// The reason for the parse error
        reason: String,
    },

    /// Provider returned an error or is unavailable.
    #[error("Provider error: {reason}")]
    ProviderError {
        /// The reason for the provider error
        reason: String,
    },
}

impl LeadSearchError {
    /// Checks if the provider refused the request because of quota or rate limits.
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, Self::QuotaExceeded { .. })
    }
}
