//! LeadHunter Search - Business lead discovery
//!
//! Queries an external search provider per region and business type pair,
//! falls back to generated example leads whenever real data is unavailable,
//! and persists the combined result through a lead store.

#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![warn(clippy::too_many_lines)]

pub mod errors;
pub mod orchestrator;
pub mod providers;
pub mod service;
pub mod synthetic;

// Re-export main types
pub use errors::LeadSearchError;
pub use orchestrator::{LeadSource, SearchOrchestrator, SearchOutcome};
pub use providers::{PlacesProvider, ProviderQuery, SearchProvider, SerpApiProvider};
pub use service::LeadSearchAdapter;

/// Convenience type alias for Results with LeadSearchError.
pub type Result<T> = std::result::Result<T, LeadSearchError>;
