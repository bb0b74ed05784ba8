//! Lead search adapter.
//!
//! Wraps one [`SearchProvider`] and guarantees a non-empty answer for every
//! pair: whenever the provider cannot be used or returns nothing, generated
//! example leads are served instead.

use std::sync::Arc;

use async_trait::async_trait;
use leadhunter_core::config::SearchConfig;
use leadhunter_core::{BusinessLead, ProviderKind};

use crate::errors::LeadSearchError;
use crate::orchestrator::LeadSource;
use crate::providers::{PlacesProvider, ProviderQuery, SearchProvider, SerpApiProvider};
use crate::synthetic;

/// Search adapter that falls back to generated leads.
#[derive(Debug, Clone)]
pub struct LeadSearchAdapter {
    provider: Arc<dyn SearchProvider>,
}

impl LeadSearchAdapter {
    /// Creates an adapter around an existing provider.
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self { provider }
    }

    /// Creates an adapter for the provider selected by configuration.
    pub fn from_config(config: &SearchConfig) -> Self {
        let provider: Arc<dyn SearchProvider> = match config.active_provider() {
            ProviderKind::SerpApi => Arc::new(SerpApiProvider::from_config(config)),
            ProviderKind::Places => Arc::new(PlacesProvider::from_config(config)),
        };

        if provider.has_credentials() {
            tracing::info!("Lead search provider: {}", provider.name());
        } else {
            tracing::warn!(
                "{} key is missing or too short, searches will return example data",
                provider.name()
            );
        }

        Self { provider }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Returns leads for one pair. Never fails and never returns an empty list.
    pub async fn search_businesses(&self, region: &str, business_type: &str) -> Vec<BusinessLead> {
        if !self.provider.has_credentials() {
            tracing::info!(
                "{} key not configured, using example data for {business_type} in {region}",
                self.provider.name()
            );
            return synthetic::generate_leads(region, business_type);
        }

        let query = ProviderQuery::new(region, business_type);
        match self.provider.search(&query).await {
            Ok(leads) if leads.is_empty() => {
                tracing::info!(
                    "{} returned no results for '{}', using example data",
                    self.provider.name(),
                    query.text
                );
                synthetic::generate_leads(region, business_type)
            }
            Ok(leads) => {
                tracing::debug!("{} returned {} leads for '{}'", self.provider.name(), leads.len(), query.text);
                leads
            }
            Err(e) if e.is_quota_exceeded() => {
                tracing::info!("{e}; using example data for {business_type} in {region}");
                synthetic::generate_leads(region, business_type)
            }
            Err(e) => {
                tracing::warn!(
                    "{} search for '{}' failed: {e}; using example data",
                    self.provider.name(),
                    query.text
                );
                synthetic::generate_leads(region, business_type)
            }
        }
    }
}

#[async_trait]
impl LeadSource for LeadSearchAdapter {
    async fn find_leads(
        &self,
        region: &str,
        business_type: &str,
    ) -> Result<Vec<BusinessLead>, LeadSearchError> {
        Ok(self.search_businesses(region, business_type).await)
    }
}
