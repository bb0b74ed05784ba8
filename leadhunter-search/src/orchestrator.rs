//! Search orchestration over region and business type pairs.

use std::sync::Arc;

use async_trait::async_trait;
use leadhunter_core::{BusinessLead, InvalidSearchParams, LeadStore, SearchParams};

use crate::errors::LeadSearchError;

/// Source of leads for a single pair.
#[async_trait]
pub trait LeadSource: Send + Sync {
    /// Find leads for one region and business type.
    ///
    /// # Errors
    /// - `LeadSearchError` - The pair could not be searched
    async fn find_leads(
        &self,
        region: &str,
        business_type: &str,
    ) -> Result<Vec<BusinessLead>, LeadSearchError>;
}

/// Result of one search request.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Leads in pair order: regions outer, business types inner.
    pub leads: Vec<BusinessLead>,
    /// Number of leads written to the store, `None` when saving failed.
    pub persisted: Option<usize>,
    /// Pairs whose search failed and contributed no leads.
    pub failed_pairs: usize,
}

/// Runs validated searches pair by pair and persists the combined result.
pub struct SearchOrchestrator {
    source: Arc<dyn LeadSource>,
    store: Arc<dyn LeadStore>,
}

impl SearchOrchestrator {
    pub fn new(source: Arc<dyn LeadSource>, store: Arc<dyn LeadStore>) -> Self {
        Self { source, store }
    }

    /// Validates the parameters and searches every pair sequentially.
    ///
    /// A failing pair is logged and skipped. A failing store is logged and the
    /// collected leads are still returned.
    ///
    /// # Errors
    /// - `InvalidSearchParams` - A list is empty or holds an unknown label
    pub async fn search(&self, params: SearchParams) -> Result<SearchOutcome, InvalidSearchParams> {
        let params = params.validate()?;
        let pair_count = params.regions.len() * params.business_types.len();
        tracing::info!(
            "Searching {} regions x {} business types ({pair_count} pairs)",
            params.regions.len(),
            params.business_types.len()
        );

        let mut leads = Vec::new();
        let mut failed_pairs = 0;
        for (region, business_type) in params.pairs() {
            match self.source.find_leads(region, business_type).await {
                Ok(found) => {
                    tracing::debug!("{} leads for {business_type} in {region}", found.len());
                    leads.extend(found);
                }
                Err(e) => {
                    tracing::error!("Error searching for {business_type} in {region}: {e}");
                    failed_pairs += 1;
                }
            }
        }

        let persisted = match self.store.save_leads(&leads).await {
            Ok(saved) => Some(saved.len()),
            Err(e) => {
                tracing::error!("Failed to save {} leads: {e}", leads.len());
                None
            }
        };

        tracing::info!(
            "Search finished: {} leads, {failed_pairs} failed pairs",
            leads.len()
        );

        Ok(SearchOutcome {
            leads,
            persisted,
            failed_pairs,
        })
    }
}

impl std::fmt::Debug for SearchOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchOrchestrator").finish_non_exhaustive()
    }
}
