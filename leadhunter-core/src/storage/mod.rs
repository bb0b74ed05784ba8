//! Storage layer for business leads.
//!
//! Defines the lead store interface with SQLite and in-memory
//! implementations. Stores only create and read; leads are immutable.

pub mod memory;
pub mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

pub use memory::InMemoryLeadStore;
pub use sqlite::SqliteLeadStore;

use crate::config::StorageConfig;
use crate::lead::{BusinessLead, StoredLead};

/// Persistence operations for business leads.
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Inserts leads as one batch and returns them with their new ids.
    ///
    /// Output order matches input order. An empty batch returns an empty
    /// vector without touching the backend.
    ///
    /// # Errors
    ///
    /// - `StorageError::Database` - If the insert or commit failed
    async fn save_leads(&self, leads: &[BusinessLead]) -> Result<Vec<StoredLead>, StorageError>;

    /// Returns stored leads matching the filter, in storage order.
    ///
    /// # Errors
    ///
    /// - `StorageError::Database` - If the query failed
    async fn get_leads(&self, filter: &LeadFilter) -> Result<Vec<StoredLead>, StorageError>;
}

/// Equality filter over region and business type.
///
/// Absent or empty values mean "no filter" for that column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LeadFilter {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default, rename = "type")]
    pub business_type: Option<String>,
}

impl LeadFilter {
    pub fn new(region: &str, business_type: &str) -> Self {
        Self {
            region: Some(region.to_string()),
            business_type: Some(business_type.to_string()),
        }
        .normalized()
    }

    /// Drops empty values so they do not filter anything.
    pub fn normalized(self) -> Self {
        Self {
            region: self.region.filter(|r| !r.is_empty()),
            business_type: self.business_type.filter(|t| !t.is_empty()),
        }
    }

    pub fn matches(&self, lead: &BusinessLead) -> bool {
        let region_ok = self
            .region
            .as_deref()
            .is_none_or(|region| region.is_empty() || lead.region == region);
        let type_ok = self
            .business_type
            .as_deref()
            .is_none_or(|t| t.is_empty() || lead.business_type == t);
        region_ok && type_ok
    }
}

/// Errors that occur during lead storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to open database: {reason}")]
    Open { reason: String },

    #[error("Migration failed: {reason}")]
    Migration { reason: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Opens the store selected by configuration.
///
/// # Errors
///
/// - `StorageError::Open` - If the database URL is invalid or unreachable
/// - `StorageError::Migration` - If the schema could not be applied
pub async fn open_store(config: &StorageConfig) -> Result<Arc<dyn LeadStore>, StorageError> {
    match config.database_url.as_deref() {
        Some(url) => {
            let store = SqliteLeadStore::connect(url).await?;
            Ok(Arc::new(store))
        }
        None => {
            tracing::warn!("No DATABASE_URL configured, leads are kept in memory only");
            Ok(Arc::new(InMemoryLeadStore::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_normalizes_empty_strings() {
        assert_eq!(LeadFilter::new("", ""), LeadFilter::default());
        assert_eq!(
            LeadFilter::new("Madrid", ""),
            LeadFilter {
                region: Some("Madrid".to_string()),
                business_type: None,
            }
        );
    }

    #[test]
    fn test_filter_matches_conjunctively() {
        let lead = BusinessLead::new("A", "Madrid", "Franchises");

        assert!(LeadFilter::default().matches(&lead));
        assert!(LeadFilter::new("Madrid", "").matches(&lead));
        assert!(LeadFilter::new("", "Franchises").matches(&lead));
        assert!(LeadFilter::new("Madrid", "Franchises").matches(&lead));
        assert!(!LeadFilter::new("Madrid", "Catering companies").matches(&lead));
        assert!(!LeadFilter::new("Murcia", "").matches(&lead));
    }

    #[tokio::test]
    async fn test_open_store_without_url_is_in_memory() {
        let store = open_store(&StorageConfig::default()).await.unwrap();
        let saved = store
            .save_leads(&[BusinessLead::new("A", "Madrid", "Franchises")])
            .await
            .unwrap();
        assert_eq!(saved.len(), 1);
    }
}
