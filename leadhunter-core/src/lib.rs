//! LeadHunter Core - Lead model, storage, configuration and export
//!
//! Holds everything the search and web layers share: the business lead
//! types and fixed vocabularies, the lead store, CSV/Excel rendering, and
//! process-wide configuration and tracing setup.

pub mod catalog;
pub mod config;
pub mod export;
pub mod lead;
pub mod storage;
pub mod tracing_setup;

pub use config::{LeadHunterConfig, ProviderKind, SearchConfig};
pub use export::{ExportError, leads_to_csv, leads_to_excel};
pub use lead::{BusinessLead, FieldError, InvalidSearchParams, LeadRecord, SearchParams, StoredLead};
pub use storage::{InMemoryLeadStore, LeadFilter, LeadStore, SqliteLeadStore, StorageError};

/// Errors that can bubble up from any core subsystem.
#[derive(Debug, thiserror::Error)]
pub enum LeadHunterError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Invalid search: {0}")]
    InvalidSearch(#[from] InvalidSearchParams),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LeadHunterError {
    /// Returns a message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            LeadHunterError::Storage(_) => "Lead storage is unavailable".to_string(),
            LeadHunterError::Export(_) => "Could not generate the export file".to_string(),
            LeadHunterError::InvalidSearch(e) => e
                .errors
                .iter()
                .map(|field| field.message.as_str())
                .collect::<Vec<_>>()
                .join("; "),
            LeadHunterError::Io(_) => "File system error occurred".to_string(),
        }
    }

    /// Checks if this error is due to user input validation.
    pub fn is_user_error(&self) -> bool {
        matches!(self, LeadHunterError::InvalidSearch(_))
    }
}

pub type Result<T> = std::result::Result<T, LeadHunterError>;
