//! HTTP request handlers organized by functionality

pub mod api;
pub mod download;
pub mod errors;

// Re-export handler functions
pub use api::{CatalogResponse, api_catalog, api_health, api_leads, api_search};
pub use download::{ExportRequest, download_csv, download_excel};
pub use errors::ApiError;
