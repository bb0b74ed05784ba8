//! Integration tests for LeadHunter
//!
//! Drive the HTTP API and the search pipeline across crate boundaries:
//! request validation, fallback data, persistence and exports.

#[path = "integration/common.rs"]
mod common;

#[path = "integration/http_api.rs"]
mod http_api;

#[path = "integration/exports.rs"]
mod exports;

#[path = "integration/persistence.rs"]
mod persistence;
