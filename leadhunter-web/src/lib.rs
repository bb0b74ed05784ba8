//! LeadHunter Web - JSON API Server

#![warn(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![warn(clippy::too_many_lines)]
//!
//! Search, lead listing and export endpoints for the browser client, with
//! the client's static build optionally served from the same origin.

pub mod handlers;
pub mod server;

// Re-export main types
pub use server::{AppState, ServerError, build_router, run_server};
