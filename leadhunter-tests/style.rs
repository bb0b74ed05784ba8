//! Style Enforcement Tests
//!
//! Scans the workspace crates for patterns clippy does not reject by default.
//!
//! - `panic_free_production` - No `unwrap()`, `expect()` or `#[allow(dead_code)]`
//!   outside test modules

#[path = "style/panic_free_production.rs"]
mod panic_free_production;
