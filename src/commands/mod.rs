//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `ingest.rs`: cards listing/filtering and config display.
//! - `reports.rs`: monthly report, completion and open-cards summary.
//!
//! ## Principles
//! - Validate CLI inputs here, before any fetch.
//! - Delegate business logic to `services/*` and fetching to `pipefy`.
//! - Keep behavior and output schema stable.

pub mod ingest;
pub mod reports;

pub use ingest::handle_ingest_commands;
pub use reports::handle_report_commands;
