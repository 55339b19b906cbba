//! Service layer containing business logic and side-effect helpers.
//!
//! ## Service map
//! - `matcher.rs`: name/value predicates over a card's field list.
//! - `aggregate.rs`: month selection and the monthly aggregate.
//! - `report.rs`: report payload and chart specs for renderers.
//! - `dashboard.rs`: open-cards summary and monthly completion.
//! - `config.rs`: config file loading, env overrides, validation.
//! - `output.rs`: JSON/text output helpers.
//!
//! ## Conventions
//! - Matching, aggregation and assembly are pure over `&[Card]`.
//! - Network access lives in `crate::pipefy`; nothing here does I/O except config/output.
//! - Keep command handlers thin; delegate to services.

pub mod aggregate;
pub mod config;
pub mod dashboard;
pub mod matcher;
pub mod output;
pub mod report;
