//! Shared data model layer (structs/constants only).
//!
//! ## Purpose
//! - Keep card, aggregate and report structs in one place.
//! - Avoid cyclic imports between the fetcher and the services.
//! - Make JSON output schema changes explicit and reviewable.
//!
//! ## Files
//! - `models.rs`: cards, filters, aggregates, report/output structs.
//! - `constants.rs`: stable defaults (endpoint, page size, chart palette).
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/network side effects.
//!
//! ## Compatibility note
//! Changes in these structs can affect `--json` outputs and the dashboard contract.
//! Keep schema-impacting changes synchronized with `docs/contracts/*`.

pub mod constants;
pub mod models;
