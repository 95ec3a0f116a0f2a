//! Scenario survey — Responses bounded context.
//!
//! Validates respondent profiles and round submissions against the survey
//! catalog, persists each round as one append-only record, and aggregates
//! stored rounds into per-respondent completion summaries.

pub mod application;
pub mod domain;
