//! Scenario survey — HTTP API.
//!
//! Exposes round presentation and submission to respondents and the
//! aggregated dashboard to administrators.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;
