//! Scenario survey — Scenario Generation bounded context.
//!
//! Owns the static survey catalog (condition axes, question definitions,
//! survey groups) and turns a question's condition axes into one randomly
//! drawn scenario each time a round is presented.

pub mod application;
pub mod domain;
