//! Domain types and pure operations for scenario generation.

pub mod axis;
pub mod catalog;
pub mod combinations;
pub mod question;
pub mod scenario;
