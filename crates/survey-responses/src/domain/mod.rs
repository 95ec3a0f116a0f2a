//! Domain types for respondents and their round responses.

pub mod commands;
pub mod profile;
pub mod round;
