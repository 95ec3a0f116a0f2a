//! Command and query handlers for the Responses context.

pub mod command_handlers;
pub mod query_handlers;
