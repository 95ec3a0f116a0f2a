//! Write-side inputs.

use uuid::Uuid;

/// A request to change recorded state, such as submitting a round.
///
/// Handlers log `command_type` and `correlation_id` with every outcome so a
/// request can be followed from the HTTP layer to the stored row.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Dotted name, `<context>.<action>`.
    fn command_type(&self) -> &'static str;

    /// Identifier shared by every log line the command produces.
    fn correlation_id(&self) -> Uuid;
}
