//! Command handlers for the Responses context.
//!
//! This module contains application-level command handler functions that
//! orchestrate domain logic: validate the submission, stamp it, persist it.

use serde::Serialize;
use survey_core::clock::Clock;
use survey_core::command::Command;
use survey_core::error::DomainError;
use survey_core::repository::ResponseRepository;
use survey_scenario::domain::catalog::SurveyCatalog;
use tracing::info;
use uuid::Uuid;

use crate::domain::commands::SubmitRound;
use crate::domain::round::RoundResponse;

/// Result of a successfully recorded round.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitRoundResult {
    /// Identifier of the stored response.
    pub response_id: Uuid,
    /// The round recorded.
    pub round: u32,
    /// Rounds in the full survey.
    pub total_rounds: u32,
    /// `true` once the final round has been recorded.
    pub survey_completed: bool,
}

/// Handles the `SubmitRound` command: validates the round against the
/// catalog and appends it to the repository.
///
/// # Errors
///
/// Returns `DomainError` if validation or appending fails. Nothing is
/// persisted when validation fails.
pub async fn handle_submit_round(
    command: &SubmitRound,
    catalog: &SurveyCatalog,
    clock: &dyn Clock,
    repo: &dyn ResponseRepository,
) -> Result<SubmitRoundResult, DomainError> {
    let response = RoundResponse::assemble(catalog, command)?;
    let response_id = Uuid::new_v4();
    let stored = response.to_stored(response_id, clock.now())?;

    repo.append_response(&stored).await?;

    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        %response_id,
        survey_group = %response.survey_group,
        round = response.round,
        "round response recorded"
    );

    Ok(SubmitRoundResult {
        response_id,
        round: response.round,
        total_rounds: catalog.total_rounds(),
        survey_completed: response.round == catalog.total_rounds(),
    })
}
