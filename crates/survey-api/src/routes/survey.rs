//! Routes for respondents: group listing, round presentation and submission.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use survey_core::error::DomainError;
use survey_responses::application::command_handlers::{self, SubmitRoundResult};
use survey_responses::domain::commands::{SubmitRound, SubmittedAnswer};
use survey_responses::domain::profile::RespondentProfile;
use survey_scenario::application::round_presenter::{self, PresentedRound};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// A question as listed in a group overview.
#[derive(Debug, Serialize)]
pub struct GroupQuestionView {
    /// Question identifier.
    pub id: u32,
    /// Ordinal prefix, e.g. `"3."`.
    pub number: String,
    /// Category tag.
    pub psf: String,
}

/// A survey group as offered to respondents.
#[derive(Debug, Serialize)]
pub struct GroupView {
    /// Group identifier.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Questions in group order.
    pub questions: Vec<GroupQuestionView>,
}

/// Response body for GET /groups.
#[derive(Debug, Serialize)]
pub struct GroupsResponse {
    /// Rounds in the full survey.
    pub total_rounds: u32,
    /// Version of the loaded catalog.
    pub catalog_version: String,
    /// Every group in the catalog.
    pub groups: Vec<GroupView>,
}

/// Request body for POST /rounds.
#[derive(Debug, Deserialize)]
pub struct StartRoundRequest {
    /// The survey group to present.
    pub group_id: u32,
    /// Round number, starting at 1.
    pub round: u32,
}

/// Request body for POST /responses.
#[derive(Debug, Deserialize)]
pub struct SubmitRoundRequest {
    /// Who answered.
    pub profile: RespondentProfile,
    /// The survey group answered.
    pub group_id: u32,
    /// Round number, starting at 1.
    pub round: u32,
    /// One answer per question of the group.
    pub answers: Vec<SubmittedAnswer>,
}

/// GET /groups
#[instrument(skip(state))]
async fn list_groups(State(state): State<AppState>) -> Json<GroupsResponse> {
    let catalog = &state.catalog;
    let groups = catalog
        .groups()
        .iter()
        .map(|group| GroupView {
            id: group.id,
            name: group.name.clone(),
            questions: catalog
                .group_questions(group)
                .map(|q| GroupQuestionView {
                    id: q.id,
                    number: q.ordinal_prefix(),
                    psf: q.psf.clone(),
                })
                .collect(),
        })
        .collect();

    Json(GroupsResponse {
        total_rounds: catalog.total_rounds(),
        catalog_version: catalog.version().to_string(),
        groups,
    })
}

/// POST /rounds
#[instrument(skip(state, request), fields(group_id = request.group_id, round = request.round))]
async fn start_round(
    State(state): State<AppState>,
    Json(request): Json<StartRoundRequest>,
) -> Result<Json<PresentedRound>, ApiError> {
    let presented = {
        let mut rng = state
            .rng
            .lock()
            .map_err(|_| DomainError::Infrastructure("random source lock poisoned".into()))?;
        round_presenter::start_round(&state.catalog, request.group_id, request.round, &mut *rng)?
    };

    info!(questions = presented.questions.len(), "round presented");

    Ok(Json(presented))
}

/// POST /responses
#[instrument(skip(state, request), fields(group_id = request.group_id, round = request.round))]
async fn submit_round(
    State(state): State<AppState>,
    Json(request): Json<SubmitRoundRequest>,
) -> Result<Json<SubmitRoundResult>, ApiError> {
    let command = SubmitRound {
        correlation_id: Uuid::new_v4(),
        profile: request.profile,
        group_id: request.group_id,
        round: request.round,
        answers: request.answers,
    };

    info!(correlation_id = %command.correlation_id, "handling submit_round command");

    let result = command_handlers::handle_submit_round(
        &command,
        &state.catalog,
        state.clock.as_ref(),
        &*state.response_repository,
    )
    .await?;

    Ok(Json(result))
}

/// Returns the router for respondent-facing routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/groups", get(list_groups))
        .route("/rounds", post(start_round))
        .route("/responses", post(submit_round))
}
