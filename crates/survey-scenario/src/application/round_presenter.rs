//! Presents a survey round: one freshly drawn scenario per question.
//!
//! Scenarios are never reused. Starting or restarting a round always draws
//! again, so a respondent may see different conditions for the same
//! question on every round.

use indexmap::IndexMap;
use serde::Serialize;
use survey_core::error::DomainError;
use survey_core::rng::DeterministicRng;

use crate::domain::axis::ValueDescription;
use crate::domain::catalog::SurveyCatalog;
use crate::domain::scenario::select_scenario;

/// One question as shown to the respondent.
#[derive(Debug, Clone, Serialize)]
pub struct PresentedQuestion {
    /// Question identifier.
    pub id: u32,
    /// Ordinal prefix, e.g. `"3."`.
    pub number: String,
    /// Prompt body after the ordinal prefix.
    pub body: String,
    /// Category tag.
    pub psf: String,
    /// Answer choices.
    pub options: Vec<String>,
    /// Sampled condition per axis label.
    pub conditions: IndexMap<String, String>,
    /// Descriptions for sampled values that have one.
    pub details: IndexMap<String, ValueDescription>,
}

/// A round ready to be answered.
#[derive(Debug, Clone, Serialize)]
pub struct PresentedRound {
    /// The survey group.
    pub group_id: u32,
    /// The survey group's display name.
    pub group_name: String,
    /// Round number, starting at 1.
    pub round: u32,
    /// Rounds in the full survey.
    pub total_rounds: u32,
    /// Version of the catalog the scenarios were drawn from.
    pub catalog_version: String,
    /// Questions in group order.
    pub questions: Vec<PresentedQuestion>,
}

/// Draws scenarios for every question of `group_id` for `round`.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown group,
/// `DomainError::Validation` for a round outside the survey, and propagates
/// scenario generation failures.
pub fn start_round(
    catalog: &SurveyCatalog,
    group_id: u32,
    round: u32,
    rng: &mut dyn DeterministicRng,
) -> Result<PresentedRound, DomainError> {
    let group = catalog.group(group_id)?;
    catalog.check_round(round)?;

    let mut questions = Vec::with_capacity(group.question_ids.len());
    for question in catalog.group_questions(group) {
        let scenario = select_scenario(question, catalog.axes(), rng)?;
        questions.push(PresentedQuestion {
            id: question.id,
            number: question.ordinal_prefix(),
            body: question.body().to_owned(),
            psf: question.psf.clone(),
            options: question.options.clone(),
            conditions: scenario.conditions,
            details: scenario.details,
        });
    }

    tracing::debug!(group_id, round, questions = questions.len(), "round presented");

    Ok(PresentedRound {
        group_id,
        group_name: group.name.clone(),
        round,
        total_rounds: catalog.total_rounds(),
        catalog_version: catalog.version().to_owned(),
        questions,
    })
}
