//! Round responses: one respondent's answers for one round.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use survey_core::error::DomainError;
use survey_core::repository::StoredResponse;
use survey_scenario::domain::catalog::SurveyCatalog;
use survey_scenario::domain::scenario::verify_conditions;
use uuid::Uuid;

use super::commands::{SubmitRound, SubmittedAnswer};
use super::profile::RespondentProfile;

/// An answer as recorded in the audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnsweredQuestion {
    /// The question answered.
    pub question_id: u32,
    /// The question's ordinal prefix, e.g. `"3."`.
    pub number: String,
    /// The conditions the respondent evaluated.
    pub conditions: IndexMap<String, String>,
    /// The selected option.
    pub answer: String,
}

/// A validated round, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResponse {
    /// Respondent profile, duplicated into every round.
    pub profile: RespondentProfile,
    /// Survey group identifier.
    pub group_id: u32,
    /// Survey group name.
    pub survey_group: String,
    /// Round number, starting at 1.
    pub round: u32,
    /// Version of the catalog the round was validated against.
    pub catalog_version: String,
    /// Answers in group order.
    pub questions: Vec<AnsweredQuestion>,
}

impl RoundResponse {
    /// Validates `command` against the catalog and assembles the record.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` for an unknown group, and
    /// `DomainError::Validation` if the profile is incomplete, the round is
    /// out of range, an answer is missing, duplicated, foreign to the group
    /// or not one of the question's options, or the reported conditions are
    /// not a legal scenario for the question.
    pub fn assemble(catalog: &SurveyCatalog, command: &SubmitRound) -> Result<Self, DomainError> {
        command.profile.validate()?;
        let group = catalog.group(command.group_id)?;
        catalog.check_round(command.round)?;

        let mut by_question: HashMap<u32, &SubmittedAnswer> = HashMap::new();
        for answer in &command.answers {
            if !group.question_ids.contains(&answer.question_id) {
                return Err(DomainError::Validation(format!(
                    "question {} is not part of {}",
                    answer.question_id, group.name
                )));
            }
            if by_question.insert(answer.question_id, answer).is_some() {
                return Err(DomainError::Validation(format!(
                    "question {} answered more than once",
                    answer.question_id
                )));
            }
        }

        let mut questions = Vec::with_capacity(group.question_ids.len());
        for question in catalog.group_questions(group) {
            let submitted = by_question.get(&question.id).ok_or_else(|| {
                DomainError::Validation(format!(
                    "every question must be answered; question {} is missing",
                    question.id
                ))
            })?;
            if !question.accepts(&submitted.answer) {
                return Err(DomainError::Validation(format!(
                    "'{}' is not an option of question {}",
                    submitted.answer, question.id
                )));
            }
            verify_conditions(question, catalog.axes(), &submitted.conditions)?;

            questions.push(AnsweredQuestion {
                question_id: question.id,
                number: question.ordinal_prefix(),
                conditions: submitted.conditions.clone(),
                answer: submitted.answer.clone(),
            });
        }

        Ok(Self {
            profile: command.profile.clone(),
            group_id: group.id,
            survey_group: group.name.clone(),
            round: command.round,
            catalog_version: catalog.version().to_owned(),
            questions,
        })
    }

    /// Converts to the persisted row.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if serialization fails.
    pub fn to_stored(
        &self,
        response_id: Uuid,
        saved_at: DateTime<Utc>,
    ) -> Result<StoredResponse, DomainError> {
        let payload = serde_json::to_value(self).map_err(|e| {
            DomainError::Infrastructure(format!("response serialization failed: {e}"))
        })?;
        let round = i32::try_from(self.round)
            .map_err(|_| DomainError::Infrastructure(format!("round {} overflows", self.round)))?;

        Ok(StoredResponse {
            response_id,
            respondent_name: self.profile.name.clone(),
            employee_id: self.profile.employee_id.clone(),
            job: self.profile.job.clone(),
            survey_group: self.survey_group.clone(),
            round,
            catalog_version: self.catalog_version.clone(),
            payload,
            saved_at,
        })
    }

    /// Rebuilds a round from its persisted row.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the payload cannot be decoded.
    pub fn from_stored(stored: &StoredResponse) -> Result<Self, DomainError> {
        serde_json::from_value(stored.payload.clone()).map_err(|e| {
            DomainError::Infrastructure(format!(
                "response {} deserialization failed: {e}",
                stored.response_id
            ))
        })
    }
}
