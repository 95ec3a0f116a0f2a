//! The static survey catalog: axes, questions and survey groups.
//!
//! Loaded once at startup from YAML and validated up front, so every
//! configuration error surfaces before the first round is presented.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use survey_core::error::DomainError;

use super::axis::{AxisTable, ConditionAxis};
use super::combinations::{MAX_COMBINATIONS, combination_count};
use super::question::{ORDINAL_SEPARATOR, QuestionDefinition};

/// Catalog shipped with the service.
const BUILTIN_CATALOG: &str = include_str!("../../catalog/builtin.yaml");

/// A fixed set of questions answered together in every round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyGroup {
    /// Group identifier.
    pub id: u32,
    /// Display name, stored with every response.
    pub name: String,
    /// Questions presented each round, in order.
    pub question_ids: Vec<u32>,
}

/// Serialized form of the catalog.
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    total_rounds: u32,
    axes: Vec<ConditionAxis>,
    questions: Vec<QuestionDefinition>,
    groups: Vec<SurveyGroup>,
}

/// Validated, immutable survey configuration.
#[derive(Debug, Clone)]
pub struct SurveyCatalog {
    total_rounds: u32,
    axes: AxisTable,
    questions: Vec<QuestionDefinition>,
    groups: Vec<SurveyGroup>,
    version: String,
}

fn config_error(message: String) -> DomainError {
    DomainError::Configuration(message)
}

impl SurveyCatalog {
    /// Loads the catalog embedded in the binary.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Configuration` if the embedded catalog is invalid.
    pub fn builtin() -> Result<Self, DomainError> {
        Self::from_yaml_str(BUILTIN_CATALOG)
    }

    /// Parses and validates a YAML catalog.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Configuration` if the YAML is malformed or the
    /// catalog is inconsistent.
    pub fn from_yaml_str(source: &str) -> Result<Self, DomainError> {
        let document: CatalogDocument = serde_yaml::from_str(source)
            .map_err(|e| config_error(format!("catalog parse failed: {e}")))?;

        let version = hex::encode(Sha256::digest(source.as_bytes()));

        let catalog = Self {
            total_rounds: document.total_rounds,
            axes: AxisTable::new(document.axes)?,
            questions: document.questions,
            groups: document.groups,
            version,
        };
        catalog.validate()?;

        tracing::info!(
            version = %catalog.version,
            axes = catalog.axes.len(),
            questions = catalog.questions.len(),
            groups = catalog.groups.len(),
            "survey catalog loaded"
        );

        Ok(catalog)
    }

    fn validate(&self) -> Result<(), DomainError> {
        if self.total_rounds == 0 {
            return Err(config_error("total_rounds must be at least 1".to_owned()));
        }

        for axis in self.axes.iter() {
            if axis.option_values.is_empty() {
                return Err(config_error(format!(
                    "condition axis '{}' has no option values",
                    axis.key
                )));
            }
            if let Some(value) = axis
                .value_descriptions
                .keys()
                .find(|value| !axis.offers(value))
            {
                return Err(config_error(format!(
                    "condition axis '{}' describes unknown value '{value}'",
                    axis.key
                )));
            }
        }

        let mut question_ids = HashSet::new();
        for question in &self.questions {
            if !question_ids.insert(question.id) {
                return Err(config_error(format!("duplicate question id {}", question.id)));
            }
            self.validate_question(question)?;
        }

        let mut group_ids = HashSet::new();
        for group in &self.groups {
            if !group_ids.insert(group.id) {
                return Err(config_error(format!("duplicate group id {}", group.id)));
            }
            if group.question_ids.is_empty() {
                return Err(config_error(format!("group {} has no questions", group.id)));
            }
            let mut seen = HashSet::new();
            for question_id in &group.question_ids {
                if !question_ids.contains(question_id) {
                    return Err(config_error(format!(
                        "group {} references unknown question {question_id}",
                        group.id
                    )));
                }
                if !seen.insert(question_id) {
                    return Err(config_error(format!(
                        "group {} lists question {question_id} twice",
                        group.id
                    )));
                }
            }
        }

        Ok(())
    }

    fn validate_question(&self, question: &QuestionDefinition) -> Result<(), DomainError> {
        if question.options.is_empty() {
            return Err(config_error(format!(
                "question {} has no answer options",
                question.id
            )));
        }
        if !question.prompt_text.contains(ORDINAL_SEPARATOR) {
            return Err(config_error(format!(
                "question {} prompt lacks an ordinal prefix",
                question.id
            )));
        }

        let mut keys = HashSet::new();
        let mut labels = BTreeSet::new();
        let mut value_lists = Vec::with_capacity(question.condition_axis_keys.len());
        for key in &question.condition_axis_keys {
            let axis = self.axes.resolve(key)?;
            if !keys.insert(key.as_str()) {
                return Err(config_error(format!(
                    "question {} lists axis '{key}' twice",
                    question.id
                )));
            }
            if !labels.insert(axis.label.as_str()) {
                return Err(config_error(format!(
                    "question {} has two axes labelled '{}'",
                    question.id, axis.label
                )));
            }
            value_lists.push(axis.option_values.as_slice());
        }

        match combination_count(&value_lists) {
            Some(count) if count <= MAX_COMBINATIONS => Ok(()),
            _ => Err(config_error(format!(
                "question {} exceeds {MAX_COMBINATIONS} scenarios",
                question.id
            ))),
        }
    }

    /// Number of rounds each respondent completes.
    #[must_use]
    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    /// The global axis table.
    #[must_use]
    pub fn axes(&self) -> &AxisTable {
        &self.axes
    }

    /// All question definitions, in catalog order.
    #[must_use]
    pub fn questions(&self) -> &[QuestionDefinition] {
        &self.questions
    }

    /// All survey groups, in catalog order.
    #[must_use]
    pub fn groups(&self) -> &[SurveyGroup] {
        &self.groups
    }

    /// Hex SHA-256 of the catalog source.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Looks up a question by id.
    #[must_use]
    pub fn question(&self, id: u32) -> Option<&QuestionDefinition> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Looks up a group by id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if no group has this id.
    pub fn group(&self, id: u32) -> Result<&SurveyGroup, DomainError> {
        self.groups
            .iter()
            .find(|g| g.id == id)
            .ok_or_else(|| DomainError::NotFound(format!("survey group {id}")))
    }

    /// Returns the questions of `group`, in group order.
    pub fn group_questions<'a>(
        &'a self,
        group: &'a SurveyGroup,
    ) -> impl Iterator<Item = &'a QuestionDefinition> + 'a {
        group.question_ids.iter().filter_map(|id| self.question(*id))
    }

    /// Checks that `round` lies within `1..=total_rounds`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` otherwise.
    pub fn check_round(&self, round: u32) -> Result<(), DomainError> {
        if (1..=self.total_rounds).contains(&round) {
            Ok(())
        } else {
            Err(DomainError::Validation(format!(
                "round must be between 1 and {}, got {round}",
                self.total_rounds
            )))
        }
    }
}
