//! Commands for the Responses context.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use survey_core::command::Command;
use uuid::Uuid;

use super::profile::RespondentProfile;

/// One answer as submitted, with the conditions it was given under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedAnswer {
    /// The question answered.
    pub question_id: u32,
    /// The scenario presented for this question this round.
    #[serde(default)]
    pub conditions: IndexMap<String, String>,
    /// The selected option.
    pub answer: String,
}

/// Command to record one completed round.
#[derive(Debug, Clone)]
pub struct SubmitRound {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Who answered.
    pub profile: RespondentProfile,
    /// The survey group answered.
    pub group_id: u32,
    /// Round number, starting at 1.
    pub round: u32,
    /// One answer per question of the group.
    pub answers: Vec<SubmittedAnswer>,
}

impl Command for SubmitRound {
    fn command_type(&self) -> &'static str {
        "responses.submit_round"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
