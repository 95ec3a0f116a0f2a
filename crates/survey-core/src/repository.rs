//! Response repository abstraction.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DomainError;

/// Stored representation of one respondent's answers for one round.
///
/// The identity columns are duplicated out of `payload` so the store can
/// index and filter on them without parsing JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredResponse {
    /// Unique response identifier.
    pub response_id: Uuid,
    /// Respondent name, as entered.
    pub respondent_name: String,
    /// Respondent employee number.
    pub employee_id: String,
    /// Respondent job category.
    pub job: String,
    /// Name of the survey group the round belongs to.
    pub survey_group: String,
    /// Round number, starting at 1.
    pub round: i32,
    /// Version hash of the catalog the scenarios were drawn from.
    pub catalog_version: String,
    /// Serialized round response (profile, answers, sampled conditions).
    pub payload: serde_json::Value,
    /// Timestamp the round was recorded.
    pub saved_at: chrono::DateTime<chrono::Utc>,
}

/// Repository trait for appending and reading round responses.
///
/// Responses are append-only: a resubmitted round is a new row.
#[async_trait]
pub trait ResponseRepository: Send + Sync {
    /// Append one round response.
    async fn append_response(&self, response: &StoredResponse) -> Result<(), DomainError>;

    /// Load every stored response, newest first.
    async fn load_responses(&self) -> Result<Vec<StoredResponse>, DomainError>;

    /// Load one respondent's responses, ordered by round.
    async fn load_responses_for(
        &self,
        employee_id: &str,
    ) -> Result<Vec<StoredResponse>, DomainError>;
}
