//! Query handlers for the Responses context.
//!
//! Stored rounds are decoded and grouped per respondent (name plus employee
//! id) into read-only views for the admin dashboard.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use survey_core::error::DomainError;
use survey_core::repository::ResponseRepository;
use uuid::Uuid;

use crate::domain::round::RoundResponse;

/// Column the respondent list is sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Respondent name.
    #[default]
    Name,
    /// Job category.
    Job,
    /// Years of service, numerically.
    Years,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

/// Filter and sort options for the respondent list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RespondentFilter {
    /// Substring matched against name, affiliation and employee id.
    #[serde(default)]
    pub search: Option<String>,
    /// Exact job category.
    #[serde(default)]
    pub job: Option<String>,
    /// Exact survey group name.
    #[serde(default)]
    pub survey_group: Option<String>,
    /// Sort column.
    #[serde(default)]
    pub sort_by: SortKey,
    /// Sort direction.
    #[serde(default)]
    pub order: SortOrder,
}

impl RespondentFilter {
    fn matches(&self, response: &RoundResponse) -> bool {
        let profile = &response.profile;
        let search_ok = self.search.as_deref().is_none_or(|term| {
            profile.name.contains(term)
                || profile.affiliation.contains(term)
                || profile.employee_id.contains(term)
        });
        let job_ok = self.job.as_deref().is_none_or(|job| profile.job == job);
        let group_ok = self
            .survey_group
            .as_deref()
            .is_none_or(|group| response.survey_group == group);
        search_ok && job_ok && group_ok
    }
}

/// One respondent's progress through the survey.
#[derive(Debug, Clone, Serialize)]
pub struct RespondentSummary {
    /// Respondent name.
    pub name: String,
    /// Employee number.
    pub employee_id: String,
    /// Employing company.
    pub affiliation: String,
    /// Grade or rank.
    pub position: String,
    /// Department.
    pub department: String,
    /// Job category.
    pub job: String,
    /// Years of service.
    pub years: u32,
    /// Survey group answered.
    pub survey_group: String,
    /// Distinct rounds completed.
    pub completed_rounds: u32,
    /// `completed_rounds / total_rounds` as a rounded percentage.
    pub completion_percent: u32,
    /// Time of the most recent round.
    pub latest_saved_at: DateTime<Utc>,
}

/// Headline figures across every stored response.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    /// Stored round responses.
    pub total_responses: u32,
    /// Distinct respondents.
    pub unique_respondents: u32,
    /// Mean completion across respondents, as a rounded percentage.
    pub average_completion_percent: u32,
    /// Time of the most recent round, if any.
    pub latest_saved_at: Option<DateTime<Utc>>,
}

/// The admin dashboard: headline figures plus the filtered respondent list.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    /// Headline figures (unfiltered).
    pub stats: DashboardStats,
    /// Respondents matching the filter, sorted.
    pub respondents: Vec<RespondentSummary>,
}

/// A stored round as returned to the admin.
#[derive(Debug, Clone, Serialize)]
pub struct RoundResponseView {
    /// Identifier of the stored response.
    pub response_id: Uuid,
    /// Time the round was recorded.
    pub saved_at: DateTime<Utc>,
    /// The round itself.
    #[serde(flatten)]
    pub response: RoundResponse,
}

fn ratio_percent(numerator: u64, denominator: u64) -> u32 {
    if denominator == 0 {
        return 0;
    }
    let rounded = (numerator * 100 + denominator / 2) / denominator;
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

fn decode_all(
    stored: &[survey_core::repository::StoredResponse],
) -> Result<Vec<RoundResponseView>, DomainError> {
    stored
        .iter()
        .map(|row| {
            Ok(RoundResponseView {
                response_id: row.response_id,
                saved_at: row.saved_at,
                response: RoundResponse::from_stored(row)?,
            })
        })
        .collect()
}

fn compare(a: &RespondentSummary, b: &RespondentSummary, key: SortKey) -> Ordering {
    let primary = match key {
        SortKey::Name => a.name.cmp(&b.name),
        SortKey::Job => a.job.cmp(&b.job),
        SortKey::Years => a.years.cmp(&b.years),
    };
    primary
        .then_with(|| a.employee_id.cmp(&b.employee_id))
        .then_with(|| a.name.cmp(&b.name))
}

struct Accumulator {
    summary: RespondentSummary,
    rounds: BTreeSet<u32>,
}

/// Builds the admin dashboard.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if loading or decoding fails.
pub async fn list_respondents(
    filter: &RespondentFilter,
    total_rounds: u32,
    repo: &dyn ResponseRepository,
) -> Result<DashboardView, DomainError> {
    let rows = decode_all(&repo.load_responses().await?)?;

    let unique: BTreeSet<(&str, &str)> = rows
        .iter()
        .map(|r| {
            (
                r.response.profile.name.as_str(),
                r.response.profile.employee_id.as_str(),
            )
        })
        .collect();
    let stats = DashboardStats {
        total_responses: count(rows.len()),
        unique_respondents: count(unique.len()),
        average_completion_percent: ratio_percent(
            rows.len() as u64,
            unique.len() as u64 * u64::from(total_rounds),
        ),
        latest_saved_at: rows.iter().map(|r| r.saved_at).max(),
    };

    let mut grouped: HashMap<(String, String), Accumulator> = HashMap::new();
    for row in rows.iter().filter(|r| filter.matches(&r.response)) {
        let profile = &row.response.profile;
        let key = (profile.name.clone(), profile.employee_id.clone());
        let entry = grouped.entry(key).or_insert_with(|| Accumulator {
            summary: RespondentSummary {
                name: profile.name.clone(),
                employee_id: profile.employee_id.clone(),
                affiliation: profile.affiliation.clone(),
                position: profile.position.clone(),
                department: profile.department.clone(),
                job: profile.job.clone(),
                years: profile.years_of_service(),
                survey_group: row.response.survey_group.clone(),
                completed_rounds: 0,
                completion_percent: 0,
                latest_saved_at: row.saved_at,
            },
            rounds: BTreeSet::new(),
        });
        entry.rounds.insert(row.response.round);
        entry.summary.latest_saved_at = entry.summary.latest_saved_at.max(row.saved_at);
    }

    let mut respondents: Vec<RespondentSummary> = grouped
        .into_values()
        .map(|mut acc| {
            acc.summary.completed_rounds = count(acc.rounds.len());
            acc.summary.completion_percent = ratio_percent(
                u64::from(acc.summary.completed_rounds),
                u64::from(total_rounds),
            );
            acc.summary
        })
        .collect();

    respondents.sort_by(|a, b| {
        let ordering = compare(a, b, filter.sort_by);
        match filter.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });

    Ok(DashboardView { stats, respondents })
}

/// Retrieves every round one respondent has submitted, in round order.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the respondent has no rounds.
/// Returns `DomainError::Infrastructure` if loading or decoding fails.
pub async fn get_respondent_history(
    employee_id: &str,
    repo: &dyn ResponseRepository,
) -> Result<Vec<RoundResponseView>, DomainError> {
    let stored = repo.load_responses_for(employee_id).await?;
    if stored.is_empty() {
        return Err(DomainError::NotFound(format!("respondent {employee_id}")));
    }
    decode_all(&stored)
}
