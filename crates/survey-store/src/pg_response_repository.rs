//! `PostgreSQL` implementation of the `ResponseRepository` trait.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use survey_core::error::DomainError;
use survey_core::repository::{ResponseRepository, StoredResponse};

const SELECT_COLUMNS: &str = "SELECT response_id, respondent_name, employee_id, job, \
     survey_group, round, catalog_version, payload, saved_at FROM survey_responses";

/// PostgreSQL-backed response repository.
#[derive(Debug, Clone)]
pub struct PgResponseRepository {
    pool: PgPool,
}

impl PgResponseRepository {
    /// Creates a new `PgResponseRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn infrastructure(err: sqlx::Error) -> DomainError {
    DomainError::Infrastructure(format!("database error: {err}"))
}

fn from_row(row: &PgRow) -> Result<StoredResponse, sqlx::Error> {
    Ok(StoredResponse {
        response_id: row.try_get("response_id")?,
        respondent_name: row.try_get("respondent_name")?,
        employee_id: row.try_get("employee_id")?,
        job: row.try_get("job")?,
        survey_group: row.try_get("survey_group")?,
        round: row.try_get("round")?,
        catalog_version: row.try_get("catalog_version")?,
        payload: row.try_get("payload")?,
        saved_at: row.try_get("saved_at")?,
    })
}

#[async_trait]
impl ResponseRepository for PgResponseRepository {
    async fn append_response(&self, response: &StoredResponse) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO survey_responses (response_id, respondent_name, employee_id, job, \
             survey_group, round, catalog_version, payload, saved_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(response.response_id)
        .bind(&response.respondent_name)
        .bind(&response.employee_id)
        .bind(&response.job)
        .bind(&response.survey_group)
        .bind(response.round)
        .bind(&response.catalog_version)
        .bind(&response.payload)
        .bind(response.saved_at)
        .execute(&self.pool)
        .await
        .map_err(infrastructure)?;

        tracing::debug!(response_id = %response.response_id, "response row inserted");
        Ok(())
    }

    async fn load_responses(&self) -> Result<Vec<StoredResponse>, DomainError> {
        let rows = sqlx::query(&format!("{SELECT_COLUMNS} ORDER BY saved_at DESC"))
            .fetch_all(&self.pool)
            .await
            .map_err(infrastructure)?;
        rows.iter()
            .map(from_row)
            .collect::<Result<_, _>>()
            .map_err(infrastructure)
    }

    async fn load_responses_for(
        &self,
        employee_id: &str,
    ) -> Result<Vec<StoredResponse>, DomainError> {
        let rows = sqlx::query(&format!(
            "{SELECT_COLUMNS} WHERE employee_id = $1 ORDER BY round ASC, saved_at ASC"
        ))
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await
        .map_err(infrastructure)?;
        rows.iter()
            .map(from_row)
            .collect::<Result<_, _>>()
            .map_err(infrastructure)
    }
}
