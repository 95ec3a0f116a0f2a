//! Routes for administrators: the respondent dashboard and per-respondent
//! history. Every route requires the admin passphrase header.

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::routing::get;
use axum::{Json, Router};
use survey_core::error::DomainError;
use survey_responses::application::query_handlers::{
    self, DashboardView, RespondentFilter, RoundResponseView,
};
use tracing::{instrument, warn};

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the admin passphrase.
pub const ADMIN_PASSPHRASE_HEADER: &str = "x-admin-passphrase";

fn authorize(headers: &HeaderMap, state: &AppState) -> Result<(), ApiError> {
    let supplied = headers
        .get(ADMIN_PASSPHRASE_HEADER)
        .and_then(|value| value.to_str().ok());

    match supplied {
        Some(passphrase) if passphrase == &*state.admin_passphrase => Ok(()),
        Some(_) => {
            warn!("admin request with wrong passphrase");
            Err(DomainError::Unauthorized("admin passphrase does not match".into()).into())
        }
        None => Err(DomainError::Unauthorized(format!(
            "missing {ADMIN_PASSPHRASE_HEADER} header"
        ))
        .into()),
    }
}

/// GET /respondents
#[instrument(skip(state, headers))]
async fn respondents(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(filter): Query<RespondentFilter>,
) -> Result<Json<DashboardView>, ApiError> {
    authorize(&headers, &state)?;

    let view = query_handlers::list_respondents(
        &filter,
        state.catalog.total_rounds(),
        &*state.response_repository,
    )
    .await?;

    Ok(Json(view))
}

/// GET /respondents/{employee_id}
#[instrument(skip(state, headers))]
async fn respondent_history(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(employee_id): Path<String>,
) -> Result<Json<Vec<RoundResponseView>>, ApiError> {
    authorize(&headers, &state)?;

    let history =
        query_handlers::get_respondent_history(&employee_id, &*state.response_repository).await?;

    Ok(Json(history))
}

/// Returns the router for admin routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/respondents", get(respondents))
        .route("/respondents/{employee_id}", get(respondent_history))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::{TimeZone, Utc};
    use serde_json::Value;
    use std::sync::{Arc, Mutex};
    use survey_core::clock::Clock;
    use survey_core::repository::ResponseRepository;
    use survey_core::rng::DeterministicRng;
    use survey_scenario::domain::catalog::SurveyCatalog;
    use survey_test_support::{
        EmptyResponseRepository, FailingResponseRepository, FixedClock, MockRng,
    };
    use tower::ServiceExt;

    const PASSPHRASE: &str = "correct horse";

    fn app_state_with(response_repository: Arc<dyn ResponseRepository>) -> AppState {
        let catalog = Arc::new(SurveyCatalog::builtin().unwrap());
        let clock: Arc<dyn Clock + Send + Sync> = Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
        ));
        let rng: Arc<Mutex<dyn DeterministicRng + Send>> = Arc::new(Mutex::new(MockRng));
        AppState::new(catalog, clock, rng, response_repository, PASSPHRASE)
    }

    async fn get(state: AppState, uri: &str, passphrase: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().uri(uri);
        if let Some(passphrase) = passphrase {
            builder = builder.header(ADMIN_PASSPHRASE_HEADER, passphrase);
        }
        let request = builder.body(Body::empty()).unwrap();

        let response = router().with_state(state).oneshot(request).await.unwrap();
        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_respondents_returns_empty_dashboard() {
        // Arrange
        let state = app_state_with(Arc::new(EmptyResponseRepository));

        // Act
        let (status, json) = get(state, "/respondents", Some(PASSPHRASE)).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["stats"]["total_responses"], 0);
        assert_eq!(json["stats"]["unique_respondents"], 0);
        assert_eq!(json["stats"]["average_completion_percent"], 0);
        assert!(json["stats"]["latest_saved_at"].is_null());
        assert_eq!(json["respondents"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_respondents_requires_passphrase_header() {
        let state = app_state_with(Arc::new(EmptyResponseRepository));

        let (status, json) = get(state, "/respondents", None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["error"], "unauthorized");
    }

    #[tokio::test]
    async fn test_respondents_rejects_wrong_passphrase() {
        let state = app_state_with(Arc::new(EmptyResponseRepository));

        let (status, _) = get(state, "/respondents", Some("battery staple")).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_wrong_passphrase_is_checked_before_loading() {
        let state = app_state_with(Arc::new(FailingResponseRepository));

        let (status, _) = get(state, "/respondents/EMP001", Some("battery staple")).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_respondents_returns_400_for_unknown_sort_key() {
        let state = app_state_with(Arc::new(EmptyResponseRepository));

        let (status, _) = get(state, "/respondents?sort_by=salary", Some(PASSPHRASE)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_respondent_history_returns_404_for_unknown_respondent() {
        let state = app_state_with(Arc::new(EmptyResponseRepository));

        let (status, json) = get(state, "/respondents/EMP404", Some(PASSPHRASE)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "not_found");
    }

    #[tokio::test]
    async fn test_respondents_returns_500_when_repository_fails() {
        let state = app_state_with(Arc::new(FailingResponseRepository));

        let (status, json) = get(state, "/respondents", Some(PASSPHRASE)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "infrastructure_error");
    }
}
