//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use survey_core::clock::Clock;
use survey_core::repository::ResponseRepository;
use survey_core::rng::DeterministicRng;
use survey_scenario::domain::catalog::SurveyCatalog;
use survey_test_support::{FixedClock, MockRng, RecordingResponseRepository, SteppingClock};
use tower::ServiceExt;

use survey_api::routes;
use survey_api::routes::admin::ADMIN_PASSPHRASE_HEADER;
use survey_api::state::AppState;

/// Passphrase configured for every test app.
pub const ADMIN_PASSPHRASE: &str = "integration-secret";

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock + Send + Sync> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

/// Build the full app router over `repo` with the built-in catalog, a
/// `MockRng` (always the first combination) and a fixed clock.
pub fn build_test_app(repo: Arc<RecordingResponseRepository>) -> Router {
    build_app(repo, MockRng, fixed_clock())
}

/// Build the full app router with a custom RNG for tests that need specific
/// scenario draws.
pub fn build_test_app_with_rng(
    repo: Arc<RecordingResponseRepository>,
    rng: impl DeterministicRng + Send + 'static,
) -> Router {
    build_app(repo, rng, fixed_clock())
}

/// Build the full app router with a clock that advances one minute per
/// submission, starting at 2026-01-15T10:00:00Z.
pub fn build_test_app_with_stepping_clock(repo: Arc<RecordingResponseRepository>) -> Router {
    let start = chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap();
    let clock = Arc::new(SteppingClock::new(start, chrono::Duration::minutes(1)));
    build_app(repo, MockRng, clock)
}

fn build_app(
    repo: Arc<RecordingResponseRepository>,
    rng: impl DeterministicRng + Send + 'static,
    clock: Arc<dyn Clock + Send + Sync>,
) -> Router {
    let catalog = Arc::new(SurveyCatalog::builtin().unwrap());
    let rng: Arc<Mutex<dyn DeterministicRng + Send>> = Arc::new(Mutex::new(rng));
    let response_repository: Arc<dyn ResponseRepository> = repo;
    let app_state = AppState::new(catalog, clock, rng, response_repository, ADMIN_PASSPHRASE);

    routes::router().with_state(app_state)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Send a GET request carrying the admin passphrase and return the response.
pub async fn admin_get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header(ADMIN_PASSPHRASE_HEADER, ADMIN_PASSPHRASE)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// A complete respondent profile.
pub fn profile(name: &str, employee_id: &str, job: &str, years: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "affiliation": "Metro Rail",
        "job": job,
        "years": years,
        "employee_id": employee_id,
        "position": "Grade 2",
        "department": "Operations",
        "gender": "Male",
        "date_of_birth": "1988-06-30",
        "office_phone": "02-555-0100",
        "company_email": "staff@example.com",
        "railroad_certification": "Class 2",
        "job_education": "Completed",
        "health_check_date": "2026-01-05",
        "body_temperature": "36.4",
        "systolic_bp": "121",
        "diastolic_bp": "79",
        "pulse": "68",
        "work_type": "Shift",
        "work_time": "14:00-22:00",
        "employee_card_number": "C-7788"
    })
}

/// Answers every presented question with the option at `choice`, echoing
/// the presented conditions.
pub fn answers_for(presented: &serde_json::Value, choice: usize) -> serde_json::Value {
    presented["questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| {
            serde_json::json!({
                "question_id": q["id"],
                "conditions": q["conditions"],
                "answer": q["options"][choice],
            })
        })
        .collect()
}

/// Presents `round` of `group_id` and submits it for `profile`.
pub async fn complete_round(
    app: &Router,
    profile: &serde_json::Value,
    group_id: u32,
    round: u32,
) -> serde_json::Value {
    let (status, presented) = post_json(
        app.clone(),
        "/api/v1/survey/rounds",
        &serde_json::json!({ "group_id": group_id, "round": round }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, result) = post_json(
        app.clone(),
        "/api/v1/survey/responses",
        &serde_json::json!({
            "profile": profile,
            "group_id": group_id,
            "round": round,
            "answers": answers_for(&presented, 3),
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "submission rejected: {result}");

    result
}
