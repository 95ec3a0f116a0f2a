//! Test repositories — mock `ResponseRepository` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use survey_core::error::DomainError;
use survey_core::repository::{ResponseRepository, StoredResponse};

/// An in-memory repository that keeps every appended response and serves
/// reads from them, ordered the way the PostgreSQL repository orders them.
#[derive(Debug, Default)]
pub struct RecordingResponseRepository {
    stored: Mutex<Vec<StoredResponse>>,
}

impl RecordingResponseRepository {
    /// Create an empty recording repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with `responses`.
    #[must_use]
    pub fn with_responses(responses: Vec<StoredResponse>) -> Self {
        Self {
            stored: Mutex::new(responses),
        }
    }

    /// Returns a snapshot of every stored response, in append order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn appended_responses(&self) -> Vec<StoredResponse> {
        self.stored.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResponseRepository for RecordingResponseRepository {
    async fn append_response(&self, response: &StoredResponse) -> Result<(), DomainError> {
        self.stored.lock().unwrap().push(response.clone());
        Ok(())
    }

    async fn load_responses(&self) -> Result<Vec<StoredResponse>, DomainError> {
        let mut responses = self.stored.lock().unwrap().clone();
        responses.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
        Ok(responses)
    }

    async fn load_responses_for(
        &self,
        employee_id: &str,
    ) -> Result<Vec<StoredResponse>, DomainError> {
        let mut responses: Vec<StoredResponse> = self
            .stored
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.employee_id == employee_id)
            .cloned()
            .collect();
        responses.sort_by_key(|r| (r.round, r.saved_at));
        Ok(responses)
    }
}

/// A repository that holds nothing and silently accepts appends.
#[derive(Debug)]
pub struct EmptyResponseRepository;

#[async_trait]
impl ResponseRepository for EmptyResponseRepository {
    async fn append_response(&self, _response: &StoredResponse) -> Result<(), DomainError> {
        Ok(())
    }

    async fn load_responses(&self) -> Result<Vec<StoredResponse>, DomainError> {
        Ok(vec![])
    }

    async fn load_responses_for(
        &self,
        _employee_id: &str,
    ) -> Result<Vec<StoredResponse>, DomainError> {
        Ok(vec![])
    }
}

/// A repository that always returns an infrastructure error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingResponseRepository;

#[async_trait]
impl ResponseRepository for FailingResponseRepository {
    async fn append_response(&self, _response: &StoredResponse) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn load_responses(&self) -> Result<Vec<StoredResponse>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn load_responses_for(
        &self,
        _employee_id: &str,
    ) -> Result<Vec<StoredResponse>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}
