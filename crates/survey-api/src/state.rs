//! Shared application state.

use std::sync::{Arc, Mutex};

use survey_core::clock::Clock;
use survey_core::repository::ResponseRepository;
use survey_core::rng::DeterministicRng;
use survey_scenario::domain::catalog::SurveyCatalog;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Validated survey catalog.
    pub catalog: Arc<SurveyCatalog>,
    /// Time source for response timestamps.
    pub clock: Arc<dyn Clock + Send + Sync>,
    /// Random source for scenario draws.
    pub rng: Arc<Mutex<dyn DeterministicRng + Send>>,
    /// Response persistence.
    pub response_repository: Arc<dyn ResponseRepository>,
    /// Shared credential for the admin routes.
    pub admin_passphrase: Arc<str>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        catalog: Arc<SurveyCatalog>,
        clock: Arc<dyn Clock + Send + Sync>,
        rng: Arc<Mutex<dyn DeterministicRng + Send>>,
        response_repository: Arc<dyn ResponseRepository>,
        admin_passphrase: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            catalog,
            clock,
            rng,
            response_repository,
            admin_passphrase: admin_passphrase.into(),
        }
    }
}
