//! Route modules organized by audience.

use axum::Router;

use crate::state::AppState;

pub mod admin;
pub mod health;
pub mod survey;

/// Returns the full application router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/api/v1/survey", survey::router())
        .nest("/api/v1/admin", admin::router())
}
