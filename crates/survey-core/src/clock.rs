//! Time source for response timestamps.

use chrono::{DateTime, Utc};

/// Supplies the `saved_at` stamp of recorded rounds. Handlers take a
/// `&dyn Clock` so tests can pin or step time.
pub trait Clock: Send + Sync {
    /// The current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
