//! Shared test mocks and utilities for the scenario survey service.

mod clock;
mod repository;
mod rng;

pub use clock::{FixedClock, SteppingClock};
pub use repository::{
    EmptyResponseRepository, FailingResponseRepository, RecordingResponseRepository,
};
pub use rng::{MockRng, SequenceRng};
