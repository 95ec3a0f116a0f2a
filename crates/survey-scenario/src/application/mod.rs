//! Application services for presenting survey rounds.

pub mod round_presenter;
