//! Scripted random sources for scenario draws.

use survey_core::rng::DeterministicRng;

/// Always returns the lowest index offered, so every scenario draw picks the
/// first combination.
#[derive(Debug)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_u32_range(&mut self, min: u32, _max: u32) -> u32 {
        min
    }
}

/// Replays scripted indices and records the inclusive range each draw asked
/// for.
///
/// The scripted value is returned even when it lies outside the requested
/// range, which lets tests exercise out-of-range handling. Panics once the
/// script is exhausted, so an empty script also asserts that no draw happens.
#[derive(Debug, Default)]
pub struct SequenceRng {
    values: Vec<u32>,
    index: usize,
    requested: Vec<(u32, u32)>,
}

impl SequenceRng {
    /// Create a `SequenceRng` that returns `values` in order.
    #[must_use]
    pub fn new(values: Vec<u32>) -> Self {
        Self {
            values,
            ..Self::default()
        }
    }

    /// The `(min, max)` of every draw so far, in order.
    #[must_use]
    pub fn requested_ranges(&self) -> &[(u32, u32)] {
        &self.requested
    }
}

impl DeterministicRng for SequenceRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        self.requested.push((min, max));
        let Some(&value) = self.values.get(self.index) else {
            panic!(
                "SequenceRng exhausted: draw {} asked for [{min}, {max}]",
                self.index + 1
            );
        };
        self.index += 1;
        value
    }
}
