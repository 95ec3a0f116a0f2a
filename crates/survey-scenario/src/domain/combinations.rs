//! Cartesian product of condition axes.
//!
//! Enumeration order is lexicographic by axis position: the first axis is
//! the outermost loop and the last axis varies fastest. Results are fully
//! materialized, so axis tables are capped at [`MAX_COMBINATIONS`]
//! combinations per question.

use survey_core::error::DomainError;

/// Upper bound on combinations per question.
pub const MAX_COMBINATIONS: usize = 4096;

/// Number of combinations the axes produce, or `None` on overflow.
///
/// Zero axes produce zero combinations.
#[must_use]
pub fn combination_count<V: AsRef<[String]>>(axes: &[V]) -> Option<usize> {
    if axes.is_empty() {
        return Some(0);
    }
    axes.iter()
        .try_fold(1_usize, |acc, axis| acc.checked_mul(axis.as_ref().len()))
}

/// Generates every combination of one value per axis.
///
/// Tuple position `i` always holds a value drawn from `axes[i]`. Values are
/// not deduplicated: an axis listing the same value twice yields two
/// combinations carrying it.
///
/// # Errors
///
/// Returns `DomainError::Configuration` if any axis has no values (no legal
/// combination exists) or the product exceeds [`MAX_COMBINATIONS`].
pub fn generate_combinations<V: AsRef<[String]>>(
    axes: &[V],
) -> Result<Vec<Vec<String>>, DomainError> {
    if axes.is_empty() {
        return Ok(Vec::new());
    }

    if let Some(position) = axes.iter().position(|axis| axis.as_ref().is_empty()) {
        return Err(DomainError::Configuration(format!(
            "condition axis at position {position} has no values"
        )));
    }

    let count = combination_count(axes)
        .filter(|count| *count <= MAX_COMBINATIONS)
        .ok_or_else(|| {
            DomainError::Configuration(format!(
                "condition axes produce more than {MAX_COMBINATIONS} combinations"
            ))
        })?;

    let mut combinations: Vec<Vec<String>> = vec![Vec::with_capacity(axes.len())];
    for axis in axes {
        combinations = combinations
            .into_iter()
            .flat_map(|prefix| {
                axis.as_ref().iter().map(move |value| {
                    let mut combination = prefix.clone();
                    combination.push(value.clone());
                    combination
                })
            })
            .collect();
    }

    debug_assert_eq!(combinations.len(), count);
    Ok(combinations)
}
