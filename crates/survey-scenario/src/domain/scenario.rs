//! Scenario selection: one uniformly drawn combination per presentation.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use survey_core::error::DomainError;
use survey_core::rng::DeterministicRng;

use super::axis::{AxisTable, ConditionAxis, ValueDescription};
use super::combinations::generate_combinations;
use super::question::QuestionDefinition;

/// One concrete assignment of a value to every axis of a question.
///
/// Both maps are keyed by axis label and keep axis order. `details` holds an
/// entry only for labels whose chosen value has a configured description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioInstance {
    /// Axis label to sampled value.
    pub conditions: IndexMap<String, String>,
    /// Axis label to the sampled value's description bundle.
    #[serde(default)]
    pub details: IndexMap<String, ValueDescription>,
}

fn resolve_axes<'a>(
    question: &QuestionDefinition,
    axes: &'a AxisTable,
) -> Result<Vec<&'a ConditionAxis>, DomainError> {
    question
        .condition_axis_keys
        .iter()
        .map(|key| axes.resolve(key))
        .collect()
}

/// Draws a fresh scenario for `question`.
///
/// Every legal combination of the question's axes is equally likely. A
/// question without axes yields an empty scenario and consumes no
/// randomness.
///
/// # Errors
///
/// Returns `DomainError::Configuration` if an axis key is unknown, an axis
/// has no values, or two of the question's axes share a label.
/// Returns `DomainError::Infrastructure` if the RNG yields an index outside
/// the requested range.
pub fn select_scenario(
    question: &QuestionDefinition,
    axes: &AxisTable,
    rng: &mut dyn DeterministicRng,
) -> Result<ScenarioInstance, DomainError> {
    let resolved = resolve_axes(question, axes)?;
    if resolved.is_empty() {
        return Ok(ScenarioInstance::default());
    }

    let value_lists: Vec<&[String]> = resolved
        .iter()
        .map(|axis| axis.option_values.as_slice())
        .collect();
    let combinations = generate_combinations(&value_lists)?;

    let last_index = u32::try_from(combinations.len() - 1).map_err(|_| {
        DomainError::Configuration(format!(
            "question {} has too many scenarios to sample",
            question.id
        ))
    })?;
    let drawn = rng.next_u32_range(0, last_index);
    let chosen = usize::try_from(drawn)
        .ok()
        .and_then(|index| combinations.get(index))
        .ok_or_else(|| {
            DomainError::Infrastructure(format!(
                "rng returned index {drawn} outside [0, {last_index}]"
            ))
        })?;

    let mut scenario = ScenarioInstance::default();
    for (axis, value) in resolved.iter().zip(chosen) {
        if scenario
            .conditions
            .insert(axis.label.clone(), value.clone())
            .is_some()
        {
            return Err(DomainError::Configuration(format!(
                "question {} has more than one axis labelled '{}'",
                question.id, axis.label
            )));
        }
        if let Some(description) = axis.description_for(value) {
            scenario
                .details
                .insert(axis.label.clone(), description.clone());
        }
    }

    Ok(scenario)
}

/// Checks that `conditions` is a scenario `select_scenario` could have
/// produced for `question`: exactly one entry per axis label, each holding a
/// value that axis offers.
///
/// # Errors
///
/// Returns `DomainError::Validation` describing the first mismatch, or
/// `DomainError::Configuration` if the question's axes cannot be resolved.
pub fn verify_conditions(
    question: &QuestionDefinition,
    axes: &AxisTable,
    conditions: &IndexMap<String, String>,
) -> Result<(), DomainError> {
    let resolved = resolve_axes(question, axes)?;

    if conditions.len() != resolved.len() {
        return Err(DomainError::Validation(format!(
            "question {} expects {} conditions, got {}",
            question.id,
            resolved.len(),
            conditions.len()
        )));
    }

    for axis in resolved {
        let value = conditions.get(&axis.label).ok_or_else(|| {
            DomainError::Validation(format!(
                "question {} is missing condition '{}'",
                question.id, axis.label
            ))
        })?;
        if !axis.offers(value) {
            return Err(DomainError::Validation(format!(
                "question {}: '{value}' is not a value of condition '{}'",
                question.id, axis.label
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashSet};

    use survey_core::rng::SystemRng;
    use survey_test_support::{MockRng, SequenceRng};

    use super::*;

    fn night_description() -> ValueDescription {
        ValueDescription {
            description: Some("Track-side lighting only".to_owned()),
            description2: Some("Signals visible from 200 m".to_owned()),
            description3: None,
            nominal: None,
        }
    }

    fn test_axes() -> AxisTable {
        let mut time_descriptions = BTreeMap::new();
        time_descriptions.insert("Night".to_owned(), night_description());

        AxisTable::new([
            ConditionAxis {
                key: "time_of_day".to_owned(),
                label: "Time of day".to_owned(),
                option_values: vec!["Day".to_owned(), "Night".to_owned()],
                value_descriptions: time_descriptions,
            },
            ConditionAxis {
                key: "visibility".to_owned(),
                label: "Visibility".to_owned(),
                option_values: vec!["Good".to_owned(), "Fog".to_owned(), "Rain".to_owned()],
                value_descriptions: BTreeMap::new(),
            },
            ConditionAxis {
                key: "visibility_alias".to_owned(),
                label: "Visibility".to_owned(),
                option_values: vec!["Good".to_owned()],
                value_descriptions: BTreeMap::new(),
            },
        ])
        .unwrap()
    }

    fn question(keys: &[&str]) -> QuestionDefinition {
        QuestionDefinition {
            id: 1,
            prompt_text: "1. How likely is a missed signal?".to_owned(),
            condition_axis_keys: keys.iter().map(|k| (*k).to_owned()).collect(),
            options: vec!["Low".to_owned(), "High".to_owned()],
            psf: "Visibility".to_owned(),
        }
    }

    #[test]
    fn test_select_scenario_maps_labels_to_drawn_combination() {
        // Arrange: combinations are (Day,Good) (Day,Fog) (Day,Rain) (Night,Good) ...
        let axes = test_axes();
        let q = question(&["time_of_day", "visibility"]);
        let mut rng = SequenceRng::new(vec![4]);

        // Act
        let scenario = select_scenario(&q, &axes, &mut rng).unwrap();

        // Assert
        assert_eq!(scenario.conditions["Time of day"], "Night");
        assert_eq!(scenario.conditions["Visibility"], "Fog");
        let labels: Vec<&String> = scenario.conditions.keys().collect();
        assert_eq!(labels, vec!["Time of day", "Visibility"]);
    }

    #[test]
    fn test_details_copy_description_of_chosen_value() {
        let axes = test_axes();
        let q = question(&["time_of_day"]);
        let mut rng = SequenceRng::new(vec![1]);

        let scenario = select_scenario(&q, &axes, &mut rng).unwrap();

        assert_eq!(scenario.conditions["Time of day"], "Night");
        assert_eq!(scenario.details.len(), 1);
        assert_eq!(scenario.details["Time of day"], night_description());
    }

    #[test]
    fn test_details_omit_label_when_value_has_no_description() {
        let axes = test_axes();
        let q = question(&["time_of_day"]);
        let mut rng = MockRng;

        let scenario = select_scenario(&q, &axes, &mut rng).unwrap();

        assert_eq!(scenario.conditions["Time of day"], "Day");
        assert!(!scenario.details.contains_key("Time of day"));
    }

    #[test]
    fn test_details_empty_when_no_axis_has_descriptions() {
        let axes = test_axes();
        let q = question(&["visibility"]);
        let mut rng = SystemRng::seeded(11);

        for _ in 0..50 {
            let scenario = select_scenario(&q, &axes, &mut rng).unwrap();
            assert!(scenario.details.is_empty());
        }
    }

    #[test]
    fn test_repeated_draws_keep_the_same_condition_keys() {
        let axes = test_axes();
        let q = question(&["time_of_day", "visibility"]);
        let mut rng = SystemRng::from_os();

        for _ in 0..100 {
            let scenario = select_scenario(&q, &axes, &mut rng).unwrap();
            let keys: Vec<&str> = scenario.conditions.keys().map(String::as_str).collect();
            assert_eq!(keys, vec!["Time of day", "Visibility"]);
            for label in scenario.details.keys() {
                assert!(scenario.conditions.contains_key(label));
            }
            verify_conditions(&q, &axes, &scenario.conditions).unwrap();
        }
    }

    #[test]
    fn test_both_values_of_two_value_axis_appear_in_many_draws() {
        let axes = test_axes();
        let q = question(&["time_of_day"]);
        let mut rng = SystemRng::from_os();

        let seen: HashSet<String> = (0..1_000)
            .map(|_| {
                select_scenario(&q, &axes, &mut rng).unwrap().conditions["Time of day"].clone()
            })
            .collect();

        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_question_without_axes_yields_empty_scenario() {
        let axes = test_axes();
        let q = question(&[]);
        // An empty sequence panics if the RNG is consulted.
        let mut rng = SequenceRng::new(vec![]);

        let scenario = select_scenario(&q, &axes, &mut rng).unwrap();

        assert!(scenario.conditions.is_empty());
        assert!(scenario.details.is_empty());
        assert!(rng.requested_ranges().is_empty());
    }

    #[test]
    fn test_draw_spans_every_combination_of_the_question() {
        // Arrange: 3 visibility values x 2 times of day
        let axes = test_axes();
        let q = question(&["visibility", "time_of_day"]);
        let mut rng = SequenceRng::new(vec![5]);

        // Act
        let scenario = select_scenario(&q, &axes, &mut rng).unwrap();

        // Assert: one draw over [0, 5], the last index being (Rain, Night)
        assert_eq!(rng.requested_ranges(), &[(0, 5)]);
        assert_eq!(scenario.conditions["Visibility"], "Rain");
        assert_eq!(scenario.conditions["Time of day"], "Night");
    }

    #[test]
    fn test_unknown_axis_key_fails_before_drawing() {
        let axes = test_axes();
        let q = question(&["time_of_day", "gradient"]);
        let mut rng = SequenceRng::new(vec![]);

        match select_scenario(&q, &axes, &mut rng) {
            Err(DomainError::Configuration(msg)) => assert!(msg.contains("gradient")),
            other => panic!("expected Configuration, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_axis_labels_are_configuration_error() {
        let axes = test_axes();
        let q = question(&["visibility", "visibility_alias"]);
        let mut rng = MockRng;

        assert!(matches!(
            select_scenario(&q, &axes, &mut rng),
            Err(DomainError::Configuration(_))
        ));
    }

    #[test]
    fn test_out_of_range_rng_output_is_infrastructure_error() {
        let axes = test_axes();
        let q = question(&["time_of_day"]);
        let mut rng = SequenceRng::new(vec![2]);

        assert!(matches!(
            select_scenario(&q, &axes, &mut rng),
            Err(DomainError::Infrastructure(_))
        ));
    }

    #[test]
    fn test_scenario_serializes_to_label_keyed_maps() {
        let axes = test_axes();
        let q = question(&["time_of_day", "visibility"]);
        let mut rng = SequenceRng::new(vec![3]);

        let scenario = select_scenario(&q, &axes, &mut rng).unwrap();
        let json = serde_json::to_value(&scenario).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "conditions": { "Time of day": "Night", "Visibility": "Good" },
                "details": {
                    "Time of day": {
                        "description": "Track-side lighting only",
                        "description2": "Signals visible from 200 m"
                    }
                }
            })
        );
    }

    #[test]
    fn test_verify_conditions_rejects_illegal_value() {
        let axes = test_axes();
        let q = question(&["time_of_day"]);
        let mut conditions = IndexMap::new();
        conditions.insert("Time of day".to_owned(), "Dawn".to_owned());

        assert!(matches!(
            verify_conditions(&q, &axes, &conditions),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_verify_conditions_rejects_missing_and_extra_labels() {
        let axes = test_axes();
        let q = question(&["time_of_day", "visibility"]);

        let mut missing = IndexMap::new();
        missing.insert("Time of day".to_owned(), "Day".to_owned());
        assert!(verify_conditions(&q, &axes, &missing).is_err());

        let mut renamed = IndexMap::new();
        renamed.insert("Time of day".to_owned(), "Day".to_owned());
        renamed.insert("Weather".to_owned(), "Good".to_owned());
        assert!(verify_conditions(&q, &axes, &renamed).is_err());
    }
}
