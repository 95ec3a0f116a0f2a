//! Condition axes: the independently varying dimensions of a scenario.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use survey_core::error::DomainError;

/// Explanatory text attached to one value of an axis.
///
/// Every field is optional; absent fields are omitted from the JSON form so
/// the persisted audit record matches what was shown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueDescription {
    /// First line of explanation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Second line of explanation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description2: Option<String>,
    /// Third line of explanation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description3: Option<String>,
    /// Nominal (reference) value marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nominal: Option<String>,
}

/// A named dimension of variation, e.g. "time of day".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionAxis {
    /// Stable identifier referenced by question definitions.
    pub key: String,
    /// Display name; becomes the key of the scenario's condition map.
    pub label: String,
    /// Possible values, in presentation order.
    pub option_values: Vec<String>,
    /// Optional explanation per option value.
    #[serde(default)]
    pub value_descriptions: BTreeMap<String, ValueDescription>,
}

impl ConditionAxis {
    /// Returns the description bundle for `value`, if one is configured.
    #[must_use]
    pub fn description_for(&self, value: &str) -> Option<&ValueDescription> {
        self.value_descriptions.get(value)
    }

    /// Returns `true` if `value` is one of this axis's option values.
    #[must_use]
    pub fn offers(&self, value: &str) -> bool {
        self.option_values.iter().any(|v| v == value)
    }
}

/// The global table of condition axes, looked up by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AxisTable {
    axes: BTreeMap<String, ConditionAxis>,
}

impl AxisTable {
    /// Builds a table from a list of axes.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Configuration` if two axes share a key.
    pub fn new(axes: impl IntoIterator<Item = ConditionAxis>) -> Result<Self, DomainError> {
        let mut table = BTreeMap::new();
        for axis in axes {
            if table.contains_key(&axis.key) {
                return Err(DomainError::Configuration(format!(
                    "duplicate condition axis key '{}'",
                    axis.key
                )));
            }
            table.insert(axis.key.clone(), axis);
        }
        Ok(Self { axes: table })
    }

    /// Resolves an axis key.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Configuration` if no axis has this key. A
    /// question referencing an unknown axis means the static catalog is
    /// corrupt, so this is never a per-request error.
    pub fn resolve(&self, key: &str) -> Result<&ConditionAxis, DomainError> {
        self.axes.get(key).ok_or_else(|| {
            DomainError::Configuration(format!("unknown condition axis key '{key}'"))
        })
    }

    /// Iterates the axes in key order.
    pub fn iter(&self) -> impl Iterator<Item = &ConditionAxis> {
        self.axes.values()
    }

    /// Number of axes in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.axes.len()
    }

    /// Returns `true` if the table has no axes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }
}
