//! Question definitions: the immutable templates a round presents.

use serde::{Deserialize, Serialize};

/// Separator between a prompt's ordinal prefix and its body.
pub const ORDINAL_SEPARATOR: &str = ". ";

/// An immutable question template from the static catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDefinition {
    /// Numeric question identifier.
    pub id: u32,
    /// Full prompt, e.g. `"3. How likely is ..."`.
    pub prompt_text: String,
    /// Axis keys, in the order conditions are presented.
    #[serde(default)]
    pub condition_axis_keys: Vec<String>,
    /// Fixed answer choices.
    pub options: Vec<String>,
    /// Category tag (performance shaping factor).
    pub psf: String,
}

impl QuestionDefinition {
    /// Returns the ordinal prefix, terminator included (`"3."`).
    ///
    /// A prompt without the separator is treated as all prefix.
    #[must_use]
    pub fn ordinal_prefix(&self) -> String {
        match self.prompt_text.split_once(ORDINAL_SEPARATOR) {
            Some((prefix, _)) => format!("{prefix}."),
            None => self.prompt_text.clone(),
        }
    }

    /// Returns the prompt body after the ordinal prefix.
    #[must_use]
    pub fn body(&self) -> &str {
        self.prompt_text
            .split_once(ORDINAL_SEPARATOR)
            .map_or("", |(_, body)| body)
    }

    /// Returns `true` if `answer` is one of the fixed choices.
    #[must_use]
    pub fn accepts(&self, answer: &str) -> bool {
        self.options.iter().any(|o| o == answer)
    }
}
