//! Rule-set error types.
//!
//! These are the only failures the mapping engine reports. Their `Display`
//! text becomes the `error` string of a [`crate::MappingOutcome`].

use thiserror::Error;

/// Errors that can occur while parsing a rule set.
#[derive(Debug, Error)]
pub enum RuleSetError {
    /// The rule-set text is not valid YAML.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The document parsed but its `rules` key is absent or empty-ish.
    #[error("No rules in YAML")]
    MissingRules,
}
