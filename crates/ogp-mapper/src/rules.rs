//! # Rule Sets
//!
//! Parses rule-set text (YAML) into a typed [`RuleSet`]. The document must
//! carry a `rules` mapping of target field to rule body; `version` and
//! `priorities` are optional and informational.
//!
//! Only two things fail the whole parse: malformed text, and a `rules` key
//! that is missing or empty-ish (`null`, `false`, `0`, `""`). Any other
//! `rules` value is enumerated leniently: a sequence yields its elements
//! under their index (`"0"`, `"1"`, ...) and a scalar yields no rules. An
//! individual rule with an odd shape (a body that is not a mapping, or no
//! usable `source`) is skipped at evaluation time.

use serde_json::Value;

use crate::error::RuleSetError;
use crate::normalize::{string_form, NormalizationStep};
use crate::selector::SelectorPath;

/// Extraction and normalization instructions for one target field.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Rule {
    /// Where to read values. `None` means the rule is skipped.
    pub source: Option<SelectorPath>,
    /// Normalization steps, in application order.
    pub normalize: Vec<NormalizationStep>,
    /// Values used when resolution and normalization produce nothing.
    /// Never an empty vector.
    pub fallback: Option<Vec<Value>>,
}

impl Rule {
    /// A rule reading from `source` with no steps and no fallback.
    pub fn new(source: &str) -> Self {
        Self {
            source: Some(SelectorPath::parse(source)),
            ..Self::default()
        }
    }

    /// Append normalization steps.
    pub fn with_steps(mut self, steps: impl IntoIterator<Item = NormalizationStep>) -> Self {
        self.normalize.extend(steps);
        self
    }

    /// Set the fallback, applying the same coercion as the parser.
    pub fn with_fallback(mut self, fallback: Value) -> Self {
        self.fallback = coerce_fallback(&fallback);
        self
    }

    /// Interpret a rule body from the parsed rule set.
    pub fn from_value(body: &Value) -> Self {
        let Value::Object(obj) = body else {
            return Self::default();
        };

        let source = match obj.get("source") {
            Some(Value::String(path)) if !path.is_empty() => Some(SelectorPath::parse(path)),
            _ => None,
        };

        let normalize = match obj.get("normalize") {
            Some(Value::Array(entries)) => entries
                .iter()
                .flat_map(NormalizationStep::from_value)
                .collect(),
            Some(entry @ Value::Object(_)) => NormalizationStep::from_value(entry),
            _ => Vec::new(),
        };

        let fallback = obj.get("fallback").and_then(coerce_fallback);

        Self {
            source,
            normalize,
            fallback,
        }
    }
}

/// Scalars become one-element sequences, arrays pass through. Null and the
/// empty array count as "no fallback".
fn coerce_fallback(value: &Value) -> Option<Vec<Value>> {
    match value {
        Value::Null => None,
        Value::Array(items) if items.is_empty() => None,
        Value::Array(items) => Some(items.clone()),
        scalar => Some(vec![scalar.clone()]),
    }
}

/// A parsed rule set: target fields and their rules, in document order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RuleSet {
    /// The `version` key, in string form, if present.
    pub version: Option<String>,
    /// The `priorities` list (source names), if present.
    pub priorities: Vec<String>,
    /// `(target field, rule)` pairs in insertion order.
    pub rules: Vec<(String, Rule)>,
}

impl RuleSet {
    /// Look up the rule for a target field.
    pub fn get(&self, target: &str) -> Option<&Rule> {
        self.rules
            .iter()
            .find(|(t, _)| t == target)
            .map(|(_, rule)| rule)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.rules.iter().map(|(t, r)| (t.as_str(), r))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Parse rule-set text.
///
/// # Errors
///
/// - [`RuleSetError::Yaml`] if the text is not valid YAML.
/// - [`RuleSetError::MissingRules`] if there is no `rules` key or its value
///   is `null`, `false`, zero or the empty string.
pub fn parse_rule_set(text: &str) -> Result<RuleSet, RuleSetError> {
    let document = ogp_core::parse_yaml_str(text)?;

    let rules = match document.get("rules") {
        None => return Err(RuleSetError::MissingRules),
        Some(value) if is_falsy(value) => return Err(RuleSetError::MissingRules),
        Some(value) => rule_entries(value),
    };

    let version = document
        .get("version")
        .filter(|v| !v.is_null())
        .map(|v| string_form(v).into_owned());

    let priorities = match document.get("priorities") {
        Some(Value::Array(names)) => names.iter().map(|n| string_form(n).into_owned()).collect(),
        _ => Vec::new(),
    };

    let rules: Vec<(String, Rule)> = rules
        .into_iter()
        .map(|(target, body)| (target, Rule::from_value(body)))
        .collect();

    for (target, rule) in &rules {
        if let Some(path) = &rule.source {
            if path.wildcard_count() > 1 {
                tracing::warn!(
                    field = %target,
                    selector = %path,
                    "selector has more than one wildcard segment; only the first is projected"
                );
            }
        }
    }

    tracing::debug!(rules = rules.len(), version = ?version, "parsed rule set");

    Ok(RuleSet {
        version,
        priorities,
        rules,
    })
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// `(target, body)` pairs of a `rules` value that is not falsy.
fn rule_entries(rules: &Value) -> Vec<(String, &Value)> {
    match rules {
        Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        other => {
            tracing::debug!(rules = %other, "rules is a scalar; no rules to evaluate");
            Vec::new()
        }
    }
}
