//! # Rule Evaluation
//!
//! Orchestrates the pipeline for every `(target, rule)` pair, in rule-set
//! order:
//!
//! ```text
//! rule ──▶ resolve selector ──▶ normalize ──▶ distinct ──┬─▶ non-empty: result[target] = values
//!                                                        ├─▶ fallback:  result[target] = fallback
//!                                                        └─▶ otherwise: target omitted
//! ```
//!
//! ## Invariants
//!
//! - Every value list in a [`MappingResult`] is non-empty.
//! - A field holds resolved values or fallback values, never a mix.
//! - The only error is a rule-set parse failure, which replaces the whole
//!   output with [`MappingOutcome::Error`].
//! - Evaluation is deterministic; identical inputs serialize identically.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::error::RuleSetError;
use crate::normalize::normalize;
use crate::rules::{parse_rule_set, Rule, RuleSet};
use crate::sources::SourceSet;

/// Where a field's values came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueOrigin {
    /// Resolved from the sources and normalized.
    Resolved,
    /// Taken from the rule's fallback.
    Fallback,
}

/// One populated target field.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedField {
    pub target: String,
    pub values: Vec<Value>,
    pub origin: ValueOrigin,
}

/// Target fields with their values, in rule-set order.
///
/// Serializes as a JSON object of target field to value array; the origin
/// of each field is kept for callers but not serialized.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MappingResult {
    fields: Vec<MappedField>,
}

impl MappingResult {
    /// Values for `target`, or `None` when the field was omitted.
    pub fn get(&self, target: &str) -> Option<&[Value]> {
        self.field(target).map(|f| f.values.as_slice())
    }

    pub fn field(&self, target: &str) -> Option<&MappedField> {
        self.fields.iter().find(|f| f.target == target)
    }

    pub fn fields(&self) -> &[MappedField] {
        &self.fields
    }

    pub fn contains(&self, target: &str) -> bool {
        self.field(target).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The result as a JSON object value.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .map(|f| (f.target.clone(), Value::Array(f.values.clone())))
                .collect(),
        )
    }

    fn push(&mut self, field: MappedField) {
        debug_assert!(!field.values.is_empty());
        self.fields.push(field);
    }
}

impl Serialize for MappingResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for field in &self.fields {
            map.serialize_entry(&field.target, &field.values)?;
        }
        map.end()
    }
}

/// Outcome of a mapping call: `{"error": "..."}` or `{"result": {...}}`.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingOutcome {
    Error(String),
    Result(MappingResult),
}

impl MappingOutcome {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            Self::Result(_) => None,
        }
    }

    pub fn result(&self) -> Option<&MappingResult> {
        match self {
            Self::Error(_) => None,
            Self::Result(result) => Some(result),
        }
    }

    /// Convert into a standard `Result`, yielding the error message on failure.
    pub fn into_result(self) -> Result<MappingResult, String> {
        match self {
            Self::Error(message) => Err(message),
            Self::Result(result) => Ok(result),
        }
    }
}

impl From<Result<MappingResult, RuleSetError>> for MappingOutcome {
    fn from(outcome: Result<MappingResult, RuleSetError>) -> Self {
        match outcome {
            Ok(result) => Self::Result(result),
            Err(e) => Self::Error(e.to_string()),
        }
    }
}

/// Parse `rules_text` and evaluate it against `sources`.
///
/// Never panics and never returns a partial result: a rule set that fails
/// to parse yields [`MappingOutcome::Error`].
pub fn apply_mapping(sources: &SourceSet, rules_text: &str) -> MappingOutcome {
    let outcome = parse_rule_set(rules_text).map(|rule_set| evaluate(&rule_set, sources));
    if let Err(e) = &outcome {
        tracing::debug!(error = %e, "rule set rejected");
    }
    outcome.into()
}

/// Evaluate a parsed rule set.
pub fn evaluate(rule_set: &RuleSet, sources: &SourceSet) -> MappingResult {
    let mut result = MappingResult::default();
    for (target, rule) in rule_set.iter() {
        if let Some(field) = evaluate_rule(target, rule, sources) {
            result.push(field);
        }
    }
    result
}

/// Evaluate one rule. `None` means the target is omitted from the result.
pub fn evaluate_rule(target: &str, rule: &Rule, sources: &SourceSet) -> Option<MappedField> {
    let Some(selector) = &rule.source else {
        tracing::debug!(field = %target, "rule has no source; skipped");
        return None;
    };

    let raw = selector.resolve(sources);
    let values = distinct(normalize(raw, &rule.normalize));

    if !values.is_empty() {
        return Some(MappedField {
            target: target.to_string(),
            values,
            origin: ValueOrigin::Resolved,
        });
    }

    match &rule.fallback {
        Some(fallback) => {
            tracing::debug!(
                field = %target,
                selector = %selector,
                "no values resolved; using fallback"
            );
            Some(MappedField {
                target: target.to_string(),
                values: fallback.clone(),
                origin: ValueOrigin::Fallback,
            })
        }
        None => {
            tracing::debug!(
                field = %target,
                selector = %selector,
                "no values resolved; field omitted"
            );
            None
        }
    }
}

/// Drop repeated values, keeping the first occurrence of each.
fn distinct(values: Vec<Value>) -> Vec<Value> {
    let mut seen: Vec<Value> = Vec::with_capacity(values.len());
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}
