//! # Normalization
//!
//! Cleans a resolved value sequence before deduplication:
//!
//! 1. Null values and values whose string form is empty or whitespace-only
//!    are dropped.
//! 2. Each [`NormalizationStep`] is applied in order.
//! 3. The drop filter runs again after every step, so a `map` entry that
//!    translates to `""` or `null` removes the value instead of emitting it.
//!
//! All comparisons (mask membership, map keys) use the value's string form:
//! strings as-is, numbers and booleans as their JSON text, arrays and
//! objects as compact JSON.

use std::borrow::Cow;
use std::collections::BTreeSet;

use serde_json::{Map, Value};

/// One ordered transformation of a value sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizationStep {
    /// Remove values whose string form is in the set.
    Mask(BTreeSet<String>),
    /// Replace values whose string form is a key; others pass through.
    Map(Map<String, Value>),
    /// Replace each value with its lowercased string form.
    Lowercase,
    /// Replace each value with its whitespace-trimmed string form.
    Trim,
}

impl NormalizationStep {
    /// Interpret one entry of a rule's `normalize` list.
    ///
    /// An entry carrying several recognized keys expands to several steps in
    /// the fixed order mask, map, lowercase, trim. Unrecognized keys and
    /// non-mapping entries produce no steps.
    pub fn from_value(entry: &Value) -> Vec<NormalizationStep> {
        let Value::Object(obj) = entry else {
            return Vec::new();
        };

        let mut steps = Vec::new();
        if let Some(mask) = obj.get("mask").and_then(mask_set) {
            steps.push(Self::Mask(mask));
        }
        if let Some(Value::Object(map)) = obj.get("map") {
            steps.push(Self::Map(map.clone()));
        }
        if obj.get("lowercase") == Some(&Value::Bool(true)) {
            steps.push(Self::Lowercase);
        }
        if obj.get("trim") == Some(&Value::Bool(true)) {
            steps.push(Self::Trim);
        }
        steps
    }

    /// Apply this step to a sequence.
    pub fn apply(&self, values: Vec<Value>) -> Vec<Value> {
        match self {
            Self::Mask(masked) => values
                .into_iter()
                .filter(|v| !masked.contains(string_form(v).as_ref()))
                .collect(),
            Self::Map(table) => values
                .into_iter()
                .map(|v| {
                    let replacement = table.get(string_form(&v).as_ref()).cloned();
                    replacement.unwrap_or(v)
                })
                .collect(),
            Self::Lowercase => values
                .into_iter()
                .map(|v| Value::String(string_form(&v).to_lowercase()))
                .collect(),
            Self::Trim => values
                .into_iter()
                .map(|v| Value::String(string_form(&v).trim().to_string()))
                .collect(),
        }
    }
}

fn mask_set(value: &Value) -> Option<BTreeSet<String>> {
    match value {
        Value::Array(items) => Some(items.iter().map(|v| string_form(v).into_owned()).collect()),
        Value::Null | Value::Object(_) => None,
        scalar => Some(BTreeSet::from([string_form(scalar).into_owned()])),
    }
}

/// The string form used for blank checks, mask membership, and map lookups.
pub fn string_form(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Null => Cow::Borrowed(""),
        Value::Bool(b) => Cow::Owned(b.to_string()),
        Value::Number(n) => Cow::Owned(n.to_string()),
        compound => Cow::Owned(compound.to_string()),
    }
}

fn is_blank(value: &Value) -> bool {
    value.is_null() || string_form(value).trim().is_empty()
}

/// Drop blanks, then apply `steps` in order.
pub fn normalize(values: Vec<Value>, steps: &[NormalizationStep]) -> Vec<Value> {
    let mut current: Vec<Value> = values.into_iter().filter(|v| !is_blank(v)).collect();
    for step in steps {
        current = step.apply(current);
        current.retain(|v| !is_blank(v));
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn strings(values: &[&str]) -> Vec<Value> {
        values.iter().map(|s| json!(s)).collect()
    }

    #[test]
    fn blanks_and_nulls_are_dropped_without_steps() {
        let out = normalize(
            vec![json!("a"), Value::Null, json!(""), json!("   "), json!("\t\n"), json!(0)],
            &[],
        );
        assert_eq!(out, vec![json!("a"), json!(0)]);
    }

    #[test]
    fn mask_then_map_preserves_step_order() {
        let steps = vec![
            NormalizationStep::from_value(&json!({"mask": ["SSN"]})),
            NormalizationStep::from_value(
                &json!({"map": {"E-Mail": "contact.email", "Telefon": "contact.phone"}}),
            ),
        ]
        .concat();
        let out = normalize(strings(&["E-Mail", "Telefon", "SSN"]), &steps);
        assert_eq!(out, strings(&["contact.email", "contact.phone"]));
    }

    #[test]
    fn map_before_mask_masks_mapped_values() {
        let steps = vec![
            NormalizationStep::from_value(&json!({"map": {"SSN": "id.national"}})),
            NormalizationStep::from_value(&json!({"mask": ["SSN"]})),
        ]
        .concat();
        let out = normalize(strings(&["SSN"]), &steps);
        assert_eq!(out, strings(&["id.national"]));
    }

    #[test]
    fn map_passes_unmatched_values_through() {
        let steps = NormalizationStep::from_value(&json!({"map": {"E-Mail": "contact.email"}}));
        let out = normalize(strings(&["E-Mail", "Kundennummer"]), &steps);
        assert_eq!(out, strings(&["contact.email", "Kundennummer"]));
    }

    #[test]
    fn map_uses_string_form_of_non_strings() {
        let steps = NormalizationStep::from_value(&json!({"map": {"7": "seven", "true": "yes"}}));
        let out = normalize(vec![json!(7), json!(true)], &steps);
        assert_eq!(out, strings(&["seven", "yes"]));
    }

    #[test]
    fn map_to_blank_or_null_drops_value() {
        let steps = NormalizationStep::from_value(&json!({"map": {"a": "", "b": null, "c": "  "}}));
        let out = normalize(strings(&["a", "b", "c", "d"]), &steps);
        assert_eq!(out, strings(&["d"]));
    }

    #[test]
    fn mask_matches_numbers_by_string_form() {
        let steps = NormalizationStep::from_value(&json!({"mask": [42]}));
        let out = normalize(vec![json!(42), json!("42"), json!(43)], &steps);
        assert_eq!(out, vec![json!(43)]);
    }

    #[test]
    fn scalar_mask_is_a_single_entry_set() {
        let steps = NormalizationStep::from_value(&json!({"mask": "Password"}));
        assert_eq!(steps, vec![NormalizationStep::Mask(BTreeSet::from(["Password".to_string()]))]);
    }

    #[test]
    fn lowercase_and_trim_stringify() {
        let steps = vec![
            NormalizationStep::from_value(&json!({"lowercase": true})),
            NormalizationStep::from_value(&json!({"trim": true})),
        ]
        .concat();
        let out = normalize(vec![json!("  Finanzen "), json!(12)], &steps);
        assert_eq!(out, strings(&["finanzen", "12"]));
    }

    #[test]
    fn disabled_flags_are_no_ops() {
        assert!(NormalizationStep::from_value(&json!({"lowercase": false})).is_empty());
        assert!(NormalizationStep::from_value(&json!({"trim": "sometimes"})).is_empty());
    }

    #[test]
    fn unknown_steps_are_ignored() {
        assert!(NormalizationStep::from_value(&json!({"uppercase": true})).is_empty());
        assert!(NormalizationStep::from_value(&json!("trim")).is_empty());
        assert!(NormalizationStep::from_value(&json!({"map": ["not", "a", "table"]})).is_empty());
    }

    #[test]
    fn combined_entry_expands_in_fixed_order() {
        let steps = NormalizationStep::from_value(
            &json!({"trim": true, "lowercase": true, "map": {"x": "y"}, "mask": ["z"]}),
        );
        assert!(matches!(steps[0], NormalizationStep::Mask(_)));
        assert!(matches!(steps[1], NormalizationStep::Map(_)));
        assert_eq!(steps[2], NormalizationStep::Lowercase);
        assert_eq!(steps[3], NormalizationStep::Trim);
    }

    #[test]
    fn string_form_of_compound_values_is_compact_json() {
        assert_eq!(string_form(&json!(["a", 1])), "[\"a\",1]");
        assert_eq!(string_form(&json!({"k": "v"})), "{\"k\":\"v\"}");
        assert_eq!(string_form(&Value::Null), "");
        assert_eq!(string_form(&json!(false)), "false");
    }
}
