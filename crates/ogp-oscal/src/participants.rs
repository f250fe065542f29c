//! # Process Participants
//!
//! A BPMN export tells internal lanes apart from external ones, and marks
//! message flows that leave the organisation. Selector paths cannot filter
//! on those flags, so `ogp apply` reads them here:
//!
//! - data subjects are the labels of lanes with `external: false`;
//! - external recipients are the `targetPool`s of message flows flagged
//!   `external`.
//!
//! Both lists are trimmed, deduplicated and sorted.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::props::{PropBindings, PropValues};

/// Separator between internal and external recipients in one prop value.
pub const RECIPIENT_GROUP_SEPARATOR: &str = "; ";

/// Lane and message-flow participants of one process export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessParticipants {
    pub internal_lanes: Vec<String>,
    pub external_recipients: Vec<String>,
}

impl ProcessParticipants {
    /// Collect participants from a BPMN export. Missing or mistyped
    /// `lanes` / `messageFlows` contribute nothing.
    pub fn from_bpmn(bpmn: &Value) -> Self {
        let internal_lanes = collect(bpmn, "lanes", "label", |lane| {
            lane.get("external") == Some(&Value::Bool(false))
        });
        let external_recipients = collect(bpmn, "messageFlows", "targetPool", |flow| {
            flow.get("external").is_some_and(is_truthy)
        });
        Self {
            internal_lanes,
            external_recipients,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.internal_lanes.is_empty() && self.external_recipients.is_empty()
    }

    /// Fold the participants into pending prop values.
    ///
    /// Internal lanes replace the `data-subjects` prop. External recipients
    /// are appended to the `recipients` prop after
    /// [`RECIPIENT_GROUP_SEPARATOR`], or become its whole value when nothing
    /// was mapped. Targets without a binding are left alone.
    pub fn merge_into(&self, values: &mut PropValues, bindings: &PropBindings, separator: &str) {
        if let Some(name) = bindings.prop_for("data-subjects") {
            if !self.internal_lanes.is_empty() {
                values.set(name, self.internal_lanes.join(separator));
            }
        }
        if let Some(name) = bindings.prop_for("recipients") {
            if !self.external_recipients.is_empty() {
                let external = self.external_recipients.join(separator);
                let merged = match values.get(name) {
                    Some(mapped) if !mapped.is_empty() => {
                        format!("{mapped}{RECIPIENT_GROUP_SEPARATOR}{external}")
                    }
                    _ => external,
                };
                values.set(name, merged);
            }
        }
    }
}

fn collect(bpmn: &Value, list: &str, key: &str, keep: impl Fn(&Value) -> bool) -> Vec<String> {
    let Some(items) = bpmn.get(list).and_then(Value::as_array) else {
        return Vec::new();
    };
    let names: BTreeSet<String> = items
        .iter()
        .filter(|item| keep(*item))
        .filter_map(|item| item.get(key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();
    names.into_iter().collect()
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
