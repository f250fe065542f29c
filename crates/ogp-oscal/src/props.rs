//! # SSP Property Filling
//!
//! Records mapped privacy attributes (a record of processing activities) in
//! `system-security-plan.system-characteristics.props`. Each bound target
//! field becomes one prop whose value is the field's values joined with a
//! separator. Existing props with the same name are overwritten in place;
//! new ones are appended. `metadata.last-modified` is stamped on every run.
//!
//! The SSP is edited as a raw `serde_json::Value`, so everything outside the
//! touched paths is written back unchanged and in its original order.

use serde::Serialize;
use serde_json::{json, Map, Value};

use ogp_core::Timestamp;
use ogp_mapper::{string_form, MappingResult};

use crate::error::{OscalError, OscalResult};

/// Separator used when none is configured.
pub const DEFAULT_SEPARATOR: &str = ", ";

/// Built-in target-field → prop-name bindings.
pub const DEFAULT_BINDINGS: &[(&str, &str)] = &[
    ("purposes", "ropa:purpose"),
    ("data-categories", "ropa:data-categories"),
    ("data-subjects", "ropa:data-subjects"),
    ("recipients", "ropa:recipients"),
    ("retention", "ropa:retention"),
    ("legal-basis", "ropa:legal-basis"),
];

/// Which SSP prop each target field is written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropBindings {
    bindings: Vec<(String, String)>,
}

impl Default for PropBindings {
    fn default() -> Self {
        Self {
            bindings: DEFAULT_BINDINGS
                .iter()
                .map(|(target, prop)| (target.to_string(), prop.to_string()))
                .collect(),
        }
    }
}

impl PropBindings {
    /// No bindings at all.
    pub fn empty() -> Self {
        Self { bindings: Vec::new() }
    }

    /// Bind `target` to `prop`, replacing any earlier binding for `target`.
    pub fn bind(&mut self, target: impl Into<String>, prop: impl Into<String>) {
        let (target, prop) = (target.into(), prop.into());
        match self.bindings.iter_mut().find(|(t, _)| *t == target) {
            Some((_, existing)) => *existing = prop,
            None => self.bindings.push((target, prop)),
        }
    }

    /// Builder-style [`PropBindings::bind`] over several pairs.
    pub fn with_overrides<I, T, P>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (T, P)>,
        T: Into<String>,
        P: Into<String>,
    {
        for (target, prop) in overrides {
            self.bind(target, prop);
        }
        self
    }

    pub fn prop_for(&self, target: &str) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(t, _)| t == target)
            .map(|(_, p)| p.as_str())
    }
}

/// What [`apply_props`] changed, by prop name (skipped entries are target
/// fields with no binding).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PropsReport {
    pub updated: Vec<String>,
    pub added: Vec<String>,
    pub skipped: Vec<String>,
}

/// Rendered prop values waiting to be written, in write order.
///
/// Built from a mapping result with [`PropValues::from_mapping`], optionally
/// adjusted (see [`crate::ProcessParticipants::merge_into`]), then written
/// with [`write_props`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropValues {
    entries: Vec<(String, String)>,
    skipped: Vec<String>,
}

impl PropValues {
    /// Render every bound field of `result`, joining its values' string forms
    /// with `separator`. Unbound fields are remembered as skipped.
    pub fn from_mapping(result: &MappingResult, bindings: &PropBindings, separator: &str) -> Self {
        let mut values = Self::default();
        for field in result.fields() {
            let Some(name) = bindings.prop_for(&field.target) else {
                tracing::debug!(field = %field.target, "no prop binding; skipped");
                values.skipped.push(field.target.clone());
                continue;
            };
            let rendered: Vec<_> = field.values.iter().map(string_form).collect();
            values
                .entries
                .push((name.to_string(), rendered.join(separator)));
        }
        values
    }

    /// The value that will end up in prop `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Replace the last pending value for `name`, or queue a new one.
    pub fn set(&mut self, name: &str, value: String) {
        match self.entries.iter_mut().rev().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name.to_string(), value)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Write `result` into the SSP's system-characteristics props.
///
/// Shorthand for [`PropValues::from_mapping`] followed by [`write_props`].
pub fn apply_props(
    ssp: &mut Value,
    result: &MappingResult,
    bindings: &PropBindings,
    separator: &str,
    now: Timestamp,
) -> OscalResult<PropsReport> {
    write_props(ssp, &PropValues::from_mapping(result, bindings, separator), now)
}

/// Write pending prop values and stamp `metadata.last-modified`.
///
/// Container types are checked before anything is written, so on error the
/// document is left as it was.
///
/// # Errors
///
/// - [`OscalError::MissingPlan`] if `ssp` has no `system-security-plan`.
/// - [`OscalError::NotAnObject`] / [`OscalError::NotAnArray`] if a container
///   on the write path has the wrong type.
pub fn write_props(
    ssp: &mut Value,
    values: &PropValues,
    now: Timestamp,
) -> OscalResult<PropsReport> {
    let plan = ssp
        .get_mut("system-security-plan")
        .ok_or(OscalError::MissingPlan)?
        .as_object_mut()
        .ok_or(OscalError::NotAnObject {
            path: "system-security-plan",
        })?;

    if plan.get("metadata").is_some_and(|m| !m.is_object()) {
        return Err(OscalError::NotAnObject {
            path: "system-security-plan.metadata",
        });
    }
    match plan.get("system-characteristics") {
        Some(Value::Object(sc)) if sc.get("props").is_some_and(|p| !p.is_array()) => {
            return Err(OscalError::NotAnArray {
                path: "system-security-plan.system-characteristics.props",
            });
        }
        Some(Value::Object(_)) | None => {}
        Some(_) => {
            return Err(OscalError::NotAnObject {
                path: "system-security-plan.system-characteristics",
            });
        }
    }

    let mut report = PropsReport {
        skipped: values.skipped.clone(),
        ..PropsReport::default()
    };
    if let Some(Value::Array(props)) = plan
        .entry("system-characteristics")
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .map(|sc| sc.entry("props").or_insert_with(|| Value::Array(Vec::new())))
    {
        for (name, value) in &values.entries {
            let existing = props
                .iter_mut()
                .filter_map(Value::as_object_mut)
                .find(|p| p.get("name").and_then(Value::as_str) == Some(name.as_str()));
            match existing {
                Some(prop) => {
                    prop.insert("value".to_string(), Value::String(value.clone()));
                    report.updated.push(name.clone());
                }
                None => {
                    props.push(json!({ "name": name, "value": value }));
                    report.added.push(name.clone());
                }
            }
        }
    }

    if let Some(metadata) = plan
        .entry("metadata")
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
    {
        metadata.insert("last-modified".to_string(), Value::String(now.to_iso8601()));
    }

    tracing::info!(
        updated = report.updated.len(),
        added = report.added.len(),
        skipped = report.skipped.len(),
        "applied mapping to SSP props"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use ogp_mapper::{apply_mapping, SourceSet};

    fn fill(ssp: &mut Value, bindings: &PropBindings) -> OscalResult<PropsReport> {
        apply_props(ssp, &mapped(), bindings, DEFAULT_SEPARATOR, now())
    }

    fn now() -> Timestamp {
        Timestamp::from_utc(Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap())
    }

    fn mapped() -> MappingResult {
        let sources = SourceSet::pair(
            json!({
                "records": [{"subjects": ["Finanzen", "Haushalt"]}],
                "retention": {"policy": "10y"},
                "internal": ["Kasse"]
            }),
            json!({"dataObjects": [{"name": "E-Mail"}]}),
        );
        let rules = r#"rules:
  purposes:
    source: xdomea.records[*].subjects
  retention:
    source: xdomea.retention.policy
  data-categories:
    source: bpmn.dataObjects[*].name
  internal-units:
    source: xdomea.internal
"#;
        apply_mapping(&sources, rules).into_result().unwrap()
    }

    fn template() -> Value {
        json!({
            "system-security-plan": {
                "uuid": "ssp-1",
                "metadata": {"title": "RoPA", "last-modified": "2025-01-01T00:00:00Z"},
                "system-characteristics": {
                    "system-name": "Kasse",
                    "props": [
                        {"name": "ropa:purpose", "value": "<purpose>"},
                        {"name": "ropa:controller", "value": "Stadt"}
                    ]
                }
            }
        })
    }

    #[test]
    fn updates_existing_and_appends_new_props() {
        let mut ssp = template();
        let report = fill(&mut ssp, &PropBindings::default()).unwrap();

        assert_eq!(report.updated, ["ropa:purpose"]);
        assert_eq!(report.added, ["ropa:retention", "ropa:data-categories"]);
        assert_eq!(report.skipped, ["internal-units"]);

        let props = &ssp["system-security-plan"]["system-characteristics"]["props"];
        assert_eq!(
            props,
            &json!([
                {"name": "ropa:purpose", "value": "Finanzen, Haushalt"},
                {"name": "ropa:controller", "value": "Stadt"},
                {"name": "ropa:retention", "value": "10y"},
                {"name": "ropa:data-categories", "value": "E-Mail"}
            ])
        );
    }

    #[test]
    fn stamps_last_modified() {
        let mut ssp = template();
        fill(&mut ssp, &PropBindings::default()).unwrap();
        assert_eq!(
            ssp["system-security-plan"]["metadata"]["last-modified"],
            json!("2026-10-18T09:30:00Z")
        );
        assert_eq!(ssp["system-security-plan"]["metadata"]["title"], json!("RoPA"));
    }

    #[test]
    fn creates_missing_containers() {
        let mut ssp = json!({"system-security-plan": {}});
        let report =
            apply_props(&mut ssp, &mapped(), &PropBindings::default(), "; ", now()).unwrap();
        assert_eq!(report.added.len(), 3);
        assert_eq!(
            ssp["system-security-plan"]["system-characteristics"]["props"][0],
            json!({"name": "ropa:purpose", "value": "Finanzen; Haushalt"})
        );
        assert!(ssp["system-security-plan"]["metadata"]["last-modified"].is_string());
    }

    #[test]
    fn overrides_extend_bindings() {
        let bindings = PropBindings::default().with_overrides([
            ("internal-units", "ropa:recipients-internal"),
            ("purposes", "ropa:zweck"),
        ]);
        assert_eq!(bindings.prop_for("purposes"), Some("ropa:zweck"));

        let mut ssp = json!({"system-security-plan": {}});
        let report = fill(&mut ssp, &bindings).unwrap();
        assert!(report.skipped.is_empty());
        assert!(report.added.contains(&"ropa:recipients-internal".to_string()));
    }

    #[test]
    fn empty_bindings_skip_everything() {
        let mut ssp = template();
        let report = fill(&mut ssp, &PropBindings::empty()).unwrap();
        assert_eq!(report.skipped.len(), 4);
        assert!(report.updated.is_empty() && report.added.is_empty());
    }

    #[test]
    fn missing_plan_is_error() {
        let mut doc = json!({"catalog": {}});
        let err = fill(&mut doc, &PropBindings::default()).unwrap_err();
        assert!(matches!(err, OscalError::MissingPlan));
    }

    #[test]
    fn wrong_container_types_are_errors() {
        let mut doc = json!({"system-security-plan": {"system-characteristics": {"props": {}}}});
        let err = fill(&mut doc, &PropBindings::default()).unwrap_err();
        assert!(matches!(err, OscalError::NotAnArray { .. }));

        let mut doc = json!({"system-security-plan": []});
        let err = fill(&mut doc, &PropBindings::default()).unwrap_err();
        assert!(matches!(err, OscalError::NotAnObject { .. }));
    }

    #[test]
    fn bad_metadata_leaves_document_untouched() {
        let mut doc = json!({"system-security-plan": {"metadata": "draft"}});
        let before = doc.clone();
        let err = fill(&mut doc, &PropBindings::default()).unwrap_err();
        assert!(matches!(
            err,
            OscalError::NotAnObject {
                path: "system-security-plan.metadata"
            }
        ));
        assert_eq!(doc, before);

        let mut doc = template();
        doc["system-security-plan"]["metadata"] = json!(["draft"]);
        let before = doc.clone();
        assert!(fill(&mut doc, &PropBindings::default()).is_err());
        assert_eq!(doc, before);
    }

    #[test]
    fn bad_characteristics_leave_document_untouched() {
        let mut doc = json!({"system-security-plan": {"system-characteristics": "n/a"}});
        let before = doc.clone();
        let err = fill(&mut doc, &PropBindings::default()).unwrap_err();
        assert!(matches!(err, OscalError::NotAnObject { .. }));
        assert_eq!(doc, before);
    }

    #[test]
    fn prop_values_set_replaces_pending_value() {
        let mut values = PropValues::from_mapping(&mapped(), &PropBindings::default(), " | ");
        assert_eq!(values.get("ropa:purpose"), Some("Finanzen | Haushalt"));
        assert_eq!(values.get("ropa:recipients"), None);

        values.set("ropa:purpose", "Kasse".to_string());
        values.set("ropa:recipients", "Kämmerei".to_string());

        let mut ssp = template();
        let report = write_props(&mut ssp, &values, now()).unwrap();
        assert_eq!(report.skipped, ["internal-units"]);
        assert_eq!(report.updated, ["ropa:purpose"]);
        let props = &ssp["system-security-plan"]["system-characteristics"]["props"];
        assert_eq!(props[0], json!({"name": "ropa:purpose", "value": "Kasse"}));
        assert_eq!(props[4], json!({"name": "ropa:recipients", "value": "Kämmerei"}));
    }

    #[test]
    fn targets_sharing_a_prop_last_one_wins() {
        let bindings = PropBindings::default().with_overrides([("internal-units", "ropa:purpose")]);
        let mut ssp = json!({"system-security-plan": {}});
        let report = fill(&mut ssp, &bindings).unwrap();
        assert_eq!(report.added[0], "ropa:purpose");
        assert_eq!(report.updated, ["ropa:purpose"]);
        assert_eq!(
            ssp["system-security-plan"]["system-characteristics"]["props"][0],
            json!({"name": "ropa:purpose", "value": "Kasse"})
        );
    }
}
