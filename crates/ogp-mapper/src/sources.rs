//! Named source documents.
//!
//! A [`SourceSet`] is the root a selector path starts from: the first path
//! segment picks a document by name. Two documents are supplied per
//! invocation, registered by default as `xdomea` (records-management export)
//! and `bpmn` (process-model export).

use serde_json::Value;

/// Default name of the first source document.
pub const DEFAULT_FIRST_SOURCE: &str = "xdomea";

/// Default name of the second source document.
pub const DEFAULT_SECOND_SOURCE: &str = "bpmn";

/// Ordered collection of named source documents.
///
/// Registering a name twice replaces the earlier document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceSet {
    documents: Vec<(String, Value)>,
}

impl SourceSet {
    /// An empty source set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The conventional two-document set under the default names.
    pub fn pair(first: Value, second: Value) -> Self {
        Self::named_pair(DEFAULT_FIRST_SOURCE, first, DEFAULT_SECOND_SOURCE, second)
    }

    /// A two-document set under caller-chosen names.
    pub fn named_pair(
        first_name: impl Into<String>,
        first: Value,
        second_name: impl Into<String>,
        second: Value,
    ) -> Self {
        Self::new().with(first_name, first).with(second_name, second)
    }

    /// Builder-style [`SourceSet::insert`].
    pub fn with(mut self, name: impl Into<String>, document: Value) -> Self {
        self.insert(name, document);
        self
    }

    /// Register a document under `name`.
    pub fn insert(&mut self, name: impl Into<String>, document: Value) {
        let name = name.into();
        match self.documents.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = document,
            None => self.documents.push((name, document)),
        }
    }

    /// Look up a document by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.documents
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, doc)| doc)
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.documents.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pair_uses_default_names() {
        let sources = SourceSet::pair(json!({"a": 1}), json!({"b": 2}));
        assert_eq!(sources.names().collect::<Vec<_>>(), ["xdomea", "bpmn"]);
        assert_eq!(sources.get("xdomea"), Some(&json!({"a": 1})));
        assert_eq!(sources.get("bpmn"), Some(&json!({"b": 2})));
    }

    #[test]
    fn unknown_name_is_none() {
        let sources = SourceSet::pair(json!({}), json!({}));
        assert!(sources.get("ldap").is_none());
    }

    #[test]
    fn insert_replaces_existing_name() {
        let mut sources = SourceSet::new().with("records", json!(1));
        sources.insert("records", json!(2));
        assert_eq!(sources.len(), 1);
        assert_eq!(sources.get("records"), Some(&json!(2)));
    }

    #[test]
    fn named_pair_keeps_order() {
        let sources = SourceSet::named_pair("left", json!(null), "right", json!(null));
        assert_eq!(sources.names().collect::<Vec<_>>(), ["left", "right"]);
        assert!(!sources.is_empty());
    }
}
