//! # Selector Paths
//!
//! A selector path is a dotted string such as `xdomea.records[*].subjects`.
//! The first segment names a document in the [`SourceSet`]; the rest descend
//! into it. A segment suffixed with [`WILDCARD_MARKER`] projects over the
//! array found at that key: the remaining segments are resolved against each
//! element and the per-element results are flattened into one sequence.
//!
//! ## Resolution Rules
//!
//! - Mappings are descended by key, sequences by numeric index.
//! - Any miss (unknown source, missing key, wrong shape) yields an empty
//!   sequence. Resolution never fails.
//! - A path with no segments after the source name resolves to nothing.
//! - Only the first wildcard segment projects. A wildcard-marked segment
//!   after it is not supported and the element it applies to contributes
//!   nothing.
//! - Without a wildcard, an array at the end of the path is returned
//!   element-wise; any other value is returned as a one-element sequence.

use std::fmt;

use serde_json::Value;

use crate::sources::SourceSet;

/// Suffix marking a segment as "project over every element of this array".
pub const WILDCARD_MARKER: &str = "[*]";

/// One dotted component of a selector path after the source name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    key: String,
    wildcard: bool,
}

impl Segment {
    fn parse(raw: &str) -> Self {
        match raw.strip_suffix(WILDCARD_MARKER) {
            Some(key) => Self {
                key: key.to_string(),
                wildcard: true,
            },
            None => Self {
                key: raw.to_string(),
                wildcard: false,
            },
        }
    }

    /// Key (or array index) this segment descends into, without the marker.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether the segment carries the wildcard marker.
    pub fn is_wildcard(&self) -> bool {
        self.wildcard
    }
}

/// A parsed selector path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorPath {
    raw: String,
    source: String,
    segments: Vec<Segment>,
}

impl SelectorPath {
    /// Parse a dotted path. Parsing cannot fail; a malformed path simply
    /// resolves to nothing.
    pub fn parse(path: &str) -> Self {
        let mut parts = path.split('.');
        let source = parts.next().unwrap_or_default().to_string();
        let segments = parts.map(Segment::parse).collect();
        Self {
            raw: path.to_string(),
            source,
            segments,
        }
    }

    /// Name of the source document the path starts from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of wildcard-marked segments. Values above one indicate a path
    /// that relies on unsupported nested projection.
    pub fn wildcard_count(&self) -> usize {
        self.segments.iter().filter(|s| s.wildcard).count()
    }

    /// Resolve the path against `sources`.
    pub fn resolve(&self, sources: &SourceSet) -> Vec<Value> {
        let Some(root) = sources.get(&self.source) else {
            return Vec::new();
        };
        if self.segments.is_empty() {
            return Vec::new();
        }

        let mut current = root;
        for (i, segment) in self.segments.iter().enumerate() {
            let Some(next) = descend(current, &segment.key) else {
                return Vec::new();
            };
            if segment.wildcard {
                return project(next, &self.segments[i + 1..]);
            }
            current = next;
        }

        match current {
            Value::Array(items) => items.clone(),
            other => vec![other.clone()],
        }
    }
}

impl fmt::Display for SelectorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for SelectorPath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

/// Resolve `rest` against every element of the array `value`, flattening one
/// level.
fn project(value: &Value, rest: &[Segment]) -> Vec<Value> {
    let Value::Array(items) = value else {
        return Vec::new();
    };
    if rest.is_empty() {
        return items.clone();
    }

    let mut flat = Vec::new();
    for item in items {
        match descend_all(item, rest) {
            Some(Value::Array(inner)) => flat.extend(inner.iter().cloned()),
            Some(found) => flat.push(found.clone()),
            None => {}
        }
    }
    flat
}

fn descend_all<'a>(start: &'a Value, segments: &[Segment]) -> Option<&'a Value> {
    segments.iter().try_fold(start, |value, segment| {
        if segment.wildcard {
            None
        } else {
            descend(value, &segment.key)
        }
    })
}

fn descend<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(key),
        Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}
