//! # ogp-mapper: Declarative Field Mapping
//!
//! Turns heterogeneous source records (records-management exports, process
//! model exports) into a normalized set of privacy attributes. A rule set
//! names, for each target field, where to read values, how to normalize
//! them, and what to use when nothing is found:
//!
//! ```yaml
//! version: 0.1
//! priorities: [xdomea, bpmn]
//! rules:
//!   purposes:
//!     source: xdomea.records[*].subjects
//!     fallback: ["<purpose-unclassified>"]
//!   data-categories:
//!     source: bpmn.dataObjects[*].name
//!     normalize:
//!       - mask: ["SSN", "Password"]
//!       - map: { "E-Mail": "contact.email", "Telefon": "contact.phone" }
//! ```
//!
//! ## Pipeline
//!
//! 1. [`rules`]: parse rule-set text into a [`RuleSet`].
//! 2. [`selector`]: resolve each rule's [`SelectorPath`] against a [`SourceSet`].
//! 3. [`normalize`]: drop blanks, apply mask/map/lowercase/trim steps.
//! 4. [`engine`]: deduplicate, apply fallback, assemble the [`MappingOutcome`].
//!
//! The engine is a pure function: no I/O, no shared state, identical inputs
//! give identical output. Only rule-set parse failures are errors; every
//! per-rule miss degrades to "no values".

pub mod engine;
pub mod error;
pub mod normalize;
pub mod rules;
pub mod selector;
pub mod sources;

pub use engine::{
    apply_mapping, evaluate, evaluate_rule, MappedField, MappingOutcome, MappingResult, ValueOrigin,
};
pub use error::RuleSetError;
pub use normalize::{normalize, string_form, NormalizationStep};
pub use rules::{parse_rule_set, Rule, RuleSet};
pub use selector::{SelectorPath, Segment, WILDCARD_MARKER};
pub use sources::{SourceSet, DEFAULT_FIRST_SOURCE, DEFAULT_SECOND_SOURCE};
