//! # CLI Configuration
//!
//! Optional YAML file passed with `--config`. Every key has a default, so an
//! empty or partial file is valid:
//!
//! ```yaml
//! sources:
//!   first: xdomea
//!   second: bpmn
//! props:
//!   separator: ", "
//!   bindings:
//!     internal-units: ropa:recipients-internal
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use ogp_core::load_yaml_as_value;
use ogp_mapper::{DEFAULT_FIRST_SOURCE, DEFAULT_SECOND_SOURCE};
use ogp_oscal::{PropBindings, DEFAULT_SEPARATOR};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub sources: SourceNames,
    pub props: PropsConfig,
}

/// Names the two source documents are registered under; selector paths
/// start with one of these.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SourceNames {
    pub first: String,
    pub second: String,
}

impl Default for SourceNames {
    fn default() -> Self {
        Self {
            first: DEFAULT_FIRST_SOURCE.to_string(),
            second: DEFAULT_SECOND_SOURCE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PropsConfig {
    pub separator: String,
    /// Extra target-field → prop-name bindings, applied over the built-in
    /// table.
    pub bindings: BTreeMap<String, String>,
}

impl Default for PropsConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            bindings: BTreeMap::new(),
        }
    }
}

impl CliConfig {
    /// Load the config file, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let value = load_yaml_as_value(path).context("failed to load config file")?;
        if value.is_null() {
            return Ok(Self::default());
        }
        let config: Self = serde_json::from_value(value)
            .with_context(|| format!("invalid config file: {}", path.display()))?;
        if config.sources.first == config.sources.second {
            anyhow::bail!(
                "invalid config file: {}: sources.first and sources.second are both {:?}",
                path.display(),
                config.sources.first
            );
        }
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn prop_bindings(&self) -> PropBindings {
        PropBindings::default().with_overrides(
            self.props
                .bindings
                .iter()
                .map(|(target, prop)| (target.as_str(), prop.as_str())),
        )
    }
}
