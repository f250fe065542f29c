//! # ogp-cli: Privacy Mapping Toolkit CLI
//!
//! Provides the `ogp` command-line interface over the mapping engine and the
//! OSCAL document helpers.
//!
//! ## Subcommands
//!
//! - `ogp map`: evaluate a rule set against two source exports.
//! - `ogp apply`: evaluate, then write the result into an SSP's props.
//! - `ogp inspect`: summarize an SSP or POA&M.
//!
//! ```bash
//! ogp map --first samples/xdomea.json --second samples/bpmn.json --rules samples/mapping.yaml
//! ogp apply --ssp samples/ssp_template.json --first samples/xdomea.json \
//!     --second samples/bpmn.json --rules samples/mapping.yaml --out build/ssp.json
//! ogp inspect ssp build/ssp.json
//! ```

pub mod apply;
pub mod config;
pub mod inspect;
pub mod map;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde_json::{Map, Value};

use ogp_core::{load_json_value, DocumentError};
use ogp_mapper::SourceSet;

use crate::config::SourceNames;

/// Exit code for a run whose rule set was rejected.
pub const EXIT_RULES_REJECTED: u8 = 2;

/// The three inputs every mapping run needs.
#[derive(Args, Debug, Clone)]
pub struct MappingInputs {
    /// First source export (JSON), e.g. an xdomea record export.
    #[arg(long)]
    pub first: PathBuf,

    /// Second source export (JSON), e.g. a BPMN process export.
    #[arg(long)]
    pub second: PathBuf,

    /// Mapping rule set (YAML).
    #[arg(long)]
    pub rules: PathBuf,
}

impl MappingInputs {
    /// Load both sources under the configured names.
    pub fn load_sources(&self, names: &SourceNames) -> Result<SourceSet> {
        Ok(SourceSet::named_pair(
            names.first.as_str(),
            load_source(&self.first)?,
            names.second.as_str(),
            load_source(&self.second)?,
        ))
    }

    /// Read the rule set as text. Parsing is left to the engine so a
    /// malformed rule set becomes an error outcome rather than a CLI failure.
    pub fn read_rules(&self) -> Result<String> {
        std::fs::read_to_string(&self.rules)
            .with_context(|| format!("failed to read rule set: {}", self.rules.display()))
    }
}

/// Load a source export. A file that exists but is not valid JSON is
/// replaced by an empty object.
pub fn load_source(path: &Path) -> Result<Value> {
    match load_json_value(path) {
        Ok(value) => Ok(value),
        Err(DocumentError::JsonParse { path, source }) => {
            tracing::warn!(
                path = %path.display(),
                error = %source,
                "source is not valid JSON; using an empty document"
            );
            Ok(Value::Object(Map::new()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Pretty-print `value` to `out`, or to stdout when no path is given.
pub fn write_json(out: Option<&Path>, value: &Value) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value)?;
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create directory: {}", parent.display()))?;
            }
            std::fs::write(path, format!("{rendered}\n"))
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote output");
        }
        None => println!("{rendered}"),
    }
    Ok(())
}
