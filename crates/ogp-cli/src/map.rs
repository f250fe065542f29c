//! # `ogp map`
//!
//! Runs the mapping engine and prints the outcome as JSON, either
//! `{"result": {...}}` or `{"error": "..."}`.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use ogp_mapper::apply_mapping;

use crate::config::CliConfig;
use crate::{write_json, MappingInputs, EXIT_RULES_REJECTED};

/// Map subcommand arguments.
#[derive(Args, Debug)]
pub struct MapArgs {
    #[command(flatten)]
    pub inputs: MappingInputs,

    /// Write the outcome here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Execute the map subcommand.
pub fn run_map(args: &MapArgs, config: &CliConfig) -> Result<u8> {
    let sources = args.inputs.load_sources(&config.sources)?;
    let rules = args.inputs.read_rules()?;

    let outcome = apply_mapping(&sources, &rules);
    write_json(args.out.as_deref(), &serde_json::to_value(&outcome)?)?;

    match outcome.error() {
        Some(message) => {
            tracing::warn!(rules = %args.inputs.rules.display(), "rule set rejected: {message}");
            Ok(EXIT_RULES_REJECTED)
        }
        None => Ok(0),
    }
}
