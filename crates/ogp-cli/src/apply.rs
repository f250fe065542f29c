//! # `ogp apply`
//!
//! Evaluates the rule set and records the mapped fields in an SSP's
//! `system-characteristics.props`, stamping `metadata.last-modified`.
//! Internal lanes of the second (process) source replace the data subjects,
//! and its external message-flow targets are appended to the recipients.
//! A rejected rule set leaves the SSP untouched and nothing is written.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use ogp_core::{load_json_value, Timestamp};
use ogp_mapper::{apply_mapping, MappingOutcome};
use ogp_oscal::{write_props, ProcessParticipants, PropValues};

use crate::config::CliConfig;
use crate::{write_json, MappingInputs, EXIT_RULES_REJECTED};

/// Apply subcommand arguments.
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// SSP template or existing SSP (JSON).
    #[arg(long)]
    pub ssp: PathBuf,

    #[command(flatten)]
    pub inputs: MappingInputs,

    /// Write the updated SSP here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Value for `metadata.last-modified` (RFC 3339, `Z` suffix).
    /// Defaults to the current time.
    #[arg(long)]
    pub timestamp: Option<String>,
}

/// Execute the apply subcommand.
pub fn run_apply(args: &ApplyArgs, config: &CliConfig) -> Result<u8> {
    let now = match &args.timestamp {
        Some(raw) => Timestamp::parse(raw)?,
        None => Timestamp::now(),
    };

    let mut ssp = load_json_value(&args.ssp)?;
    let sources = args.inputs.load_sources(&config.sources)?;
    let rules = args.inputs.read_rules()?;

    let result = match apply_mapping(&sources, &rules) {
        MappingOutcome::Result(result) => result,
        MappingOutcome::Error(message) => {
            tracing::error!(rules = %args.inputs.rules.display(), "rule set rejected: {message}");
            return Ok(EXIT_RULES_REJECTED);
        }
    };

    let bindings = config.prop_bindings();
    let separator = &config.props.separator;
    let mut values = PropValues::from_mapping(&result, &bindings, separator);
    if let Some(process) = sources.get(&config.sources.second) {
        let participants = ProcessParticipants::from_bpmn(process);
        tracing::debug!(
            internal_lanes = participants.internal_lanes.len(),
            external_recipients = participants.external_recipients.len(),
            "process participants"
        );
        participants.merge_into(&mut values, &bindings, separator);
    }

    let report = write_props(&mut ssp, &values, now)
        .with_context(|| format!("cannot fill props in {}", args.ssp.display()))?;

    write_json(args.out.as_deref(), &ssp)?;

    // Stdout carries the SSP itself when no --out is given.
    if let Some(out) = &args.out {
        println!("  ssp:     {}", out.display());
        println!("  updated: {}", report.updated.join(", "));
        println!("  added:   {}", report.added.join(", "));
        if !report.skipped.is_empty() {
            println!("  skipped: {}", report.skipped.join(", "));
        }
    }
    Ok(0)
}
