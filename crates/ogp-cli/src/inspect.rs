//! # `ogp inspect`
//!
//! Prints an overview of an SSP or POA&M, as aligned text or, with
//! `--json`, as the summary structure.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use ogp_core::load_json_value;
use ogp_oscal::{PoamDocument, PoamSummary, SspDocument, SspSummary};

/// Inspect subcommand arguments.
#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(subcommand)]
    pub command: InspectCommand,
}

#[derive(Subcommand, Debug)]
pub enum InspectCommand {
    /// Summarize a System Security Plan.
    Ssp {
        path: PathBuf,

        /// Print the summary as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Summarize a Plan of Action & Milestones.
    Poam {
        path: PathBuf,

        #[arg(long)]
        json: bool,
    },
}

/// Execute the inspect subcommand.
pub fn run_inspect(args: &InspectArgs) -> Result<u8> {
    match &args.command {
        InspectCommand::Ssp { path, json } => {
            let summary = load_ssp(path)?.summary();
            if *json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", render_ssp(&summary));
            }
        }
        InspectCommand::Poam { path, json } => {
            let summary = load_poam(path)?.summary();
            if *json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", render_poam(&summary));
            }
        }
    }
    Ok(0)
}

fn load_ssp(path: &Path) -> Result<SspDocument> {
    SspDocument::from_value(load_json_value(path)?)
        .with_context(|| format!("not an SSP: {}", path.display()))
}

fn load_poam(path: &Path) -> Result<PoamDocument> {
    PoamDocument::from_value(load_json_value(path)?)
        .with_context(|| format!("not a POA&M: {}", path.display()))
}

pub fn render_ssp(summary: &SspSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  title:         {}", summary.title);
    let _ = writeln!(out, "  version:       {}", summary.version);
    let _ = writeln!(out, "  oscal-version: {}", summary.oscal_version);
    let _ = writeln!(
        out,
        "  last-modified: {}",
        summary.last_modified.as_deref().unwrap_or("-")
    );
    let _ = writeln!(out, "  components:    {}", summary.components);
    let _ = writeln!(out, "  requirements:  {}", summary.implemented_requirements);
    let _ = writeln!(out, "  resources:     {}", summary.resources);
    if !summary.statements.is_empty() {
        let _ = writeln!(out, "  statements:");
        for s in &summary.statements {
            let _ = writeln!(out, "    {:<16} {}", s.control_id, s.statement_id);
        }
    }
    out
}

pub fn render_poam(summary: &PoamSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  title: {}", summary.title);
    let _ = writeln!(out, "  items: {}", summary.items.len());
    for item in &summary.items {
        let _ = writeln!(
            out,
            "    [{:<8}] {} (risk: {})",
            item.status,
            item.title,
            item.risk_score.as_deref().unwrap_or("-")
        );
        for milestone in &item.milestones {
            let _ = writeln!(out, "      - {milestone}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn render_ssp_lists_statements() {
        let doc = SspDocument::from_value(json!({
            "system-security-plan": {
                "metadata": {"title": "RoPA"},
                "control-implementation": {
                    "implemented-requirements": [
                        {"control-id": "gdpr-art30", "statements": [{"statement-id": "gdpr-art30_stmt.a"}]}
                    ]
                }
            }
        }))
        .unwrap();
        let text = render_ssp(&doc.summary());
        assert!(text.contains("title:         RoPA"));
        assert!(text.contains("last-modified: -"));
        assert!(text.contains("gdpr-art30"));
        assert!(text.contains("gdpr-art30_stmt.a"));
    }

    #[test]
    fn render_ssp_without_statements_omits_section() {
        let doc = SspDocument::from_value(json!({})).unwrap();
        assert!(!render_ssp(&doc.summary()).contains("statements:"));
    }

    #[test]
    fn render_poam_shows_status_and_risk() {
        let doc = PoamDocument::from_value(json!({
            "plan-of-action-and-milestones": {
                "poam-items": [
                    {"title": "Löschkonzept", "status": "open",
                     "risk": {"props": [{"name": "risk-score", "value": "7"}]},
                     "milestones": [{"title": "Entwurf"}]},
                    {"title": "Schulung"}
                ]
            }
        }))
        .unwrap();
        let text = render_poam(&doc.summary());
        assert!(text.contains("title: POA&M"));
        assert!(text.contains("[open    ] Löschkonzept (risk: 7)"));
        assert!(text.contains("      - Entwurf"));
        assert!(text.contains("[planned ] Schulung (risk: -)"));
    }

    #[test]
    fn inspect_rejects_malformed_ssp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ssp.json");
        std::fs::write(&path, r#"{"system-security-plan": {"metadata": "draft"}}"#).unwrap();
        let args = InspectArgs {
            command: InspectCommand::Ssp { path, json: false },
        };
        assert!(run_inspect(&args).is_err());
    }
}
