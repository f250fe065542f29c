//! # ogp CLI entry point
//!
//! Parses command-line arguments, sets up logging, loads the optional config
//! file and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ogp_cli::apply::{run_apply, ApplyArgs};
use ogp_cli::config::CliConfig;
use ogp_cli::inspect::{run_inspect, InspectArgs};
use ogp_cli::map::{run_map, MapArgs};

/// OpenGov privacy mapping toolkit.
///
/// Maps fields from records-management and process exports onto privacy
/// documentation, and fills OSCAL System Security Plans with the result.
#[derive(Parser, Debug)]
#[command(name = "ogp", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file (YAML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate a mapping rule set against two source exports.
    Map(MapArgs),

    /// Evaluate a rule set and write the result into SSP props.
    Apply(ApplyArgs),

    /// Summarize an SSP or POA&M document.
    Inspect(InspectArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    // Logs go to stderr; stdout carries JSON output.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match CliConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(1);
        }
    };

    let result = match cli.command {
        Commands::Map(args) => run_map(&args, &config),
        Commands::Apply(args) => run_apply(&args, &config),
        Commands::Inspect(args) => run_inspect(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parse_map() {
        let cli = Cli::try_parse_from([
            "ogp", "map", "--first", "x.json", "--second", "b.json", "--rules", "m.yaml",
        ])
        .unwrap();
        if let Commands::Map(args) = cli.command {
            assert_eq!(args.inputs.first, PathBuf::from("x.json"));
            assert_eq!(args.inputs.second, PathBuf::from("b.json"));
            assert_eq!(args.inputs.rules, PathBuf::from("m.yaml"));
            assert!(args.out.is_none());
        } else {
            panic!("expected map");
        }
    }

    #[test]
    fn cli_parse_map_requires_rules() {
        let result = Cli::try_parse_from(["ogp", "map", "--first", "x.json", "--second", "b.json"]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_parse_apply_with_all_options() {
        let cli = Cli::try_parse_from([
            "ogp",
            "apply",
            "--ssp",
            "ssp.json",
            "--first",
            "x.json",
            "--second",
            "b.json",
            "--rules",
            "m.yaml",
            "--out",
            "build/ssp.json",
            "--timestamp",
            "2026-01-01T00:00:00Z",
        ])
        .unwrap();
        if let Commands::Apply(args) = cli.command {
            assert_eq!(args.ssp, PathBuf::from("ssp.json"));
            assert_eq!(args.out, Some(PathBuf::from("build/ssp.json")));
            assert_eq!(args.timestamp.as_deref(), Some("2026-01-01T00:00:00Z"));
        } else {
            panic!("expected apply");
        }
    }

    #[test]
    fn cli_parse_inspect_ssp_json() {
        let cli = Cli::try_parse_from(["ogp", "inspect", "ssp", "ssp.json", "--json"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Inspect(InspectArgs {
                command: ogp_cli::inspect::InspectCommand::Ssp { json: true, .. }
            })
        ));
    }

    #[test]
    fn cli_parse_inspect_poam() {
        let cli = Cli::try_parse_from(["ogp", "inspect", "poam", "poam.json"]).unwrap();
        assert!(matches!(cli.command, Commands::Inspect(_)));
    }

    #[test]
    fn cli_parse_verbose_levels() {
        let cli0 = Cli::try_parse_from(["ogp", "inspect", "poam", "p.json"]).unwrap();
        assert_eq!(cli0.verbose, 0);

        let cli2 = Cli::try_parse_from(["ogp", "-vv", "inspect", "poam", "p.json"]).unwrap();
        assert_eq!(cli2.verbose, 2);
    }

    #[test]
    fn cli_parse_config_option() {
        let cli =
            Cli::try_parse_from(["ogp", "--config", "ogp.yaml", "inspect", "poam", "p.json"])
                .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("ogp.yaml")));
    }

    #[test]
    fn cli_parse_no_subcommand_errors() {
        assert!(Cli::try_parse_from(["ogp"]).is_err());
        assert!(Cli::try_parse_from(["ogp", "export"]).is_err());
    }
}
