//! # unionforge CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use unionforge_cli::check::{CheckArgs, run_check};
use unionforge_cli::generate::{GenerateArgs, run_generate};
use unionforge_cli::sweep::{SweepArgs, run_sweep};

/// Closed sum type generator.
#[derive(Parser, Debug)]
#[command(name = "unionforge", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the generic unions up to a maximum arity.
    Sweep(SweepArgs),

    /// Generate a named union from a schema document.
    Generate(GenerateArgs),

    /// Validate the unions of a schema document.
    Check(CheckArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG takes precedence over -v.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Sweep(args) => run_sweep(&args),
        Commands::Generate(args) => run_generate(&args),
        Commands::Check(args) => run_check(&args),
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
    use std::path::PathBuf;

    #[test]
    fn cli_parse_sweep_defaults() {
        let cli = Cli::try_parse_from(["unionforge", "sweep"]).expect("parse");
        match cli.command {
            Commands::Sweep(args) => {
                assert_eq!(args.max_arity, None);
                assert_eq!(args.output, PathBuf::from("generated"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn cli_parse_sweep_with_arity() {
        let cli = Cli::try_parse_from(["unionforge", "-v", "sweep", "--max-arity", "4"])
            .expect("parse");
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Sweep(args) => assert_eq!(args.max_arity, Some(4)),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn cli_parse_generate() {
        let cli = Cli::try_parse_from([
            "unionforge",
            "generate",
            "--schema",
            "status.xml",
            "--union",
            "Status",
            "--output",
            "out",
        ])
        .expect("parse");
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.schema, PathBuf::from("status.xml"));
                assert_eq!(args.union, "Status");
                assert_eq!(args.output, PathBuf::from("out"));
                assert_eq!(args.runtime_path, "::unionforge_core");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn cli_generate_requires_union() {
        let result = Cli::try_parse_from(["unionforge", "generate", "--schema", "status.xml"]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_parse_check_all_unions() {
        let cli = Cli::try_parse_from(["unionforge", "check", "--schema", "status.xml"])
            .expect("parse");
        match cli.command {
            Commands::Check(args) => assert!(args.union.is_none()),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
