//! # Check subcommand
//!
//! Validates unions of a schema document without generating code.
//!
//! ```bash
//! unionforge check --schema schemas/status.xml
//! unionforge check --schema schemas/status.xml --union Status
//! ```

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use unionforge_schema::{Validator, build_schema};

use crate::load_schema;

/// Check subcommand arguments.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Schema document to validate.
    #[arg(long)]
    pub schema: PathBuf,

    /// Only validate this union. All unions are validated when omitted.
    #[arg(long)]
    pub union: Option<String>,
}

/// Execute the check subcommand, reporting on standard output.
pub fn run_check(args: &CheckArgs) -> Result<u8> {
    let stdout = std::io::stdout();
    run_check_with(args, &mut stdout.lock())
}

/// Execute the check subcommand, reporting on `output`.
///
/// Returns exit code 1 if any union has an error diagnostic.
pub fn run_check_with<W: Write>(args: &CheckArgs, output: &mut W) -> Result<u8> {
    let document = load_schema(&args.schema)?;
    let names: Vec<String> = match &args.union {
        Some(name) => vec![name.clone()],
        None => document.unions().iter().map(|u| u.name.clone()).collect(),
    };
    if names.is_empty() {
        writeln!(output, "no unions declared")?;
        return Ok(0);
    }

    let validator = Validator::new();
    let mut fatal = false;
    for name in &names {
        let schema =
            build_schema(&document, name).with_context(|| format!("checking union {name}"))?;
        let validation = validator.validate(&schema);

        for diagnostic in validation.diagnostics() {
            writeln!(output, "{diagnostic}")?;
        }
        if validation.diagnostics().is_empty() {
            writeln!(output, "{}: ok", schema.location_key())?;
        }
        fatal |= validation.is_fatal();
    }

    Ok(u8::from(fatal))
}
