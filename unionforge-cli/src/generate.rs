//! # Generate subcommand
//!
//! Generates the six artifacts of one named union declared in a schema
//! document.
//!
//! ```bash
//! unionforge generate --schema schemas/status.xml --union Status --output src/generated
//! ```

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use unionforge_codegen::{CodegenError, DEFAULT_RUNTIME_PATH, GeneratorOptions, generate_union};

use crate::{load_schema, write_artifacts};

/// Generate subcommand arguments.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Schema document declaring the union and its case types.
    #[arg(long)]
    pub schema: PathBuf,

    /// Name of the union to generate.
    #[arg(long)]
    pub union: String,

    /// Output directory.
    #[arg(long, default_value = ".")]
    pub output: PathBuf,

    /// Path emitted code uses to reach the runtime crate.
    #[arg(long, default_value = DEFAULT_RUNTIME_PATH)]
    pub runtime_path: String,
}

/// Execute the generate subcommand, reporting on standard output.
pub fn run_generate(args: &GenerateArgs) -> Result<u8> {
    let stdout = std::io::stdout();
    run_generate_with(args, &mut stdout.lock())
}

/// Execute the generate subcommand, reporting on `output`.
///
/// Returns exit code 1 without writing anything when the union is invalid.
pub fn run_generate_with<W: Write>(args: &GenerateArgs, output: &mut W) -> Result<u8> {
    let document = load_schema(&args.schema)?;
    let options = GeneratorOptions::default().with_runtime_path(&args.runtime_path);

    let generated = match generate_union(&document, &args.union, &options) {
        Ok(generated) => generated,
        Err(CodegenError::Invalid { union, diagnostics }) => {
            for diagnostic in &diagnostics {
                writeln!(output, "{diagnostic}")?;
            }
            writeln!(output, "{union}: not generated")?;
            return Ok(1);
        }
        Err(e) => return Err(e).with_context(|| format!("generating union {}", args.union)),
    };

    for diagnostic in &generated.diagnostics {
        writeln!(output, "{diagnostic}")?;
    }
    for path in write_artifacts(&generated.artifacts, &args.output)? {
        writeln!(output, "wrote {}", path.display())?;
    }
    Ok(0)
}
