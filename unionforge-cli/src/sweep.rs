//! # Sweep subcommand
//!
//! Generates the generic unions and all their combinator families for every
//! arity from 2 up to a maximum, asking for the maximum when it is not given.
//!
//! ```bash
//! unionforge sweep                       # prompts for the maximum arity
//! unionforge sweep --max-arity 8 --output generated
//! ```

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;

use crate::write_artifact;
use unionforge_codegen::{
    DEFAULT_RUNTIME_PATH, Family, MAX_SUPPORTED_ARITY, MIN_ARITY, generate_for_arities_with,
};

/// Sweep subcommand arguments.
#[derive(Args, Debug)]
pub struct SweepArgs {
    /// Largest arity to generate. Prompted for when omitted.
    #[arg(long, value_name = "N")]
    pub max_arity: Option<usize>,

    /// Output directory.
    #[arg(long, default_value = "generated")]
    pub output: PathBuf,

    /// Path emitted code uses to reach the runtime crate.
    #[arg(long, default_value = DEFAULT_RUNTIME_PATH)]
    pub runtime_path: String,
}

/// Execute the sweep subcommand on the process's standard streams.
pub fn run_sweep(args: &SweepArgs) -> Result<u8> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_sweep_with(args, &mut stdin.lock(), &mut stdout.lock())
}

/// Execute the sweep subcommand, prompting on `input` and reporting on `output`.
pub fn run_sweep_with<R, W>(args: &SweepArgs, input: &mut R, output: &mut W) -> Result<u8>
where
    R: BufRead,
    W: Write,
{
    let max_arity = match args.max_arity {
        Some(n) if is_supported(n) => n,
        Some(n) => bail!("maximum arity {n} is outside {MIN_ARITY}..={MAX_SUPPORTED_ARITY}"),
        None => prompt_arity(input, output)?,
    };

    let artifacts = generate_for_arities_with(MIN_ARITY..=max_arity, &args.runtime_path)?;

    writeln!(output)?;
    for artifact in &artifacts {
        writeln!(output, "{}", progress_line(artifact.family))?;
        write_artifact(artifact, &args.output)?;
    }
    writeln!(output)?;
    writeln!(output, "Generation completed successfully.")?;

    tracing::info!(
        max_arity,
        output = %args.output.display(),
        "sweep written"
    );
    Ok(0)
}

/// Asks for the maximum arity until a supported one is entered.
///
/// # Errors
/// Returns an error if the input ends before a valid arity is read.
pub fn prompt_arity<R, W>(input: &mut R, output: &mut W) -> Result<usize>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "Welcome to the union sweep generator")?;
    writeln!(
        output,
        "Please indicate the maximum arity to generate (between {MIN_ARITY} and {MAX_SUPPORTED_ARITY}):"
    )?;
    output.flush()?;

    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            bail!("input ended before a valid arity was entered");
        }
        match line.trim().parse::<usize>() {
            Ok(n) if is_supported(n) => return Ok(n),
            _ => {
                writeln!(
                    output,
                    "Invalid input. Please enter a number between {MIN_ARITY} and {MAX_SUPPORTED_ARITY}:"
                )?;
                output.flush()?;
            }
        }
    }
}

fn is_supported(arity: usize) -> bool {
    (MIN_ARITY..=MAX_SUPPORTED_ARITY).contains(&arity)
}

fn progress_line(family: Family) -> String {
    match family {
        Family::Core => "Generating unions".to_string(),
        other => format!("Generating {} extensions", other.label()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn args(max_arity: Option<usize>, output: PathBuf) -> SweepArgs {
        SweepArgs {
            max_arity,
            output,
            runtime_path: DEFAULT_RUNTIME_PATH.to_string(),
        }
    }

    #[test]
    fn test_prompt_reprompts_until_valid() {
        let mut input = Cursor::new("1\n16\nfour\n4\n");
        let mut output = Vec::new();

        let arity = prompt_arity(&mut input, &mut output).expect("arity");
        assert_eq!(arity, 4);

        let text = String::from_utf8(output).expect("utf8");
        assert_eq!(text.matches("Invalid input.").count(), 3);
    }

    #[test]
    fn test_prompt_accepts_bounds() {
        let mut output = Vec::new();
        assert_eq!(prompt_arity(&mut Cursor::new(" 2 \n"), &mut output).expect("2"), 2);
        assert_eq!(prompt_arity(&mut Cursor::new("15\n"), &mut output).expect("15"), 15);
    }

    #[test]
    fn test_prompt_fails_on_end_of_input() {
        let mut output = Vec::new();
        assert!(prompt_arity(&mut Cursor::new("0\n"), &mut output).is_err());
    }

    #[test]
    fn test_interactive_sweep_writes_layout() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut input = Cursor::new("1\n16\n4\n");
        let mut output = Vec::new();

        let code = run_sweep_with(&args(None, dir.path().to_path_buf()), &mut input, &mut output)
            .expect("sweep");
        assert_eq!(code, 0);

        let text = String::from_utf8(output).expect("utf8");
        assert!(text.contains("Generating unions\n"));
        assert!(text.contains("Generating partition extensions\n"));
        assert!(text.ends_with("Generation completed successfully.\n"));
        assert_eq!(text.matches("Generating ").count(), Family::SWEEP.len());

        let unions = std::fs::read_to_string(dir.path().join("union.rs")).expect("union.rs");
        assert!(unions.contains("pub enum Union4<"));
        assert!(!unions.contains("pub enum Union5<"));
        assert!(dir.path().join("collections/partition_extensions.rs").is_file());
        assert!(dir.path().join("test_extensions/test_extensions.rs").is_file());
    }

    #[test]
    fn test_flag_skips_prompt() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut output = Vec::new();

        run_sweep_with(
            &args(Some(2), dir.path().to_path_buf()),
            &mut Cursor::new(""),
            &mut output,
        )
        .expect("sweep");

        let text = String::from_utf8(output).expect("utf8");
        assert!(!text.contains("Please indicate"));
    }

    #[test]
    fn test_flag_out_of_range() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = run_sweep_with(
            &args(Some(16), dir.path().to_path_buf()),
            &mut Cursor::new(""),
            &mut Vec::new(),
        );
        assert!(result.is_err());
    }
}
