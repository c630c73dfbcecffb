//! # unionforge-cli
//!
//! The `unionforge` command-line interface.
//!
//! ## Subcommands
//!
//! - `unionforge sweep` - Generate the generic `Union2..UnionN` sources.
//! - `unionforge generate` - Generate a named union from a schema document.
//! - `unionforge check` - Validate the unions of a schema document.
//!
//! ```bash
//! unionforge sweep --max-arity 8 --output generated
//! unionforge generate --schema schemas/status.xml --union Status --output src/generated
//! unionforge check --schema schemas/status.xml
//! ```
//!
//! Every subcommand returns the process exit code: 0 on success, 1 when a
//! union fails validation.

pub mod check;
pub mod generate;
pub mod sweep;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use unionforge_codegen::Artifact;

/// Writes one artifact below `root`, returning the written path.
///
/// # Errors
/// Returns an error naming the artifact that could not be written.
pub fn write_artifact(artifact: &Artifact, root: &Path) -> Result<PathBuf> {
    artifact
        .write_to(root)
        .with_context(|| format!("writing {}", artifact.path.display()))
}

/// Writes artifacts below `root`, returning the written paths.
///
/// # Errors
/// Returns an error naming the first artifact that could not be written.
pub fn write_artifacts(artifacts: &[Artifact], root: &Path) -> Result<Vec<PathBuf>> {
    artifacts
        .iter()
        .map(|artifact| write_artifact(artifact, root))
        .collect()
}

/// Reads a schema document from disk.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn load_schema(path: &Path) -> Result<unionforge_schema::SchemaDocument> {
    let xml = std::fs::read_to_string(path)
        .with_context(|| format!("reading schema {}", path.display()))?;
    unionforge_schema::parse_document(&xml)
        .with_context(|| format!("parsing schema {}", path.display()))
}
