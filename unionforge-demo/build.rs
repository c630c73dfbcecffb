//! Build script for unionforge-demo.
//!
//! Generates the `Status` union from `schemas/status.xml` into `OUT_DIR`.

use std::path::{Path, PathBuf};
use unionforge_codegen::{GeneratorOptions, generate_from_file};

const SCHEMA: &str = "schemas/status.xml";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed={SCHEMA}");

    let out_dir = PathBuf::from(std::env::var("OUT_DIR")?);
    let generated = generate_from_file(Path::new(SCHEMA), "Status", &GeneratorOptions::default())?;

    for diagnostic in &generated.diagnostics {
        println!("cargo:warning={diagnostic}");
    }
    for artifact in &generated.artifacts {
        artifact.write_to(&out_dir)?;
    }
    Ok(())
}
