//! Build script for unionforge-core.
//!
//! Runs the arity sweep and writes the generic `Union2..Union15` sources to
//! `OUT_DIR`, where `src/generated.rs` includes them.

use std::path::PathBuf;
use unionforge_codegen::{MAX_SUPPORTED_ARITY, generate_up_to};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=build.rs");

    let out_dir = PathBuf::from(std::env::var("OUT_DIR")?);
    for artifact in generate_up_to(MAX_SUPPORTED_ARITY)? {
        artifact.write_to(&out_dir)?;
    }
    Ok(())
}
