//! # unionforge Codegen
//!
//! Rust code generation for closed sum types.
//!
//! This crate provides:
//! - The named-union generator (core type, match, switch, map, bind and
//!   test assertion artifacts)
//! - The arity sweep producing the generic `Union2..Union15` types
//! - Artifact layout and writing
//! - Build script integration

pub mod artifact;
pub mod error;
pub mod generator;
pub mod rust;
pub mod shape;
pub mod sweep;

pub use artifact::{Artifact, Family, GENERATED_HEADER};
pub use error::CodegenError;
pub use generator::{GeneratedUnion, Generator, GeneratorOptions, generate_union};
pub use shape::{DEFAULT_RUNTIME_PATH, UnionShape};
pub use sweep::{
    MAX_SUPPORTED_ARITY, MIN_ARITY, generate_for_arities, generate_for_arities_with,
    generate_up_to,
};

/// Generates a named union from a schema document string.
///
/// # Arguments
/// * `xml` - Schema document content
/// * `union_name` - Name of the union to generate
/// * `options` - Generator options
///
/// # Returns
/// The generated artifacts and any warnings.
///
/// # Errors
/// Returns `CodegenError` if parsing, validation, or generation fails.
pub fn generate_from_xml(
    xml: &str,
    union_name: &str,
    options: &GeneratorOptions,
) -> Result<GeneratedUnion, CodegenError> {
    let document = unionforge_schema::parse_document(xml)?;
    generate_union(&document, union_name, options)
}

/// Generates a named union from a schema document file.
///
/// # Arguments
/// * `path` - Path to the schema document
/// * `union_name` - Name of the union to generate
/// * `options` - Generator options
///
/// # Returns
/// The generated artifacts and any warnings.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, validation, or generation fails.
pub fn generate_from_file(
    path: &std::path::Path,
    union_name: &str,
    options: &GeneratorOptions,
) -> Result<GeneratedUnion, CodegenError> {
    let xml = std::fs::read_to_string(path)?;
    generate_from_xml(&xml, union_name, options)
}
