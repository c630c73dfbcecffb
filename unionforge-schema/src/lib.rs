//! # unionforge Schema
//!
//! Union schema model, symbol sources and validation.
//!
//! This crate provides:
//! - Symbol definitions and the [`SymbolSource`] capability
//! - XML schema document parsing
//! - The union schema model built from a symbol source
//! - Case introspection (constructor parameters and their documentation)
//! - Tiered validation with stable TU001..TU008 diagnostics

pub mod diagnostics;
pub mod error;
pub mod introspect;
pub mod model;
pub mod parser;
pub mod types;
pub mod validation;

pub use diagnostics::{Diagnostic, DiagnosticCode, Severity};
pub use error::{ParseError, SchemaError};
pub use introspect::{Introspector, parse_param_docs};
pub use model::{
    BACKING_FIELD_NAME, CaseDescriptor, ConstructorRef, ParameterDescriptor, TypeRef, UnionSchema,
    build_schema, to_identifier, to_pascal_case, to_snake_case,
};
pub use parser::parse_document;
pub use types::{
    ConstructorSymbol, ParameterSymbol, SchemaDocument, SymbolSource, TOP_TYPE_NAME, TypeId,
    TypeKind, TypeSymbol, UnionDeclaration, Visibility,
};
pub use validation::{Validation, Validator};
