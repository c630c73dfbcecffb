//! Error types for code generation.

use thiserror::Error;
use unionforge_schema::Diagnostic;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Schema parsing error.
    #[error("schema parse error: {0}")]
    Parse(#[from] unionforge_schema::ParseError),

    /// Schema construction error.
    #[error("schema error: {0}")]
    Schema(#[from] unionforge_schema::SchemaError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The union failed validation; nothing was generated.
    #[error("union '{union}' is invalid ({} diagnostics)", diagnostics.len())]
    Invalid {
        /// Location key of the union.
        union: String,
        /// Every diagnostic of the failed validation, warnings included.
        diagnostics: Vec<Diagnostic>,
    },

    /// Arity outside the supported range.
    #[error("invalid arity {arity}: a union needs at least {min} cases")]
    InvalidArity {
        /// Requested arity.
        arity: usize,
        /// Smallest supported arity.
        min: usize,
    },

    /// Code generation error.
    #[error("generation error: {message}")]
    Generation {
        /// Error message.
        message: String,
    },
}

impl CodegenError {
    /// Creates a generation error with the given message.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }
}
