//! Prelude module for convenient imports.
//!
//! This module re-exports the runtime items and every generic union with its
//! extension traits.
//!
//! ```ignore
//! use unionforge::prelude::*;
//! ```

// Runtime
pub use unionforge_core::{AssertionFailed, Union};

// Generic unions, pending-input traits and assertion traits
pub use unionforge_core::generated::*;

// Code generation entry points
pub use unionforge_codegen::{GeneratorOptions, generate_from_file, generate_from_xml};
