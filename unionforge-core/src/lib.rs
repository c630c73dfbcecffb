//! # unionforge Core
//!
//! Runtime support for generated unions.
//!
//! This crate provides:
//! - The [`Union`] trait implemented by every generated union
//! - [`AssertionFailed`], the panic payload of failed test assertions
//! - The generic `Union2..Union15` types with their combinator families,
//!   generated at build time

extern crate self as unionforge_core;

pub mod assertion;
pub mod generated;
pub mod union;

pub use assertion::AssertionFailed;
pub use generated::*;
pub use union::Union;
