//! # unionforge
//!
//! Closed sum types for Rust.
//!
//! unionforge provides generic unions of arity 2 to 15 (`Union2<T1, T2>` up to
//! `Union15<...>`) and generates named unions over your own case types from a
//! schema document.
//!
//! ## Features
//!
//! - **Exhaustive dispatch** - `match_with` and `switch` take one handler per case
//! - **Transforms** - `map` and `bind`, per case or all at once
//! - **Async** - every combinator has an async form and works on pending futures
//! - **Validation** - union declarations are checked before any code is emitted
//! - **Test assertions** - `should_be_*` helpers with inspectable failures
//!
//! ## Quick Start
//!
//! ```ignore
//! use unionforge::prelude::*;
//!
//! let reading: Union2<u32, String> = Union2::Case1(42);
//! let text = reading.match_with(|n| n.to_string(), |s| s);
//! ```
//!
//! Named unions are generated from a build script:
//!
//! ```ignore
//! let generated = unionforge::codegen::generate_from_file(
//!     Path::new("schemas/status.xml"),
//!     "Status",
//!     &GeneratorOptions::default(),
//! )?;
//! for artifact in &generated.artifacts {
//!     artifact.write_to(&out_dir)?;
//! }
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - The `Union` trait, `AssertionFailed` and the generic unions
//! - [`schema`] - Schema model, parsing, introspection and validation
//! - [`codegen`] - Named union generation and the arity sweep

pub mod prelude;

/// Runtime support and generic unions.
pub mod core {
    pub use unionforge_core::*;
}

/// Schema model and validation.
pub mod schema {
    pub use unionforge_schema::*;
}

/// Code generation.
pub mod codegen {
    pub use unionforge_codegen::*;
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn test_prelude_brings_combinators_into_scope() {
        let reading: Union2<u32, String> = Union2::Case1(42);
        let text = reading.clone().match_with(|n| n.to_string(), |s| s);
        assert_eq!(text, "42");
        assert_eq!(*reading.should_be_case1(), 42);
        assert_eq!(<Union2<u32, String> as Union>::ARITY, 2);
    }

    #[test]
    fn test_codegen_reexports() {
        let artifacts = crate::codegen::generate_up_to(3).expect("sweep");
        assert_eq!(artifacts.len(), crate::codegen::Family::SWEEP.len());
    }

    #[tokio::test]
    async fn test_prelude_pending_traits() {
        let pending = async { Union2::<u32, &str>::Case2("late") };
        let text = pending.match_with(|n| n.to_string(), |s| s.to_string()).await;
        assert_eq!(text, "late");
    }
}
