//! Arity sweep.
//!
//! Generates the generic `Union2..UnionN` types and every combinator family
//! for them, one artifact per family covering all requested arities.

use crate::artifact::{Artifact, Family};
use crate::error::CodegenError;
use crate::generator::render;
use crate::shape::{DEFAULT_RUNTIME_PATH, UnionShape};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Smallest arity a union can have.
pub const MIN_ARITY: usize = 2;

/// Largest arity the generated API is supported for.
pub const MAX_SUPPORTED_ARITY: usize = 15;

/// Generates every sweep family for the given arities.
///
/// Arities are deduplicated and processed in ascending order. Arities above
/// [`MAX_SUPPORTED_ARITY`] are generated with a warning.
///
/// # Errors
/// Returns `CodegenError::InvalidArity` if any arity is below [`MIN_ARITY`],
/// or `CodegenError::Generation` if no arity is given.
pub fn generate_for_arities<I>(arities: I) -> Result<Vec<Artifact>, CodegenError>
where
    I: IntoIterator<Item = usize>,
{
    generate_for_arities_with(arities, DEFAULT_RUNTIME_PATH)
}

/// Like [`generate_for_arities`], with a custom runtime path.
///
/// # Errors
/// Same as [`generate_for_arities`].
pub fn generate_for_arities_with<I>(
    arities: I,
    runtime_path: &str,
) -> Result<Vec<Artifact>, CodegenError>
where
    I: IntoIterator<Item = usize>,
{
    let arities: BTreeSet<usize> = arities.into_iter().collect();

    if let Some(&smallest) = arities.first().filter(|&&a| a < MIN_ARITY) {
        return Err(CodegenError::InvalidArity {
            arity: smallest,
            min: MIN_ARITY,
        });
    }
    if arities.is_empty() {
        return Err(CodegenError::generation("no arities requested"));
    }
    if let Some(&largest) = arities.last().filter(|&&a| a > MAX_SUPPORTED_ARITY) {
        warn!(
            arity = largest,
            max = MAX_SUPPORTED_ARITY,
            "arity above the supported limit"
        );
    }

    let shapes: Vec<UnionShape> = arities
        .iter()
        .map(|&arity| UnionShape::generic(arity, runtime_path))
        .collect();

    let artifacts = Family::SWEEP
        .iter()
        .map(|&family| {
            let mut body = String::new();
            for shape in &shapes {
                debug!(family = family.label(), arity = shape.arity(), "rendering");
                body.push_str(&render(family, shape));
            }
            Artifact::new(family, family.sweep_path(), &body)
        })
        .collect::<Vec<_>>();

    info!(
        arities = arities.len(),
        artifacts = artifacts.len(),
        "arity sweep complete"
    );
    Ok(artifacts)
}

/// Generates the sweep for every arity from [`MIN_ARITY`] up to `max_arity`.
///
/// # Errors
/// Returns `CodegenError::InvalidArity` if `max_arity` is below [`MIN_ARITY`].
pub fn generate_up_to(max_arity: usize) -> Result<Vec<Artifact>, CodegenError> {
    if max_arity < MIN_ARITY {
        return Err(CodegenError::InvalidArity {
            arity: max_arity,
            min: MIN_ARITY,
        });
    }
    generate_for_arities(MIN_ARITY..=max_arity)
}
