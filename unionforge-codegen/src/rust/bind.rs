//! Bind combinator code generation.

use crate::rust::transform::{TransformEmitter, TransformKind};
use crate::shape::UnionShape;

/// Generator for `bind`, `bind_<case>` and their async and pending forms.
///
/// Handlers return a whole union, which replaces the original one.
pub struct BindGenerator<'a> {
    shape: &'a UnionShape,
}

impl<'a> BindGenerator<'a> {
    /// Creates a new bind generator.
    #[must_use]
    pub fn new(shape: &'a UnionShape) -> Self {
        Self { shape }
    }

    /// Returns the name of the pending-input extension trait.
    #[must_use]
    pub fn trait_name(&self) -> String {
        TransformEmitter::new(self.shape, TransformKind::Bind).trait_name()
    }

    /// Generates the bind combinators and their pending-input trait.
    #[must_use]
    pub fn generate(&self) -> String {
        TransformEmitter::new(self.shape, TransformKind::Bind).generate()
    }
}
