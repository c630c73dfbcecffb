//! Map combinator code generation.

use crate::rust::transform::{TransformEmitter, TransformKind};
use crate::shape::UnionShape;

/// Generator for `map`, `map_<case>` and their async and pending forms.
///
/// A full map takes one handler per case and returns a union holding the
/// transformed value of the same case. A per-case map transforms one case and
/// passes every other case through unchanged. Generic unions may change
/// their case types; named unions keep them.
pub struct MapGenerator<'a> {
    shape: &'a UnionShape,
}

impl<'a> MapGenerator<'a> {
    /// Creates a new map generator.
    #[must_use]
    pub fn new(shape: &'a UnionShape) -> Self {
        Self { shape }
    }

    /// Returns the name of the pending-input extension trait.
    #[must_use]
    pub fn trait_name(&self) -> String {
        TransformEmitter::new(self.shape, TransformKind::Map).trait_name()
    }

    /// Generates the map combinators and their pending-input trait.
    #[must_use]
    pub fn generate(&self) -> String {
        TransformEmitter::new(self.shape, TransformKind::Map).generate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rust::test_support::{assert_parses, status_shape};
    use crate::shape::DEFAULT_RUNTIME_PATH;

    #[test]
    fn test_named_full_map() {
        let shape = status_shape();
        let code = MapGenerator::new(&shape).generate();

        assert!(code.contains("    pub fn map(\n        self,\n        on_active: impl FnOnce(Active) -> Active,\n"));
        assert!(code.contains("Self::Retry(value) => Status::Retry(on_retry(value)),"));
        assert!(code.contains("pub async fn map_async<Fut1, Fut2, Fut3>("));
        assert!(code.contains("Fut1: ::core::future::Future<Output = Active>,"));
        assert!(code.contains("Self::Aborted(value) => Status::Aborted(on_aborted(value).await),"));
        assert_parses(&code);
    }

    #[test]
    fn test_named_partial_map_passes_other_cases_through() {
        let shape = status_shape();
        let code = MapGenerator::new(&shape).generate();

        let start = code.find("pub fn map_retry(").expect("map_retry");
        let body = &code[start..];
        let end = body.find("\n    }\n").expect("end of map_retry");
        let body = &body[..end];

        assert!(body.contains("f: impl FnOnce(Retry) -> Retry,"));
        assert!(body.contains(") -> Status {"));
        assert!(body.contains("Self::Retry(value) => Status::Retry(f(value)),"));
        assert!(body.contains("Self::Active(value) => Status::Active(value),"));
        assert!(body.contains("Self::Aborted(value) => Status::Aborted(value),"));
    }

    #[test]
    fn test_named_pending_map() {
        let shape = status_shape();
        let code = MapGenerator::new(&shape).generate();

        assert!(code.contains("pub trait StatusMapFutureExt: ::core::future::Future<Output = Status> + Sized {"));
        assert!(code.contains("async move { self.await.map(on_active, on_retry, on_aborted) }"));
        assert!(code.contains("async move { self.await.map_active_async(f).await }"));
        assert!(code.contains(") -> impl ::core::future::Future<Output = Status> {"));
        assert_parses(&code);
    }

    #[test]
    fn test_generic_map_changes_case_types() {
        let shape = UnionShape::generic(2, DEFAULT_RUNTIME_PATH);
        let code = MapGenerator::new(&shape).generate();

        assert!(code.contains("pub fn map<U1, U2>("));
        assert!(code.contains("on_case1: impl FnOnce(T1) -> U1,"));
        assert!(code.contains(") -> Union2<U1, U2> {"));
        assert!(code.contains("pub fn map_case1<U>("));
        assert!(code.contains(") -> Union2<U, T2> {"));
        assert!(code.contains("pub async fn map_case2_async<U, Fut>("));
        assert!(code.contains("impl<Pending, T1, T2> Union2MapFutureExt<T1, T2> for Pending"));
        assert_parses(&code);
    }
}
