//! The trait shared by all generated unions.

/// A closed sum type holding exactly one of `ARITY` cases.
///
/// Implemented by the generated `UnionN` types and by every named union.
pub trait Union {
    /// Number of cases.
    const ARITY: usize;

    /// Returns the 1-based ordinal of the held case.
    fn tag(&self) -> u8;

    /// Returns the name of the held case.
    fn case_name(&self) -> &'static str;

    /// Returns `true` if the held case has the given ordinal.
    fn holds(&self, tag: u8) -> bool {
        self.tag() == tag
    }
}
