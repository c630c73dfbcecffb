//! Failed assertion payloads.
//!
//! Generated `should_be_*` assertions panic with an [`AssertionFailed`]
//! payload. [`AssertionFailed::catch`] recovers it, which lets tests inspect
//! a failure instead of only observing the panic.

use std::fmt::Debug;
use std::panic::{AssertUnwindSafe, catch_unwind, panic_any, resume_unwind};
use thiserror::Error;

/// A failed union assertion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssertionFailed {
    /// The union held another case.
    #[error("expected {union} to hold {expected}, but it holds {actual}")]
    CaseMismatch {
        /// Union type name.
        union: String,
        /// Expected case.
        expected: String,
        /// Held case.
        actual: String,
    },

    /// The union held the expected case with another value.
    #[error("expected {union}::{case} to equal {expected}, but it was {actual}")]
    ValueMismatch {
        /// Union type name.
        union: String,
        /// Held case.
        case: String,
        /// Debug rendering of the expected value.
        expected: String,
        /// Debug rendering of the held value.
        actual: String,
    },
}

impl AssertionFailed {
    /// Creates a case mismatch.
    #[must_use]
    pub fn case_mismatch(union: &str, expected: &str, actual: &str) -> Self {
        Self::CaseMismatch {
            union: union.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Creates a value mismatch, rendering both values with `Debug`.
    #[must_use]
    pub fn value_mismatch(union: &str, case: &str, expected: &dyn Debug, actual: &dyn Debug) -> Self {
        Self::ValueMismatch {
            union: union.to_string(),
            case: case.to_string(),
            expected: format!("{expected:?}"),
            actual: format!("{actual:?}"),
        }
    }

    /// Returns the union type name.
    #[must_use]
    pub fn union(&self) -> &str {
        match self {
            Self::CaseMismatch { union, .. } | Self::ValueMismatch { union, .. } => union,
        }
    }

    /// Panics with this failure as payload.
    #[track_caller]
    pub fn raise(self) -> ! {
        panic_any(self)
    }

    /// Runs `f`, returning the failure if it raised one.
    ///
    /// Panics with any other payload are resumed.
    ///
    /// # Errors
    /// Returns the [`AssertionFailed`] raised inside `f`.
    pub fn catch<F, R>(f: F) -> Result<R, Self>
    where
        F: FnOnce() -> R,
    {
        match catch_unwind(AssertUnwindSafe(f)) {
            Ok(value) => Ok(value),
            Err(payload) => match payload.downcast::<Self>() {
                Ok(failed) => Err(*failed),
                Err(other) => resume_unwind(other),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let case = AssertionFailed::case_mismatch("Status", "Retry", "Aborted");
        assert_eq!(
            case.to_string(),
            "expected Status to hold Retry, but it holds Aborted"
        );

        let value = AssertionFailed::value_mismatch("Status", "Retry", &3_u32, &4_u32);
        assert_eq!(
            value.to_string(),
            "expected Status::Retry to equal 3, but it was 4"
        );
        assert_eq!(value.union(), "Status");
    }

    #[test]
    fn test_catch_returns_value() {
        assert_eq!(AssertionFailed::catch(|| 42), Ok(42));
    }

    #[test]
    fn test_catch_recovers_failure() {
        let result = AssertionFailed::catch(|| -> u8 {
            AssertionFailed::case_mismatch("Union2", "Case1", "Case2").raise()
        });
        assert_eq!(
            result,
            Err(AssertionFailed::case_mismatch("Union2", "Case1", "Case2"))
        );
    }

    #[test]
    #[should_panic(expected = "unrelated")]
    fn test_catch_resumes_other_panics() {
        let _ = AssertionFailed::catch(|| panic!("unrelated"));
    }
}
