//! Validation diagnostics.
//!
//! Codes are stable and part of the public contract; they are never
//! renumbered.

use std::fmt;

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Blocks generation.
    Error,
    /// Reported, generation proceeds.
    Warning,
}

impl Severity {
    /// Returns the lowercase label used when rendering.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diagnostic code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiagnosticCode {
    /// Fewer than two distinct cases.
    TooFewCases,
    /// Same case type declared more than once.
    DuplicateCase,
    /// Unresolved case or the top type.
    InvalidCaseType,
    /// Union declaration not open for generated members.
    UnionMustBePartial,
    /// Case type is not a record.
    CaseShouldBeRecord,
    /// Case type is abstract or a trait.
    CaseMustBeConcrete,
    /// Case type has type parameters.
    CaseMustBeNonGeneric,
    /// Case type is declared inside another type.
    CaseMustBeUnnested,
}

impl DiagnosticCode {
    /// All codes in numeric order.
    pub const ALL: [Self; 8] = [
        Self::TooFewCases,
        Self::DuplicateCase,
        Self::InvalidCaseType,
        Self::UnionMustBePartial,
        Self::CaseShouldBeRecord,
        Self::CaseMustBeConcrete,
        Self::CaseMustBeNonGeneric,
        Self::CaseMustBeUnnested,
    ];

    /// Returns the stable identifier, e.g. `TU002`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TooFewCases => "TU001",
            Self::DuplicateCase => "TU002",
            Self::InvalidCaseType => "TU003",
            Self::UnionMustBePartial => "TU004",
            Self::CaseShouldBeRecord => "TU005",
            Self::CaseMustBeConcrete => "TU006",
            Self::CaseMustBeNonGeneric => "TU007",
            Self::CaseMustBeUnnested => "TU008",
        }
    }

    /// Returns the short title of the rule.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::TooFewCases => "A union must declare at least two cases",
            Self::DuplicateCase => "Duplicate union case",
            Self::InvalidCaseType => "Invalid union case type",
            Self::UnionMustBePartial => "Union must be partial",
            Self::CaseShouldBeRecord => "Union case should be a record",
            Self::CaseMustBeConcrete => "Union case must be concrete",
            Self::CaseMustBeNonGeneric => "Union case must be non generic",
            Self::CaseMustBeUnnested => "Union case must be non nested",
        }
    }

    /// Returns the default severity of the rule.
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::CaseShouldBeRecord => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Formats the rule message for `subject`.
    #[must_use]
    pub fn message(self, subject: &str) -> String {
        match self {
            Self::TooFewCases => {
                format!("Union '{subject}' must declare at least two distinct cases")
            }
            Self::DuplicateCase => format!("Union case '{subject}' is specified more than once"),
            Self::InvalidCaseType => format!("Type '{subject}' is not a valid union case"),
            Self::UnionMustBePartial => {
                format!("Union declaration '{subject}' must be declared partial")
            }
            Self::CaseShouldBeRecord => format!("Union case '{subject}' should be a record"),
            Self::CaseMustBeConcrete => format!(
                "Union case '{subject}' must be a concrete type, not an interface or abstract type"
            ),
            Self::CaseMustBeNonGeneric => {
                format!("Union case '{subject}' must be a non generic type")
            }
            Self::CaseMustBeUnnested => format!("Union case '{subject}' must be an unnested type"),
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Rule that produced the finding.
    pub code: DiagnosticCode,
    /// Severity.
    pub severity: Severity,
    /// Rendered message.
    pub message: String,
    /// Key of the union the finding is about.
    pub location_key: String,
}

impl Diagnostic {
    /// Creates a diagnostic for `code` with its default severity.
    #[must_use]
    pub fn new(code: DiagnosticCode, subject: &str, location_key: impl Into<String>) -> Self {
        Self {
            code,
            severity: code.severity(),
            message: code.message(subject),
            location_key: location_key.into(),
        }
    }

    /// Returns true for error severity.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}]: {} (at {})",
            self.severity, self.code, self.message, self.location_key
        )
    }
}
