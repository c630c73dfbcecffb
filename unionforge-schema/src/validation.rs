//! Union schema validation.
//!
//! Rules run in three tiers. The case list checks always run; concreteness,
//! genericity and nesting checks run only when the first tier found no error;
//! the record style check runs only when neither earlier tier found one.
//! Every rule of a tier reports before progression is decided.

use crate::diagnostics::{Diagnostic, DiagnosticCode};
use crate::model::{CaseDescriptor, UnionSchema};
use crate::types::{TypeId, TypeSymbol};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Subject reported for a case reference that does not resolve.
const UNRESOLVED_SUBJECT: &str = "null";

/// Outcome of one validation call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    diagnostics: Vec<Diagnostic>,
    fatal: bool,
}

impl Validation {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.fatal |= diagnostic.is_error();
        self.diagnostics.push(diagnostic);
    }

    /// Returns the diagnostics in report order.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consumes the validation, returning its diagnostics.
    #[must_use]
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Returns true if any error was reported.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        self.fatal
    }

    /// Returns the reported codes in order.
    #[must_use]
    pub fn codes(&self) -> Vec<DiagnosticCode> {
        self.diagnostics.iter().map(|d| d.code).collect()
    }
}

/// Checks union schemas against the TU001..TU008 rules.
///
/// Holds no state between calls; one validator may check any number of
/// unions concurrently.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    /// Creates a validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates a union schema.
    ///
    /// # Arguments
    /// * `schema` - The schema to validate
    ///
    /// # Returns
    /// The diagnostics found and whether any of them is fatal.
    #[must_use]
    pub fn validate(&self, schema: &UnionSchema) -> Validation {
        let mut validation = Validation::default();
        let location = schema.location_key();

        check_case_list(schema, &location, &mut validation);
        if validation.is_fatal() {
            debug!(union = %location, "case list rejected, skipping case type checks");
            return validation;
        }

        check_case_types(schema, &location, &mut validation);
        if validation.is_fatal() {
            debug!(union = %location, "case types rejected, skipping style checks");
            return validation;
        }

        check_case_style(schema, &location, &mut validation);
        validation
    }
}

/// TU001, TU002, TU003 and TU004.
fn check_case_list(schema: &UnionSchema, location: &str, validation: &mut Validation) {
    let cases = &schema.cases;

    if distinct_case_count(cases) < 2 {
        validation.report(Diagnostic::new(
            DiagnosticCode::TooFewCases,
            &schema.name,
            location,
        ));
    }

    // Case type checks only apply to two or more declarations.
    if cases.len() >= 2 {
        for name in duplicate_groups(cases) {
            validation.report(Diagnostic::new(
                DiagnosticCode::DuplicateCase,
                name,
                location,
            ));
        }

        for case in cases {
            match case.type_ref.symbol() {
                None => validation.report(Diagnostic::new(
                    DiagnosticCode::InvalidCaseType,
                    UNRESOLVED_SUBJECT,
                    location,
                )),
                Some(symbol) if symbol.is_top() => validation.report(Diagnostic::new(
                    DiagnosticCode::InvalidCaseType,
                    &symbol.name,
                    location,
                )),
                Some(_) => {}
            }
        }
    }

    if !schema.is_partial {
        validation.report(Diagnostic::new(
            DiagnosticCode::UnionMustBePartial,
            &schema.name,
            location,
        ));
    }
}

/// TU006, TU007 and TU008.
fn check_case_types(schema: &UnionSchema, location: &str, validation: &mut Validation) {
    let rules: [(DiagnosticCode, fn(&TypeSymbol) -> bool); 3] = [
        (DiagnosticCode::CaseMustBeConcrete, |s| {
            s.is_abstract || s.is_interface()
        }),
        (DiagnosticCode::CaseMustBeNonGeneric, TypeSymbol::is_generic),
        (DiagnosticCode::CaseMustBeUnnested, TypeSymbol::is_nested),
    ];

    for (code, violates) in rules {
        for symbol in resolved_symbols(&schema.cases) {
            if violates(symbol) {
                validation.report(Diagnostic::new(code, &symbol.name, location));
            }
        }
    }
}

/// TU005.
fn check_case_style(schema: &UnionSchema, location: &str, validation: &mut Validation) {
    for symbol in resolved_symbols(&schema.cases) {
        if !symbol.is_record() {
            validation.report(Diagnostic::new(
                DiagnosticCode::CaseShouldBeRecord,
                &symbol.name,
                location,
            ));
        }
    }
}

fn resolved_symbols(cases: &[CaseDescriptor]) -> impl Iterator<Item = &TypeSymbol> {
    cases.iter().filter_map(|c| c.type_ref.symbol())
}

/// Counts cases by type identity. Every unresolved reference counts once.
fn distinct_case_count(cases: &[CaseDescriptor]) -> usize {
    let mut seen = HashSet::new();
    cases
        .iter()
        .filter(|c| match c.type_ref.symbol() {
            Some(symbol) => seen.insert(symbol.id),
            None => true,
        })
        .count()
}

/// Returns the name of every type declared more than once, in order of
/// first appearance.
fn duplicate_groups(cases: &[CaseDescriptor]) -> Vec<&str> {
    let mut counts: HashMap<TypeId, usize> = HashMap::new();
    let mut order: Vec<&TypeSymbol> = Vec::new();

    for symbol in resolved_symbols(cases) {
        let count = counts.entry(symbol.id).or_insert(0);
        if *count == 0 {
            order.push(symbol);
        }
        *count += 1;
    }

    order
        .into_iter()
        .filter(|s| counts.get(&s.id).is_some_and(|&n| n > 1))
        .map(|s| s.name.as_str())
        .collect()
}
