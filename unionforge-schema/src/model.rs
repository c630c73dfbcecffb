//! Union schema model.
//!
//! This module provides the case and parameter descriptors the validator
//! and the generator work on, and [`build_schema`], which reads them from a
//! [`SymbolSource`].

use crate::error::SchemaError;
use crate::types::{SymbolSource, TypeSymbol};

/// Name bound to the held case value in generated code.
pub const BACKING_FIELD_NAME: &str = "value";

/// Constructor parameter as seen by the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    /// Parameter type, as written in the target language.
    pub type_name: String,
    /// Parameter name.
    pub name: String,
    /// Documentation of the parameter, when the constructor documents it.
    pub description: Option<String>,
}

impl ParameterDescriptor {
    /// Creates a parameter descriptor.
    #[must_use]
    pub fn new(
        type_name: impl Into<String>,
        name: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
            description,
        }
    }

    /// Returns the text to document this parameter with.
    ///
    /// Falls back to `"<name> (<type>)"` when no description exists.
    #[must_use]
    pub fn display_text(&self) -> String {
        match &self.description {
            Some(description) => description.clone(),
            None => format!("{} ({})", self.name, self.type_name),
        }
    }

    /// Returns the parameter name as a snake_case identifier.
    ///
    /// Keywords come back as raw identifiers (`r#type`).
    #[must_use]
    pub fn argument_name(&self) -> String {
        to_identifier(&to_snake_case(&self.name))
    }

    /// Returns the parameter name as a field name, as declared.
    #[must_use]
    pub fn field_name(&self) -> String {
        to_identifier(&self.name)
    }
}

/// The constructor chosen to build a case from its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorRef {
    /// Function name of an explicit constructor.
    pub name: String,
    /// Field-wise construction instead of a function call.
    pub implicit: bool,
}

/// Declared case type reference, with its resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    /// Reference as written in the union declaration.
    pub reference: String,
    /// Resolved symbol, or `None` when the reference does not resolve.
    pub symbol: Option<TypeSymbol>,
}

impl TypeRef {
    /// Returns the resolved symbol, if any.
    #[must_use]
    pub fn symbol(&self) -> Option<&TypeSymbol> {
        self.symbol.as_ref()
    }

    /// Returns the resolved type name, or the reference text if unresolved.
    #[must_use]
    pub fn type_name(&self) -> &str {
        self.symbol
            .as_ref()
            .map_or(self.reference.as_str(), |s| s.name.as_str())
    }
}

/// One case of a union.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseDescriptor {
    /// 1-based position in declaration order.
    pub ordinal: usize,
    /// Case name (the resolved type name).
    pub name: String,
    /// Declared type reference.
    pub type_ref: TypeRef,
    /// Constructor chosen by the introspector.
    pub constructor: Option<ConstructorRef>,
    /// Parameters of the chosen constructor.
    pub constructor_parameters: Vec<ParameterDescriptor>,
}

impl CaseDescriptor {
    /// Returns the case name as a snake_case method stem.
    #[must_use]
    pub fn stem(&self) -> String {
        to_snake_case(&self.name)
    }

    /// Returns true if the case type is a record.
    #[must_use]
    pub fn is_record(&self) -> bool {
        self.type_ref.symbol().is_some_and(TypeSymbol::is_record)
    }

    /// Returns the module of the case type, if declared.
    #[must_use]
    pub fn module(&self) -> Option<&str> {
        self.type_ref.symbol().and_then(|s| s.module.as_deref())
    }
}

/// A union and its ordered cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionSchema {
    /// Namespace (module path) the union lives in.
    pub namespace: String,
    /// Union name.
    pub name: String,
    /// Whether the declaration accepts generated members.
    pub is_partial: bool,
    /// Cases in declaration order.
    pub cases: Vec<CaseDescriptor>,
    /// Binding name for the held case value.
    pub backing_field_name: &'static str,
}

impl UnionSchema {
    /// Returns the number of cases.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.cases.len()
    }

    /// Returns the case names joined as a generic argument list.
    #[must_use]
    pub fn generic_parameter_list(&self) -> String {
        self.cases
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Returns the generic union type with the same shape, e.g. `Union3<A, B, C>`.
    #[must_use]
    pub fn backing_union_type(&self) -> String {
        format!("Union{}<{}>", self.arity(), self.generic_parameter_list())
    }

    /// Returns the key diagnostics for this union are reported at.
    #[must_use]
    pub fn location_key(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}::{}", self.namespace, self.name)
        }
    }

    /// Returns the union name as a snake_case identifier.
    #[must_use]
    pub fn snake_name(&self) -> String {
        to_snake_case(&self.name)
    }
}

/// Builds a union schema from a symbol source.
///
/// Case references are read in declaration order and resolved; nothing is
/// deduplicated or checked here.
///
/// # Errors
/// Returns `SchemaError::UnionNotFound` if no union has that name.
pub fn build_schema<S>(source: &S, union_name: &str) -> Result<UnionSchema, SchemaError>
where
    S: SymbolSource + ?Sized,
{
    let declaration =
        source
            .union_declaration(union_name)
            .ok_or_else(|| SchemaError::UnionNotFound {
                name: union_name.to_string(),
            })?;

    let cases = declaration
        .cases
        .iter()
        .enumerate()
        .map(|(index, reference)| {
            let symbol = source.resolve_case_type(reference).cloned();
            let type_ref = TypeRef {
                reference: reference.clone(),
                symbol,
            };
            CaseDescriptor {
                ordinal: index + 1,
                name: type_ref.type_name().to_string(),
                type_ref,
                constructor: None,
                constructor_parameters: Vec::new(),
            }
        })
        .collect();

    Ok(UnionSchema {
        namespace: declaration.namespace.clone(),
        name: declaration.name.clone(),
        is_partial: declaration.is_partial,
        cases,
        backing_field_name: BACKING_FIELD_NAME,
    })
}

/// Keywords of the 2024 edition, strict and reserved.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub",
    "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Makes a name usable as an identifier.
///
/// Keywords become raw identifiers. `crate`, `self`, `Self` and `super`
/// cannot be raw, so they get a trailing underscore instead.
#[must_use]
pub fn to_identifier(name: &str) -> String {
    match name {
        "crate" | "self" | "Self" | "super" => format!("{name}_"),
        _ if KEYWORDS.contains(&name) => format!("r#{name}"),
        _ => name.to_string(),
    }
}

/// Converts a string to snake_case.
#[must_use]
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_lower = false;
    for c in s.chars() {
        if c.is_uppercase() {
            if prev_lower {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
            prev_lower = false;
        } else {
            result.push(c);
            prev_lower = c.is_lowercase() || c.is_ascii_digit();
        }
    }
    result
}

/// Converts a string to PascalCase.
#[must_use]
pub fn to_pascal_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = true;

    for c in s.chars() {
        if c == '_' || c == '-' {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_parameter_names() {
        let param = ParameterDescriptor::new("String", "type", None);
        assert_eq!(param.argument_name(), "r#type");
        assert_eq!(param.field_name(), "r#type");

        let param = ParameterDescriptor::new("u32", "self", None);
        assert_eq!(param.argument_name(), "self_");

        let param = ParameterDescriptor::new("u32", "retryCount", None);
        assert_eq!(param.argument_name(), "retry_count");
        assert_eq!(param.field_name(), "retryCount");
    }
    use crate::types::{SchemaDocument, TypeSymbol, UnionDeclaration};

    fn status_document() -> SchemaDocument {
        let mut doc = SchemaDocument::new("crate::status");
        doc.add_type(TypeSymbol::record("Active")).expect("Active");
        doc.add_type(TypeSymbol::record("Retry")).expect("Retry");
        doc.add_type(TypeSymbol::record("Aborted")).expect("Aborted");
        doc.add_union(
            UnionDeclaration::new("crate::status", "Status")
                .with_case("Active")
                .with_case("Retry")
                .with_case("Aborted"),
        )
        .expect("Status");
        doc
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("clOrdId"), "cl_ord_id");
        assert_eq!(to_snake_case("Active"), "active");
        assert_eq!(to_snake_case("HttpError"), "http_error");
        assert_eq!(to_snake_case("already_snake"), "already_snake");
        assert_eq!(to_snake_case("T1"), "t1");
        assert_eq!(to_snake_case("IOError"), "ioerror");
    }

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("message_header"), "MessageHeader");
        assert_eq!(to_pascal_case("side"), "Side");
        assert_eq!(to_pascal_case("order-type"), "OrderType");
    }

    #[test]
    fn test_build_schema_preserves_declaration_order() {
        let doc = status_document();
        let schema = build_schema(&doc, "Status").expect("schema");

        assert_eq!(schema.arity(), 3);
        let names: Vec<_> = schema.cases.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Active", "Retry", "Aborted"]);
        let ordinals: Vec<_> = schema.cases.iter().map(|c| c.ordinal).collect();
        assert_eq!(ordinals, vec![1, 2, 3]);
        assert_eq!(schema.backing_field_name, BACKING_FIELD_NAME);
    }

    #[test]
    fn test_build_schema_derived_values() {
        let doc = status_document();
        let schema = build_schema(&doc, "Status").expect("schema");

        assert_eq!(schema.generic_parameter_list(), "Active, Retry, Aborted");
        assert_eq!(schema.backing_union_type(), "Union3<Active, Retry, Aborted>");
        assert_eq!(schema.location_key(), "crate::status::Status");
        assert_eq!(schema.snake_name(), "status");
    }

    #[test]
    fn test_build_schema_keeps_unresolved_references() {
        let mut doc = SchemaDocument::new("demo");
        doc.add_type(TypeSymbol::record("A")).expect("A");
        doc.add_union(
            UnionDeclaration::new("demo", "U")
                .with_case("A")
                .with_case("Missing"),
        )
        .expect("U");

        let schema = build_schema(&doc, "U").expect("schema");
        assert!(schema.cases[0].type_ref.symbol().is_some());
        assert!(schema.cases[1].type_ref.symbol().is_none());
        assert_eq!(schema.cases[1].name, "Missing");
    }

    #[test]
    fn test_build_schema_unknown_union() {
        let doc = status_document();
        let result = build_schema(&doc, "Nope");
        assert!(matches!(result, Err(SchemaError::UnionNotFound { .. })));
    }

    #[test]
    fn test_parameter_display_text_fallback() {
        let documented = ParameterDescriptor::new("u32", "attempt", Some("Attempt number".into()));
        let bare = ParameterDescriptor::new("u32", "attempt", None);
        assert_eq!(documented.display_text(), "Attempt number");
        assert_eq!(bare.display_text(), "attempt (u32)");
    }
}
