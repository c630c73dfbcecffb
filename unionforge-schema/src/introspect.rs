//! Case introspection.
//!
//! Chooses the constructor a case is built from and derives its ordered
//! parameter list, with per-parameter documentation taken from the
//! constructor's structured documentation when it can be read.

use crate::model::{ConstructorRef, ParameterDescriptor, UnionSchema};
use crate::types::{ConstructorSymbol, SymbolSource, TypeSymbol};
use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::Event;
use std::collections::BTreeMap;
use tracing::debug;

/// Derives constructor parameters for union cases.
pub struct Introspector<'a, S: SymbolSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: SymbolSource + ?Sized> Introspector<'a, S> {
    /// Creates an introspector reading documentation through `source`.
    #[must_use]
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Extracts the constructor and ordered parameters of a case type.
    ///
    /// Selection prefers the first public explicit constructor with at least
    /// one parameter, then the first public constructor of any kind with at
    /// least one parameter. A type with neither carries no parameters.
    ///
    /// # Arguments
    /// * `symbol` - Case type symbol
    ///
    /// # Returns
    /// The chosen constructor, if any, and its parameter descriptors.
    #[must_use]
    pub fn extract_parameters(
        &self,
        symbol: &TypeSymbol,
    ) -> (Option<ConstructorRef>, Vec<ParameterDescriptor>) {
        let Some(constructor) = select_constructor(symbol) else {
            debug!(case = %symbol.name, "no constructor with parameters");
            return (None, Vec::new());
        };

        let docs = self.source.extract_documentation(constructor);
        let parameters = constructor
            .parameters
            .iter()
            .map(|p| {
                let description = docs.as_ref().and_then(|d| d.get(&p.name)).cloned();
                ParameterDescriptor::new(&p.type_name, &p.name, description)
            })
            .collect();

        let chosen = ConstructorRef {
            name: constructor.name.clone(),
            implicit: constructor.implicit,
        };
        (Some(chosen), parameters)
    }

    /// Returns a new schema with constructor parameters filled in for every
    /// resolved case.
    #[must_use]
    pub fn populate(&self, schema: UnionSchema) -> UnionSchema {
        let cases = schema
            .cases
            .into_iter()
            .map(|mut case| {
                if let Some(symbol) = case.type_ref.symbol() {
                    let (constructor, parameters) = self.extract_parameters(symbol);
                    case.constructor = constructor;
                    case.constructor_parameters = parameters;
                }
                case
            })
            .collect();

        UnionSchema { cases, ..schema }
    }
}

/// Chooses the constructor a case is built from.
#[must_use]
pub fn select_constructor(symbol: &TypeSymbol) -> Option<&ConstructorSymbol> {
    symbol
        .public_constructors()
        .find(|c| !c.implicit && !c.parameters.is_empty())
        .or_else(|| {
            symbol
                .public_constructors()
                .find(|c| !c.parameters.is_empty())
        })
}

/// Parses `<param name="...">` descriptions out of a documentation fragment.
///
/// Returns `None` if the fragment is not well-formed. Parameters without a
/// `name` attribute are skipped. Descriptions have their whitespace collapsed.
#[must_use]
pub fn parse_param_docs(xml: &str) -> Option<BTreeMap<String, String>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut docs = BTreeMap::new();
    let mut buf = Vec::new();
    let mut depth = 0usize;
    // Open `<param>`: its name and the depth it was opened at.
    let mut current: Option<(Option<String>, usize, String)> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                depth += 1;
                if current.is_none() && e.name().as_ref() == b"param" {
                    let mut name = None;
                    for attr in e.attributes() {
                        let attr = attr.ok()?;
                        if attr.key.as_ref() == b"name" {
                            name = Some(attr.unescape_value().ok()?.into_owned());
                        }
                    }
                    current = Some((name, depth, String::new()));
                }
            }
            Ok(Event::End(_)) => {
                if current.as_ref().is_some_and(|(_, open, _)| *open == depth) {
                    if let Some((Some(name), _, text)) = current.take() {
                        docs.insert(name, normalize_whitespace(&text));
                    }
                }
                depth = depth.checked_sub(1)?;
            }
            Ok(Event::Text(t)) => {
                if let Some((_, _, text)) = current.as_mut() {
                    text.push_str(std::str::from_utf8(&t).ok()?);
                }
            }
            Ok(Event::CData(c)) => {
                if let Some((_, _, text)) = current.as_mut() {
                    text.push_str(std::str::from_utf8(&c).ok()?);
                }
            }
            Ok(Event::GeneralRef(r)) => {
                if let Some((_, _, text)) = current.as_mut() {
                    if let Ok(Some(ch)) = r.resolve_char_ref() {
                        text.push(ch);
                    } else {
                        let name = std::str::from_utf8(&r).ok()?;
                        text.push_str(resolve_predefined_entity(name).unwrap_or(""));
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(_) => return None,
        }
        buf.clear();
    }

    (depth == 0).then_some(docs)
}

/// Collapses runs of whitespace to single spaces and trims the ends.
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::build_schema;
    use crate::types::{SchemaDocument, UnionDeclaration, Visibility};

    #[test]
    fn test_parse_param_docs() {
        let docs = parse_param_docs(
            "<summary>Active state.</summary>\
             <param name=\"description\">What the\n      job is   doing</param>",
        )
        .expect("parse");
        assert_eq!(
            docs.get("description").map(String::as_str),
            Some("What the job is doing")
        );
    }

    #[test]
    fn test_parse_param_docs_nested_markup() {
        let docs = parse_param_docs(
            "<param name=\"attempt\">Number of the <b>current</b> attempt &amp; counting</param>",
        )
        .expect("parse");
        assert_eq!(
            docs.get("attempt").map(String::as_str),
            Some("Number of the current attempt & counting")
        );
    }

    #[test]
    fn test_parse_param_docs_malformed() {
        assert!(parse_param_docs("<param name=\"a\">open").is_none());
        assert!(parse_param_docs("<param name=\"a\">x</summary>").is_none());
    }

    #[test]
    fn test_parse_param_docs_without_params() {
        let docs = parse_param_docs("<summary>Nothing here</summary>").expect("parse");
        assert!(docs.is_empty());
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  a\t\tb \n c  "), "a b c");
        assert_eq!(normalize_whitespace(""), "");
    }

    #[test]
    fn test_select_explicit_constructor_first() {
        let symbol = TypeSymbol::record("Active")
            .with_constructor(ConstructorSymbol::implicit().with_parameter("raw", "String"))
            .with_constructor(ConstructorSymbol::new("empty"))
            .with_constructor(ConstructorSymbol::new("new").with_parameter("description", "String"));
        let chosen = select_constructor(&symbol).expect("constructor");
        assert_eq!(chosen.name, "new");
        assert!(!chosen.implicit);
    }

    #[test]
    fn test_select_falls_back_to_implicit() {
        let symbol = TypeSymbol::record("Retry")
            .with_constructor(
                ConstructorSymbol::new("hidden")
                    .with_visibility(Visibility::Private)
                    .with_parameter("attempt", "u32"),
            )
            .with_constructor(ConstructorSymbol::implicit().with_parameter("attempt", "u32"));
        let chosen = select_constructor(&symbol).expect("constructor");
        assert!(chosen.implicit);
    }

    #[test]
    fn test_select_none_for_marker_case() {
        let symbol = TypeSymbol::record("Marker").with_constructor(ConstructorSymbol::new("new"));
        assert!(select_constructor(&symbol).is_none());
    }

    #[test]
    fn test_extract_parameters_with_and_without_docs() {
        let doc = SchemaDocument::new("demo");
        let introspector = Introspector::new(&doc);

        let documented = TypeSymbol::record("Active").with_constructor(
            ConstructorSymbol::new("new")
                .with_parameter("description", "String")
                .with_parameter("owner", "String")
                .with_documentation("<param name=\"description\">What runs</param>"),
        );
        let (ctor, params) = introspector.extract_parameters(&documented);
        assert_eq!(ctor.map(|c| c.name), Some("new".to_string()));
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].display_text(), "What runs");
        assert_eq!(params[1].display_text(), "owner (String)");

        let broken = TypeSymbol::record("Retry").with_constructor(
            ConstructorSymbol::implicit()
                .with_parameter("attempt", "u32")
                .with_documentation("<param name=\"attempt\">unterminated"),
        );
        let (_, params) = introspector.extract_parameters(&broken);
        assert_eq!(params[0].description, None);
        assert_eq!(params[0].display_text(), "attempt (u32)");
    }

    #[test]
    fn test_populate_fills_resolved_cases() {
        let mut doc = SchemaDocument::new("demo");
        doc.add_type(
            TypeSymbol::record("Retry")
                .with_constructor(ConstructorSymbol::implicit().with_parameter("attempt", "u32")),
        )
        .expect("Retry");
        doc.add_type(TypeSymbol::record("Done")).expect("Done");
        doc.add_union(
            UnionDeclaration::new("demo", "Outcome")
                .with_case("Retry")
                .with_case("Done")
                .with_case("Unknown"),
        )
        .expect("Outcome");

        let schema = build_schema(&doc, "Outcome").expect("schema");
        let populated = Introspector::new(&doc).populate(schema);

        assert_eq!(populated.cases[0].constructor_parameters.len(), 1);
        assert!(populated.cases[0].constructor.as_ref().is_some_and(|c| c.implicit));
        assert!(populated.cases[1].constructor.is_none());
        assert!(populated.cases[2].constructor_parameters.is_empty());
        assert_eq!(populated.name, "Outcome");
    }
}
