//! Union schema document parser.
//!
//! A schema document describes case types (with their constructors and
//! constructor documentation) and the unions built from them:
//!
//! ```xml
//! <unions namespace="crate::status">
//!     <type name="Active" kind="record" module="crate::cases">
//!         <constructor name="new">
//!             <doc><![CDATA[<param name="description">What is running</param>]]></doc>
//!             <param name="description" type="String"/>
//!         </constructor>
//!     </type>
//!     <type name="Retry" kind="record">
//!         <constructor implicit="true">
//!             <param name="attempt" type="u32"/>
//!         </constructor>
//!     </type>
//!     <alias name="Running" target="Active"/>
//!     <union name="Status" partial="true">
//!         <case type="Active"/>
//!         <case type="Retry"/>
//!     </union>
//! </unions>
//! ```
//!
//! Constructor documentation is kept raw; it is parsed later, and silently
//! ignored if malformed. Wrap it in CDATA when it contains markup or entities.

use crate::error::ParseError;
use crate::types::{
    ConstructorSymbol, DEFAULT_CONSTRUCTOR_NAME, ParameterSymbol, SchemaDocument, TypeKind,
    TypeSymbol, UnionDeclaration, Visibility,
};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Parses a union schema document from a string.
///
/// # Arguments
/// * `xml` - XML schema document
///
/// # Returns
/// Parsed document or parse error.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed or contains invalid elements.
pub fn parse_document(xml: &str) -> Result<SchemaDocument, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut document: Option<SchemaDocument> = None;
    let mut aliases: Vec<(String, String)> = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_bytes)?;
                match name {
                    "unions" => document = Some(parse_root(e)?),
                    "type" => {
                        let doc = require_root(&mut document, name)?;
                        let mut symbol = parse_type_attributes(e)?;
                        parse_type_body(&mut reader, &mut symbol)?;
                        doc.add_type(symbol)?;
                    }
                    "union" => {
                        let doc = require_root(&mut document, name)?;
                        let mut declaration = parse_union_attributes(e, &doc.namespace)?;
                        parse_union_body(&mut reader, &mut declaration)?;
                        doc.add_union(declaration)?;
                    }
                    _ => {}
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_bytes)?;
                match name {
                    "unions" => document = Some(parse_root(e)?),
                    "type" => {
                        let doc = require_root(&mut document, name)?;
                        doc.add_type(parse_type_attributes(e)?)?;
                    }
                    "alias" => {
                        require_root(&mut document, name)?;
                        aliases.push(parse_alias(e)?);
                    }
                    "union" => {
                        let doc = require_root(&mut document, name)?;
                        let declaration = parse_union_attributes(e, &doc.namespace)?;
                        doc.add_union(declaration)?;
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    let mut document = document.ok_or_else(|| ParseError::InvalidStructure {
        message: "No unions element found".to_string(),
    })?;

    // Aliases may point forward, so they resolve once every type is known.
    for (alias, target) in aliases {
        document.add_alias(&alias, &target)?;
    }

    Ok(document)
}

/// Returns the document being built, or an error for elements outside it.
fn require_root<'d>(
    document: &'d mut Option<SchemaDocument>,
    element: &str,
) -> Result<&'d mut SchemaDocument, ParseError> {
    document
        .as_mut()
        .ok_or_else(|| ParseError::InvalidStructure {
            message: format!("element '{}' outside of unions element", element),
        })
}

/// Parses the root element attributes.
fn parse_root(e: &BytesStart<'_>) -> Result<SchemaDocument, ParseError> {
    let mut namespace = String::new();

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = attr.unescape_value()?;
        if key == "namespace" {
            namespace = value.to_string();
        }
    }

    Ok(SchemaDocument::new(namespace))
}

/// Parses a boolean attribute value.
fn parse_bool(element: &str, attribute: &str, value: &str) -> Result<bool, ParseError> {
    match value {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ParseError::invalid_attr(element, attribute, value)),
    }
}

/// Parses the attributes of a type element.
fn parse_type_attributes(e: &BytesStart<'_>) -> Result<TypeSymbol, ParseError> {
    let mut name = None;
    let mut kind = TypeKind::default();
    let mut is_abstract = false;
    let mut type_parameters = Vec::new();
    let mut containing_type = None;
    let mut module = None;

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = attr.unescape_value()?;

        match key {
            "name" => name = Some(value.to_string()),
            "kind" => {
                kind = TypeKind::parse(&value)
                    .ok_or_else(|| ParseError::invalid_attr("type", "kind", &*value))?
            }
            "abstract" => is_abstract = parse_bool("type", "abstract", &value)?,
            "typeParameters" => {
                type_parameters = value
                    .split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(str::to_string)
                    .collect()
            }
            "nestedIn" => containing_type = Some(value.to_string()),
            "module" => module = Some(value.to_string()),
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("type", "name"))?;

    let mut symbol = TypeSymbol::new(name, kind);
    symbol.is_abstract = is_abstract;
    symbol.type_parameters = type_parameters;
    symbol.containing_type = containing_type;
    symbol.module = module;

    Ok(symbol)
}

/// Parses the children of a type element up to its end tag.
fn parse_type_body(reader: &mut Reader<&[u8]>, symbol: &mut TypeSymbol) -> Result<(), ParseError> {
    let mut buf = Vec::new();
    let mut depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_bytes)?;
                if name == "constructor" {
                    let mut constructor = parse_constructor_attributes(e)?;
                    parse_constructor_body(reader, &mut constructor)?;
                    symbol.constructors.push(constructor);
                } else {
                    depth += 1;
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_bytes)?;
                if name == "constructor" {
                    symbol.constructors.push(parse_constructor_attributes(e)?);
                }
            }
            Ok(Event::End(_)) => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

/// Parses the attributes of a constructor element.
fn parse_constructor_attributes(e: &BytesStart<'_>) -> Result<ConstructorSymbol, ParseError> {
    let mut constructor = ConstructorSymbol::new(DEFAULT_CONSTRUCTOR_NAME);

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = attr.unescape_value()?;

        match key {
            "name" => constructor.name = value.to_string(),
            "visibility" => {
                constructor.visibility = Visibility::parse(&value).ok_or_else(|| {
                    ParseError::invalid_attr("constructor", "visibility", &*value)
                })?
            }
            "implicit" => constructor.implicit = parse_bool("constructor", "implicit", &value)?,
            _ => {}
        }
    }

    Ok(constructor)
}

/// Parses constructor parameters and documentation up to the end tag.
fn parse_constructor_body(
    reader: &mut Reader<&[u8]>,
    constructor: &mut ConstructorSymbol,
) -> Result<(), ParseError> {
    let mut buf = Vec::new();
    let mut depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_bytes)?;
                match name {
                    "doc" => constructor.documentation = Some(read_raw_documentation(reader)?),
                    "param" => {
                        constructor.parameters.push(parse_param(e)?);
                        depth += 1;
                    }
                    _ => depth += 1,
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_bytes)?;
                if name == "param" {
                    constructor.parameters.push(parse_param(e)?);
                }
            }
            Ok(Event::End(_)) => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

/// Parses a constructor parameter element.
fn parse_param(e: &BytesStart<'_>) -> Result<ParameterSymbol, ParseError> {
    let mut name = None;
    let mut type_name = None;

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = attr.unescape_value()?;

        match key {
            "name" => name = Some(value.to_string()),
            "type" => type_name = Some(value.to_string()),
            _ => {}
        }
    }

    Ok(ParameterSymbol {
        name: name.ok_or_else(|| ParseError::missing_attr("param", "name"))?,
        type_name: type_name.ok_or_else(|| ParseError::missing_attr("param", "type"))?,
    })
}

/// Reads the content of a doc element verbatim, markup included.
///
/// Nested tags are re-serialized so the fragment can be parsed later.
fn read_raw_documentation(reader: &mut Reader<&[u8]>) -> Result<String, ParseError> {
    reader.config_mut().trim_text(false);
    let result = collect_raw_documentation(reader);
    reader.config_mut().trim_text(true);
    result
}

fn collect_raw_documentation(reader: &mut Reader<&[u8]>) -> Result<String, ParseError> {
    let mut raw = String::new();
    let mut buf = Vec::new();
    let mut depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                depth += 1;
                raw.push('<');
                raw.push_str(std::str::from_utf8(e)?);
                raw.push('>');
            }
            Ok(Event::Empty(ref e)) => {
                raw.push('<');
                raw.push_str(std::str::from_utf8(e)?);
                raw.push_str("/>");
            }
            Ok(Event::End(ref e)) => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
                raw.push_str("</");
                raw.push_str(std::str::from_utf8(e.name().as_ref())?);
                raw.push('>');
            }
            Ok(Event::Text(ref t)) => raw.push_str(std::str::from_utf8(t)?),
            Ok(Event::CData(ref c)) => raw.push_str(std::str::from_utf8(c)?),
            Ok(Event::GeneralRef(ref r)) => {
                raw.push('&');
                raw.push_str(std::str::from_utf8(r)?);
                raw.push(';');
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(raw.trim().to_string())
}

/// Parses an alias element into `(alias, target)`.
fn parse_alias(e: &BytesStart<'_>) -> Result<(String, String), ParseError> {
    let mut name = None;
    let mut target = None;

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = attr.unescape_value()?;

        match key {
            "name" => name = Some(value.to_string()),
            "target" => target = Some(value.to_string()),
            _ => {}
        }
    }

    Ok((
        name.ok_or_else(|| ParseError::missing_attr("alias", "name"))?,
        target.ok_or_else(|| ParseError::missing_attr("alias", "target"))?,
    ))
}

/// Parses the attributes of a union element.
fn parse_union_attributes(
    e: &BytesStart<'_>,
    namespace: &str,
) -> Result<UnionDeclaration, ParseError> {
    let mut name = None;
    let mut is_partial = false;

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = attr.unescape_value()?;

        match key {
            "name" => name = Some(value.to_string()),
            "partial" => is_partial = parse_bool("union", "partial", &value)?,
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("union", "name"))?;
    Ok(UnionDeclaration::new(namespace, name).partial(is_partial))
}

/// Parses the case references of a union element up to its end tag.
fn parse_union_body(
    reader: &mut Reader<&[u8]>,
    declaration: &mut UnionDeclaration,
) -> Result<(), ParseError> {
    let mut buf = Vec::new();
    let mut depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                depth += 1;
                let name_bytes = e.name().as_ref().to_vec();
                if std::str::from_utf8(&name_bytes)? == "case" {
                    declaration.cases.push(parse_case_reference(e)?);
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                if std::str::from_utf8(&name_bytes)? == "case" {
                    declaration.cases.push(parse_case_reference(e)?);
                }
            }
            Ok(Event::End(_)) => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

/// Parses the type reference of a case element.
fn parse_case_reference(e: &BytesStart<'_>) -> Result<String, ParseError> {
    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        if key == "type" {
            return Ok(attr.unescape_value()?.into_owned());
        }
    }
    Err(ParseError::missing_attr("case", "type"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SymbolSource;

    const STATUS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<unions namespace="crate::status">
    <type name="Active" kind="record" module="crate::cases">
        <constructor name="new">
            <doc><![CDATA[<summary>Creates an active status.</summary>
                <param name="description">What is
                    currently running</param>]]></doc>
            <param name="description" type="String"/>
        </constructor>
    </type>
    <type name="Retry" kind="record">
        <constructor implicit="true">
            <param name="attempt" type="u32"/>
        </constructor>
    </type>
    <type name="Aborted" kind="record"/>
    <alias name="Running" target="Active"/>
    <union name="Status" partial="true">
        <case type="Active"/>
        <case type="Retry"/>
        <case type="Aborted"/>
    </union>
</unions>"#;

    #[test]
    fn test_parse_document_types() {
        let doc = parse_document(STATUS_XML).expect("Failed to parse");

        assert_eq!(doc.namespace, "crate::status");
        // Top type plus three declared types.
        assert_eq!(doc.types().len(), 4);

        let active = doc.get_type("Active").expect("Active");
        assert!(active.is_record());
        assert_eq!(active.module.as_deref(), Some("crate::cases"));
        assert_eq!(active.constructors.len(), 1);
        assert_eq!(active.constructors[0].name, "new");
        assert!(!active.constructors[0].implicit);
        assert_eq!(active.constructors[0].parameters[0].type_name, "String");

        let retry = doc.get_type("Retry").expect("Retry");
        assert!(retry.constructors[0].implicit);

        let aborted = doc.get_type("Aborted").expect("Aborted");
        assert!(aborted.constructors.is_empty());
    }

    #[test]
    fn test_parse_document_keeps_raw_documentation() {
        let doc = parse_document(STATUS_XML).expect("Failed to parse");
        let active = doc.get_type("Active").expect("Active");
        let raw = active.constructors[0]
            .documentation
            .as_deref()
            .expect("documentation");
        assert!(raw.starts_with("<summary>"));
        assert!(raw.contains("<param name=\"description\">"));
    }

    #[test]
    fn test_parse_document_unions_and_aliases() {
        let doc = parse_document(STATUS_XML).expect("Failed to parse");

        let status = doc.union_declaration("Status").expect("Status");
        assert!(status.is_partial);
        assert_eq!(status.namespace, "crate::status");
        assert_eq!(status.cases, vec!["Active", "Retry", "Aborted"]);

        let running = doc.resolve_case_type("Running").expect("alias");
        assert_eq!(running.id, doc.get_type("Active").map(|t| t.id).expect("Active"));
    }

    #[test]
    fn test_parse_unmarked_documentation_markup() {
        let xml = r#"<unions namespace="demo">
    <type name="A" kind="record">
        <constructor>
            <doc><param name="value">The value</param></doc>
            <param name="value" type="i64"/>
        </constructor>
    </type>
</unions>"#;
        let doc = parse_document(xml).expect("Failed to parse");
        let a = doc.get_type("A").expect("A");
        assert_eq!(
            a.constructors[0].documentation.as_deref(),
            Some("<param name=\"value\">The value</param>")
        );
        assert_eq!(a.constructors[0].parameters.len(), 1);
    }

    #[test]
    fn test_parse_type_flags() {
        let xml = r#"<unions namespace="demo">
    <type name="Shape" kind="trait"/>
    <type name="Base" kind="struct" abstract="true"/>
    <type name="Wrapper" kind="record" typeParameters="T, U"/>
    <type name="Inner" kind="record" nestedIn="Outer"/>
</unions>"#;
        let doc = parse_document(xml).expect("Failed to parse");
        assert!(doc.get_type("Shape").expect("Shape").is_interface());
        assert!(doc.get_type("Base").expect("Base").is_abstract);
        assert_eq!(
            doc.get_type("Wrapper").expect("Wrapper").type_parameters,
            vec!["T", "U"]
        );
        assert!(doc.get_type("Inner").expect("Inner").is_nested());
    }

    #[test]
    fn test_parse_non_partial_union_default() {
        let xml = r#"<unions namespace="demo">
    <union name="Status">
        <case type="A"/>
    </union>
</unions>"#;
        let doc = parse_document(xml).expect("Failed to parse");
        assert!(!doc.union_declaration("Status").expect("Status").is_partial);
    }

    #[test]
    fn test_parse_unescapes_attribute_values() {
        let xml = r#"<unions namespace="demo">
    <type name="Batch" kind="record">
        <constructor implicit="true">
            <param name="items" type="Vec&lt;String&gt;"/>
            <param name="limits" type="Option&lt;(u32, u32)&gt;"/>
        </constructor>
    </type>
    <union name="Jobs" partial="true">
        <case type="Batch"/>
    </union>
</unions>"#;
        let doc = parse_document(xml).expect("Failed to parse");
        let batch = doc.resolve_case_type("Batch").expect("Batch");
        let params = &batch.constructors[0].parameters;
        assert_eq!(params[0].type_name, "Vec<String>");
        assert_eq!(params[1].type_name, "Option<(u32, u32)>");
    }

    #[test]
    fn test_parse_missing_root() {
        let result = parse_document("<types/>");
        assert!(matches!(result, Err(ParseError::InvalidStructure { .. })));
    }

    #[test]
    fn test_parse_missing_type_name() {
        let result = parse_document(r#"<unions namespace="demo"><type kind="record"/></unions>"#);
        assert!(matches!(result, Err(ParseError::MissingAttribute { .. })));
    }

    #[test]
    fn test_parse_invalid_kind() {
        let result = parse_document(r#"<unions namespace="demo"><type name="A" kind="enum"/></unions>"#);
        assert!(matches!(result, Err(ParseError::InvalidAttribute { .. })));
    }

    #[test]
    fn test_parse_alias_to_unknown_type() {
        let result =
            parse_document(r#"<unions namespace="demo"><alias name="X" target="Nope"/></unions>"#);
        assert!(matches!(result, Err(ParseError::UnknownAliasTarget { .. })));
    }
}
