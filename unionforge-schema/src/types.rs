//! Symbol definitions.
//!
//! This module contains the metadata the generator reads about case types:
//! their kind, shape, constructors and constructor documentation, plus the
//! union declarations that reference them. [`SymbolSource`] is the narrow
//! capability the rest of the pipeline depends on; [`SchemaDocument`] is the
//! implementation backed by static schema files.

use crate::error::ParseError;
use std::collections::{BTreeMap, HashMap};

/// Name of the predefined universal top type.
pub const TOP_TYPE_NAME: &str = "Any";

/// Default name of an explicitly declared constructor function.
pub const DEFAULT_CONSTRUCTOR_NAME: &str = "new";

/// Identity of a type within a symbol source.
///
/// Two references denote the same type exactly when their ids are equal;
/// aliases share the id of their target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(usize);

impl TypeId {
    /// Creates a type id from a raw index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Kind of a type symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TypeKind {
    /// Value-semantics aggregate: structural equality, immutable by construction.
    Record,
    /// Plain struct without value semantics guarantees.
    #[default]
    Struct,
    /// Trait (interface); never concrete.
    Trait,
    /// The universal top type.
    Top,
}

impl TypeKind {
    /// Parses a type kind from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "record" => Some(Self::Record),
            "struct" | "class" => Some(Self::Struct),
            "trait" | "interface" => Some(Self::Trait),
            _ => None,
        }
    }
}

/// Visibility of a constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    /// Reachable from generated code.
    #[default]
    Public,
    /// Not reachable from generated code.
    Private,
}

impl Visibility {
    /// Parses a visibility from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "public" | "pub" => Some(Self::Public),
            "private" | "crate" | "pub(crate)" => Some(Self::Private),
            _ => None,
        }
    }
}

/// Constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSymbol {
    /// Parameter name.
    pub name: String,
    /// Parameter type, as written in the target language.
    pub type_name: String,
}

impl ParameterSymbol {
    /// Creates a new parameter symbol.
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// Constructor of a case type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorSymbol {
    /// Function name used to invoke an explicit constructor.
    pub name: String,
    /// Constructor visibility.
    pub visibility: Visibility,
    /// Whether the constructor is synthesized (field-wise) rather than declared.
    pub implicit: bool,
    /// Ordered parameters.
    pub parameters: Vec<ParameterSymbol>,
    /// Raw structured documentation (an XML fragment), if any.
    pub documentation: Option<String>,
}

impl ConstructorSymbol {
    /// Creates an explicitly declared public constructor.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            implicit: false,
            parameters: Vec::new(),
            documentation: None,
        }
    }

    /// Creates a synthesized field-wise public constructor.
    #[must_use]
    pub fn implicit() -> Self {
        Self {
            implicit: true,
            ..Self::new(DEFAULT_CONSTRUCTOR_NAME)
        }
    }

    /// Adds a parameter, builder style.
    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.parameters.push(ParameterSymbol::new(name, type_name));
        self
    }

    /// Sets the documentation fragment, builder style.
    #[must_use]
    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }

    /// Sets the visibility, builder style.
    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Returns true if generated code may call this constructor.
    #[must_use]
    pub const fn is_public(&self) -> bool {
        matches!(self.visibility, Visibility::Public)
    }
}

/// Type symbol: everything the pipeline needs to know about a case type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSymbol {
    /// Identity, assigned when the symbol is added to a document.
    pub id: TypeId,
    /// Type name.
    pub name: String,
    /// Type kind.
    pub kind: TypeKind,
    /// Whether the type is abstract.
    pub is_abstract: bool,
    /// Generic type parameters.
    pub type_parameters: Vec<String>,
    /// Enclosing type, for nested declarations.
    pub containing_type: Option<String>,
    /// Module path the type lives in.
    pub module: Option<String>,
    /// Constructors in declaration order.
    pub constructors: Vec<ConstructorSymbol>,
}

impl TypeSymbol {
    /// Creates a new type symbol with no constructors.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            id: TypeId::new(0),
            name: name.into(),
            kind,
            is_abstract: false,
            type_parameters: Vec::new(),
            containing_type: None,
            module: None,
            constructors: Vec::new(),
        }
    }

    /// Creates a record type symbol.
    #[must_use]
    pub fn record(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Record)
    }

    /// Adds a constructor, builder style.
    #[must_use]
    pub fn with_constructor(mut self, constructor: ConstructorSymbol) -> Self {
        self.constructors.push(constructor);
        self
    }

    /// Returns true for the universal top type.
    #[must_use]
    pub const fn is_top(&self) -> bool {
        matches!(self.kind, TypeKind::Top)
    }

    /// Returns true for traits.
    #[must_use]
    pub const fn is_interface(&self) -> bool {
        matches!(self.kind, TypeKind::Trait)
    }

    /// Returns true for value-semantics aggregates.
    #[must_use]
    pub const fn is_record(&self) -> bool {
        matches!(self.kind, TypeKind::Record)
    }

    /// Returns true if the type declares type parameters.
    #[must_use]
    pub fn is_generic(&self) -> bool {
        !self.type_parameters.is_empty()
    }

    /// Returns true if the type is declared inside another type.
    #[must_use]
    pub fn is_nested(&self) -> bool {
        self.containing_type.is_some()
    }

    /// Returns the public constructors in declaration order.
    pub fn public_constructors(&self) -> impl Iterator<Item = &ConstructorSymbol> {
        self.constructors.iter().filter(|c| c.is_public())
    }
}

/// Union declaration: a name plus ordered case type references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionDeclaration {
    /// Namespace (module path) the union is declared in.
    pub namespace: String,
    /// Union name.
    pub name: String,
    /// Whether the declaration accepts generated members.
    pub is_partial: bool,
    /// Case type references in declaration order.
    pub cases: Vec<String>,
}

impl UnionDeclaration {
    /// Creates a new partial union declaration without cases.
    #[must_use]
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            is_partial: true,
            cases: Vec::new(),
        }
    }

    /// Appends a case reference, builder style.
    #[must_use]
    pub fn with_case(mut self, reference: impl Into<String>) -> Self {
        self.cases.push(reference.into());
        self
    }

    /// Sets the partial marker, builder style.
    #[must_use]
    pub fn partial(mut self, is_partial: bool) -> Self {
        self.is_partial = is_partial;
        self
    }
}

/// Narrow capability over an external metadata source.
///
/// The pipeline never inspects a symbol source directly; swapping this trait's
/// implementation swaps where case metadata comes from.
pub trait SymbolSource {
    /// Looks up a union declaration by name.
    fn union_declaration(&self, name: &str) -> Option<&UnionDeclaration>;

    /// Resolves a case type reference. `None` means the reference is unresolved.
    fn resolve_case_type(&self, reference: &str) -> Option<&TypeSymbol>;

    /// Extracts per-parameter documentation from a constructor.
    ///
    /// Returns `None` when no documentation exists or it cannot be parsed.
    fn extract_documentation(
        &self,
        constructor: &ConstructorSymbol,
    ) -> Option<BTreeMap<String, String>> {
        constructor
            .documentation
            .as_deref()
            .and_then(crate::introspect::parse_param_docs)
    }
}

/// Symbol source backed by a static schema document.
#[derive(Debug, Clone)]
pub struct SchemaDocument {
    /// Namespace of the unions declared in this document.
    pub namespace: String,
    /// Type symbols, indexed by [`TypeId`].
    types: Vec<TypeSymbol>,
    /// Union declarations in document order.
    unions: Vec<UnionDeclaration>,
    /// Type lookup map, aliases included.
    type_map: HashMap<String, usize>,
}

impl SchemaDocument {
    /// Creates a new document holding only the top type.
    #[must_use]
    pub fn new(namespace: impl Into<String>) -> Self {
        let mut top = TypeSymbol::new(TOP_TYPE_NAME, TypeKind::Top);
        top.id = TypeId::new(0);
        let mut type_map = HashMap::new();
        type_map.insert(TOP_TYPE_NAME.to_string(), 0);

        Self {
            namespace: namespace.into(),
            types: vec![top],
            unions: Vec::new(),
            type_map,
        }
    }

    /// Adds a type symbol and assigns its identity.
    ///
    /// # Errors
    /// Returns `ParseError::DuplicateDefinition` if the name is taken.
    pub fn add_type(&mut self, mut symbol: TypeSymbol) -> Result<TypeId, ParseError> {
        if self.type_map.contains_key(&symbol.name) {
            return Err(ParseError::duplicate("type", symbol.name));
        }
        let index = self.types.len();
        symbol.id = TypeId::new(index);
        self.type_map.insert(symbol.name.clone(), index);
        self.types.push(symbol);
        Ok(TypeId::new(index))
    }

    /// Adds an alias resolving to an existing type.
    ///
    /// # Errors
    /// Returns an error if the alias name is taken or the target is unknown.
    pub fn add_alias(&mut self, alias: &str, target: &str) -> Result<TypeId, ParseError> {
        if self.type_map.contains_key(alias) {
            return Err(ParseError::duplicate("alias", alias));
        }
        let index = *self
            .type_map
            .get(target)
            .ok_or_else(|| ParseError::UnknownAliasTarget {
                alias: alias.to_string(),
                target: target.to_string(),
            })?;
        self.type_map.insert(alias.to_string(), index);
        Ok(TypeId::new(index))
    }

    /// Adds a union declaration.
    ///
    /// # Errors
    /// Returns `ParseError::DuplicateDefinition` if a union with that name exists.
    pub fn add_union(&mut self, declaration: UnionDeclaration) -> Result<(), ParseError> {
        if self.unions.iter().any(|u| u.name == declaration.name) {
            return Err(ParseError::duplicate("union", declaration.name));
        }
        self.unions.push(declaration);
        Ok(())
    }

    /// Looks up a type by name or alias.
    #[must_use]
    pub fn get_type(&self, name: &str) -> Option<&TypeSymbol> {
        self.type_map.get(name).map(|&idx| &self.types[idx])
    }

    /// Returns all type symbols, the top type first.
    #[must_use]
    pub fn types(&self) -> &[TypeSymbol] {
        &self.types
    }

    /// Returns all union declarations in document order.
    #[must_use]
    pub fn unions(&self) -> &[UnionDeclaration] {
        &self.unions
    }
}

impl SymbolSource for SchemaDocument {
    fn union_declaration(&self, name: &str) -> Option<&UnionDeclaration> {
        self.unions.iter().find(|u| u.name == name)
    }

    fn resolve_case_type(&self, reference: &str) -> Option<&TypeSymbol> {
        self.get_type(reference)
    }
}
