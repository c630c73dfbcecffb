//! Emitter input.
//!
//! A [`UnionShape`] is what every emitter renders from. Named shapes come from
//! a validated [`UnionSchema`]; generic shapes come from a bare arity and use
//! anonymous case types `T1..TN`.

use unionforge_schema::{
    BACKING_FIELD_NAME, ConstructorRef, ParameterDescriptor, UnionSchema, to_snake_case,
};

/// Default path emitted code uses to reach runtime items.
pub const DEFAULT_RUNTIME_PATH: &str = "::unionforge_core";

/// One case as the emitters see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseShape {
    /// 1-based position in declaration order.
    pub ordinal: usize,
    /// Enum variant name.
    pub variant: String,
    /// Type held by the variant.
    pub type_name: String,
    /// snake_case method stem.
    pub stem: String,
    /// Constructor used by the parameter-taking constructor, if any.
    pub constructor: Option<ConstructorRef>,
    /// Parameters of that constructor.
    pub parameters: Vec<ParameterDescriptor>,
    /// Path imported into the union module for this case.
    pub import: Option<String>,
    /// Whether the case type is a record.
    pub is_record: bool,
}

/// A union as the emitters see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionShape {
    /// Union type name.
    pub name: String,
    /// Whether the case types are the union's own type parameters.
    pub generic: bool,
    /// Cases in declaration order.
    pub cases: Vec<CaseShape>,
    /// Path of the runtime crate in emitted code.
    pub runtime_path: String,
    /// Binding name for the held case value.
    pub binding: String,
}

impl UnionShape {
    /// Creates the shape of a named union.
    #[must_use]
    pub fn named(schema: &UnionSchema, runtime_path: &str) -> Self {
        let cases = schema
            .cases
            .iter()
            .map(|case| {
                let import = case
                    .module()
                    .filter(|module| !module.is_empty() && *module != schema.namespace)
                    .map(|module| format!("{module}::{}", case.name));
                CaseShape {
                    ordinal: case.ordinal,
                    variant: case.name.clone(),
                    type_name: case.name.clone(),
                    stem: case.stem(),
                    constructor: case.constructor.clone(),
                    parameters: case.constructor_parameters.clone(),
                    import,
                    is_record: case.is_record(),
                }
            })
            .collect();

        Self {
            name: schema.name.clone(),
            generic: false,
            cases,
            runtime_path: runtime_path.to_string(),
            binding: schema.backing_field_name.to_string(),
        }
    }

    /// Creates the shape of the generic union of the given arity.
    #[must_use]
    pub fn generic(arity: usize, runtime_path: &str) -> Self {
        let cases = (1..=arity)
            .map(|ordinal| CaseShape {
                ordinal,
                variant: format!("Case{ordinal}"),
                type_name: format!("T{ordinal}"),
                stem: format!("case{ordinal}"),
                constructor: None,
                parameters: Vec::new(),
                import: None,
                is_record: true,
            })
            .collect();

        Self {
            name: format!("Union{arity}"),
            generic: true,
            cases,
            runtime_path: runtime_path.to_string(),
            binding: BACKING_FIELD_NAME.to_string(),
        }
    }

    /// Returns the number of cases.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.cases.len()
    }

    /// Returns the union name as a snake_case identifier.
    #[must_use]
    pub fn snake_name(&self) -> String {
        to_snake_case(&self.name)
    }

    /// Returns the type parameter list, e.g. `T1, T2`. Empty for named unions.
    #[must_use]
    pub fn type_parameters(&self) -> String {
        if !self.generic {
            return String::new();
        }
        self.cases
            .iter()
            .map(|c| c.type_name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Returns `<T1, T2>` for generic unions and nothing for named ones.
    #[must_use]
    pub fn generics(&self) -> String {
        if self.generic {
            format!("<{}>", self.type_parameters())
        } else {
            String::new()
        }
    }

    /// Returns the full union type, e.g. `Union2<T1, T2>` or `Status`.
    #[must_use]
    pub fn self_type(&self) -> String {
        format!("{}{}", self.name, self.generics())
    }

    /// Returns the opening of an inherent impl block, without the brace.
    #[must_use]
    pub fn impl_header(&self) -> String {
        format!("impl{} {}", self.generics(), self.self_type())
    }

    /// Returns the union type with its case types replaced.
    ///
    /// Named unions cannot change their case types and always yield their own
    /// name.
    #[must_use]
    pub fn retyped(&self, types: &[String]) -> String {
        if self.generic {
            format!("{}<{}>", self.name, types.join(", "))
        } else {
            self.name.clone()
        }
    }

    /// Returns the union type with only the case at `index` replaced by `ty`.
    #[must_use]
    pub fn retyped_case(&self, index: usize, ty: &str) -> String {
        let types: Vec<String> = self
            .cases
            .iter()
            .enumerate()
            .map(|(i, c)| {
                if i == index {
                    ty.to_string()
                } else {
                    c.type_name.clone()
                }
            })
            .collect();
        self.retyped(&types)
    }

    /// Returns `base`, suffixed with underscores until it clashes with no case
    /// type, variant or the union name.
    #[must_use]
    pub fn fresh(&self, base: &str) -> String {
        let mut candidate = base.to_string();
        while candidate == self.name
            || self
                .cases
                .iter()
                .any(|c| c.type_name == candidate || c.variant == candidate)
        {
            candidate.push('_');
        }
        candidate
    }

    /// Returns numbered fresh identifiers `{base}1..{base}N`, one per case.
    #[must_use]
    pub fn fresh_numbered(&self, base: &str) -> Vec<String> {
        (1..=self.arity())
            .map(|i| self.fresh(&format!("{base}{i}")))
            .collect()
    }

    /// Returns the case types as a readable list, e.g. `` `A`, `B` or `C` ``.
    #[must_use]
    pub fn describe_cases(&self) -> String {
        let names: Vec<String> = self
            .cases
            .iter()
            .map(|c| format!("`{}`", c.type_name))
            .collect();
        match names.split_last() {
            Some((last, rest)) if !rest.is_empty() => format!("{} or {}", rest.join(", "), last),
            Some((last, _)) => last.clone(),
            None => String::new(),
        }
    }

    /// Returns true if every case type is a record.
    #[must_use]
    pub fn all_records(&self) -> bool {
        self.cases.iter().all(|c| c.is_record)
    }

    /// Returns the lint allowance for functions taking one handler per case.
    #[must_use]
    pub fn handler_lints(&self, indent: &str) -> String {
        if self.arity() >= 7 {
            format!("{indent}#[allow(clippy::too_many_arguments)]\n")
        } else {
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unionforge_schema::{
        ConstructorSymbol, SchemaDocument, TypeSymbol, UnionDeclaration, build_schema,
    };

    fn status_shape() -> UnionShape {
        let mut doc = SchemaDocument::new("crate::status");
        let mut active = TypeSymbol::record("Active")
            .with_constructor(ConstructorSymbol::new("new").with_parameter("description", "String"));
        active.module = Some("crate::cases".to_string());
        doc.add_type(active).expect("Active");
        doc.add_type(TypeSymbol::record("Retry")).expect("Retry");
        doc.add_union(
            UnionDeclaration::new("crate::status", "Status")
                .with_case("Active")
                .with_case("Retry"),
        )
        .expect("Status");
        let schema = build_schema(&doc, "Status").expect("schema");
        UnionShape::named(&schema, DEFAULT_RUNTIME_PATH)
    }

    #[test]
    fn test_named_shape() {
        let shape = status_shape();
        assert_eq!(shape.self_type(), "Status");
        assert_eq!(shape.impl_header(), "impl Status");
        assert_eq!(shape.cases[0].stem, "active");
        assert_eq!(shape.cases[0].import.as_deref(), Some("crate::cases::Active"));
        assert_eq!(shape.cases[1].import, None);
        assert_eq!(shape.retyped(&["X".to_string(), "Y".to_string()]), "Status");
        assert_eq!(shape.describe_cases(), "`Active` or `Retry`");
    }

    #[test]
    fn test_generic_shape() {
        let shape = UnionShape::generic(3, DEFAULT_RUNTIME_PATH);
        assert_eq!(shape.self_type(), "Union3<T1, T2, T3>");
        assert_eq!(shape.impl_header(), "impl<T1, T2, T3> Union3<T1, T2, T3>");
        assert_eq!(shape.retyped_case(1, "U"), "Union3<T1, U, T3>");
        assert_eq!(shape.cases[2].variant, "Case3");
        assert_eq!(shape.describe_cases(), "`T1`, `T2` or `T3`");
    }

    #[test]
    fn test_fresh_avoids_case_names() {
        let mut doc = SchemaDocument::new("demo");
        doc.add_type(TypeSymbol::record("R")).expect("R");
        doc.add_type(TypeSymbol::record("Fut1")).expect("Fut1");
        doc.add_union(UnionDeclaration::new("demo", "Odd").with_case("R").with_case("Fut1"))
            .expect("Odd");
        let schema = build_schema(&doc, "Odd").expect("schema");
        let shape = UnionShape::named(&schema, DEFAULT_RUNTIME_PATH);

        assert_eq!(shape.fresh("R"), "R_");
        assert_eq!(shape.fresh("U"), "U");
        assert_eq!(shape.fresh_numbered("Fut"), vec!["Fut1_", "Fut2"]);
    }

    #[test]
    fn test_handler_lints_only_for_wide_unions() {
        assert!(UnionShape::generic(6, DEFAULT_RUNTIME_PATH).handler_lints("").is_empty());
        assert!(
            UnionShape::generic(7, DEFAULT_RUNTIME_PATH)
                .handler_lints("")
                .contains("too_many_arguments")
        );
    }
}
