//! Union type code generation.

use crate::shape::{CaseShape, UnionShape};

/// Generator for the union enum, its constructors and its accessors.
pub struct CoreGenerator<'a> {
    shape: &'a UnionShape,
}

impl<'a> CoreGenerator<'a> {
    /// Creates a new core generator.
    #[must_use]
    pub fn new(shape: &'a UnionShape) -> Self {
        Self { shape }
    }

    /// Generates the union type and its inherent API.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();

        output.push_str(&self.generate_imports());
        output.push_str(&self.generate_enum());

        output.push_str(&format!("{} {{\n", self.shape.impl_header()));
        for case in &self.shape.cases {
            output.push_str(&self.generate_constructors(case));
        }
        output.push_str(&self.generate_tag());
        output.push_str(&self.generate_case_name());
        for case in &self.shape.cases {
            output.push_str(&self.generate_accessors(case));
        }
        output.push_str("}\n\n");

        if !self.shape.generic {
            for case in &self.shape.cases {
                output.push_str(&self.generate_from(case));
            }
        }
        output.push_str(&self.generate_union_impl());

        output
    }

    /// Generates `use` lines for cases living outside the union's module.
    fn generate_imports(&self) -> String {
        let mut output = String::new();
        let mut imports: Vec<&str> = self
            .shape
            .cases
            .iter()
            .filter_map(|c| c.import.as_deref())
            .collect();
        imports.sort_unstable();
        imports.dedup();

        for import in &imports {
            output.push_str(&format!("use {import};\n"));
        }
        if !imports.is_empty() {
            output.push('\n');
        }
        output
    }

    /// Generates the enum definition.
    fn generate_enum(&self) -> String {
        let mut output = String::new();
        let shape = self.shape;

        if shape.generic {
            output.push_str(&format!(
                "/// Union of {} cases: {}.\n",
                shape.arity(),
                shape.describe_cases()
            ));
            output.push_str("///\n/// Holds exactly one case at a time.\n");
            output.push_str("#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]\n");
        } else {
            output.push_str(&format!("/// Either {}.\n", shape.describe_cases()));
            output.push_str(&format!(
                "///\n/// Holds exactly one case at a time. Same shape as `Union{}`.\n",
                shape.arity()
            ));
            if shape.all_records() {
                output.push_str("#[derive(Debug, Clone, PartialEq)]\n");
            }
        }

        output.push_str(&format!("pub enum {} {{\n", shape.self_type()));
        for case in &shape.cases {
            output.push_str(&format!(
                "    /// Case {}: `{}`.\n",
                case.ordinal, case.type_name
            ));
            output.push_str(&format!("    {}({}),\n", case.variant, case.type_name));
        }
        output.push_str("}\n\n");

        output
    }

    /// Generates `from_<case>` and, for cases with parameters, `new_<case>`.
    fn generate_constructors(&self, case: &CaseShape) -> String {
        let mut output = String::new();
        let binding = &self.shape.binding;

        output.push_str(&format!(
            "    /// Creates a `{}` holding the given `{}`.\n",
            self.shape.name, case.type_name
        ));
        output.push_str("    #[must_use]\n");
        output.push_str(&format!(
            "    pub fn from_{}({binding}: {}) -> Self {{\n",
            case.stem, case.type_name
        ));
        output.push_str(&format!("        Self::{}({binding})\n", case.variant));
        output.push_str("    }\n\n");

        let Some(constructor) = &case.constructor else {
            return output;
        };
        if case.parameters.is_empty() {
            return output;
        }

        let args: Vec<String> = case.parameters.iter().map(|p| p.argument_name()).collect();
        let params: Vec<String> = case
            .parameters
            .iter()
            .zip(&args)
            .map(|(p, arg)| format!("{arg}: {}", p.type_name))
            .collect();

        output.push_str(&format!(
            "    /// Creates a `{}` holding a new `{}`.\n",
            self.shape.name, case.type_name
        ));
        output.push_str("    ///\n");
        output.push_str("    /// # Arguments\n");
        for (param, arg) in case.parameters.iter().zip(&args) {
            output.push_str(&format!("    /// * `{arg}` - {}\n", param.display_text()));
        }
        if case.parameters.len() > 7 {
            output.push_str("    #[allow(clippy::too_many_arguments)]\n");
        }
        output.push_str("    #[must_use]\n");
        output.push_str(&format!(
            "    pub fn new_{}({}) -> Self {{\n",
            case.stem,
            params.join(", ")
        ));

        let construction = if constructor.implicit {
            let fields: Vec<String> = case
                .parameters
                .iter()
                .zip(&args)
                .map(|(p, arg)| {
                    let field = p.field_name();
                    if field == *arg {
                        field
                    } else {
                        format!("{field}: {arg}")
                    }
                })
                .collect();
            format!("{} {{ {} }}", case.type_name, fields.join(", "))
        } else {
            format!(
                "{}::{}({})",
                case.type_name,
                constructor.name,
                args.join(", ")
            )
        };
        output.push_str(&format!("        Self::{}({construction})\n", case.variant));
        output.push_str("    }\n\n");

        output
    }

    /// Generates `tag`.
    fn generate_tag(&self) -> String {
        let mut output = String::new();

        output.push_str("    /// Returns the 1-based ordinal of the held case.\n");
        output.push_str("    #[must_use]\n");
        output.push_str("    pub const fn tag(&self) -> u8 {\n");
        output.push_str("        match self {\n");
        for case in &self.shape.cases {
            output.push_str(&format!(
                "            Self::{}(_) => {},\n",
                case.variant, case.ordinal
            ));
        }
        output.push_str("        }\n");
        output.push_str("    }\n\n");

        output
    }

    /// Generates `case_name`.
    fn generate_case_name(&self) -> String {
        let mut output = String::new();

        output.push_str("    /// Returns the name of the held case.\n");
        output.push_str("    #[must_use]\n");
        output.push_str("    pub const fn case_name(&self) -> &'static str {\n");
        output.push_str("        match self {\n");
        for case in &self.shape.cases {
            output.push_str(&format!(
                "            Self::{}(_) => \"{}\",\n",
                case.variant, case.variant
            ));
        }
        output.push_str("        }\n");
        output.push_str("    }\n\n");

        output
    }

    /// Generates `is_<case>`, `try_get_<case>` and `try_into_<case>`.
    fn generate_accessors(&self, case: &CaseShape) -> String {
        let mut output = String::new();
        let binding = &self.shape.binding;

        output.push_str(&format!(
            "    /// Returns `true` if the union holds a `{}`.\n",
            case.type_name
        ));
        output.push_str("    #[must_use]\n");
        output.push_str(&format!(
            "    pub const fn is_{}(&self) -> bool {{\n",
            case.stem
        ));
        output.push_str(&format!(
            "        matches!(self, Self::{}(_))\n",
            case.variant
        ));
        output.push_str("    }\n\n");

        output.push_str(&format!(
            "    /// Returns the held `{}`, or `None` if another case is held.\n",
            case.type_name
        ));
        output.push_str("    #[must_use]\n");
        output.push_str(&format!(
            "    pub fn try_get_{}(&self) -> Option<&{}> {{\n",
            case.stem, case.type_name
        ));
        output.push_str("        match self {\n");
        output.push_str(&format!(
            "            Self::{}({binding}) => Some({binding}),\n",
            case.variant
        ));
        output.push_str("            _ => None,\n");
        output.push_str("        }\n");
        output.push_str("    }\n\n");

        output.push_str(&format!(
            "    /// Converts into the held `{}`.\n",
            case.type_name
        ));
        output.push_str("    ///\n");
        output.push_str("    /// # Errors\n");
        output.push_str("    /// Returns the union unchanged if another case is held.\n");
        output.push_str(&format!(
            "    pub fn try_into_{}(self) -> Result<{}, Self> {{\n",
            case.stem, case.type_name
        ));
        output.push_str("        match self {\n");
        output.push_str(&format!(
            "            Self::{}({binding}) => Ok({binding}),\n",
            case.variant
        ));
        output.push_str("            other => Err(other),\n");
        output.push_str("        }\n");
        output.push_str("    }\n\n");

        output
    }

    /// Generates the `From` conversion of a case into the union.
    fn generate_from(&self, case: &CaseShape) -> String {
        let binding = &self.shape.binding;
        let mut output = String::new();

        output.push_str(&format!(
            "impl From<{}> for {} {{\n",
            case.type_name, self.shape.name
        ));
        output.push_str(&format!(
            "    fn from({binding}: {}) -> Self {{\n",
            case.type_name
        ));
        output.push_str(&format!("        Self::{}({binding})\n", case.variant));
        output.push_str("    }\n");
        output.push_str("}\n\n");

        output
    }

    /// Generates the runtime `Union` trait implementation.
    fn generate_union_impl(&self) -> String {
        let shape = self.shape;
        let mut output = String::new();

        output.push_str(&format!(
            "impl{} {}::Union for {} {{\n",
            shape.generics(),
            shape.runtime_path,
            shape.self_type()
        ));
        output.push_str(&format!("    const ARITY: usize = {};\n\n", shape.arity()));
        output.push_str("    fn tag(&self) -> u8 {\n");
        output.push_str("        Self::tag(self)\n");
        output.push_str("    }\n\n");
        output.push_str("    fn case_name(&self) -> &'static str {\n");
        output.push_str("        Self::case_name(self)\n");
        output.push_str("    }\n");
        output.push_str("}\n\n");

        output
    }
}
