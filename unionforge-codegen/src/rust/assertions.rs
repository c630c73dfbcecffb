//! Test assertion code generation.

use crate::shape::{CaseShape, UnionShape};

/// Generator for the `<Union>Assertions` trait.
///
/// Every case gets `should_be_<case>`, returning the held value. Record cases
/// (and every case of a generic union) also get `should_be_<case>_eq`. Failed
/// assertions panic with an `AssertionFailed` payload.
pub struct AssertionGenerator<'a> {
    shape: &'a UnionShape,
}

impl<'a> AssertionGenerator<'a> {
    /// Creates a new assertion generator.
    #[must_use]
    pub fn new(shape: &'a UnionShape) -> Self {
        Self { shape }
    }

    /// Returns the name of the assertion trait.
    #[must_use]
    pub fn trait_name(&self) -> String {
        format!("{}Assertions", self.shape.name)
    }

    /// Generates the assertion trait and its implementation.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();

        output.push_str(&self.generate_trait());
        output.push_str(&self.generate_impl());

        output
    }

    fn has_eq(&self, case: &CaseShape) -> bool {
        self.shape.generic || case.is_record
    }

    fn eq_bound(&self, case: &CaseShape, indent: &str) -> String {
        if self.shape.generic {
            format!(
                "\n{indent}where\n{indent}    {}: PartialEq + ::core::fmt::Debug,\n{indent}",
                case.type_name
            )
        } else {
            " ".to_string()
        }
    }

    fn generate_trait(&self) -> String {
        let shape = self.shape;
        let mut output = String::new();

        output.push_str(&format!("/// Test assertions for `{}`.\n", shape.name));
        output.push_str(&format!(
            "pub trait {}{} {{\n",
            self.trait_name(),
            shape.generics()
        ));

        let mut methods = Vec::new();
        for case in &shape.cases {
            let mut method = String::new();
            method.push_str(&format!(
                "    /// Asserts the union holds a `{}` and returns it.\n",
                case.type_name
            ));
            method.push_str("    ///\n");
            method.push_str("    /// # Panics\n");
            method.push_str("    /// Panics with an `AssertionFailed` payload if another case is held.\n");
            method.push_str(&format!(
                "    fn should_be_{}(&self) -> &{};\n",
                case.stem, case.type_name
            ));
            methods.push(method);

            if self.has_eq(case) {
                let mut method = String::new();
                method.push_str(&format!(
                    "    /// Asserts the union holds a `{}` equal to `expected` and returns it.\n",
                    case.type_name
                ));
                method.push_str("    ///\n");
                method.push_str("    /// # Panics\n");
                method.push_str(
                    "    /// Panics with an `AssertionFailed` payload if another case is held or the values differ.\n",
                );
                let bound = self.eq_bound(case, "    ");
                method.push_str(&format!(
                    "    fn should_be_{}_eq(&self, expected: &{}) -> &{}{};\n",
                    case.stem,
                    case.type_name,
                    case.type_name,
                    bound.trim_end().trim_end_matches(',')
                ));
                methods.push(method);
            }
        }
        output.push_str(&methods.join("\n"));
        output.push_str("}\n\n");

        output
    }

    fn generate_impl(&self) -> String {
        let shape = self.shape;
        let runtime = &shape.runtime_path;
        let binding = &shape.binding;
        let mut output = String::new();

        output.push_str(&format!(
            "impl{} {}{} for {} {{\n",
            shape.generics(),
            self.trait_name(),
            shape.generics(),
            shape.self_type()
        ));

        let mut methods = Vec::new();
        for case in &shape.cases {
            let mut method = String::new();
            method.push_str("    #[track_caller]\n");
            method.push_str(&format!(
                "    fn should_be_{}(&self) -> &{} {{\n",
                case.stem, case.type_name
            ));
            method.push_str("        match self {\n");
            method.push_str(&format!(
                "            Self::{}({binding}) => {binding},\n",
                case.variant
            ));
            method.push_str(&format!(
                "            other => {runtime}::AssertionFailed::case_mismatch(\"{}\", \"{}\", other.case_name()).raise(),\n",
                shape.name, case.variant
            ));
            method.push_str("        }\n");
            method.push_str("    }\n");
            methods.push(method);

            if self.has_eq(case) {
                let mut method = String::new();
                method.push_str("    #[track_caller]\n");
                method.push_str(&format!(
                    "    fn should_be_{}_eq(&self, expected: &{}) -> &{}{}{{\n",
                    case.stem,
                    case.type_name,
                    case.type_name,
                    self.eq_bound(case, "    ")
                ));
                method.push_str(&format!(
                    "        let {binding} = self.should_be_{}();\n",
                    case.stem
                ));
                method.push_str(&format!("        if {binding} != expected {{\n"));
                method.push_str(&format!(
                    "            {runtime}::AssertionFailed::value_mismatch(\"{}\", \"{}\", expected, {binding}).raise();\n",
                    shape.name, case.variant
                ));
                method.push_str("        }\n");
                method.push_str(&format!("        {binding}\n"));
                method.push_str("    }\n");
                methods.push(method);
            }
        }
        output.push_str(&methods.join("\n"));
        output.push_str("}\n\n");

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rust::test_support::{assert_parses, mixed_shape, status_shape};
    use crate::shape::DEFAULT_RUNTIME_PATH;

    #[test]
    fn test_named_assertions() {
        let shape = status_shape();
        let code = AssertionGenerator::new(&shape).generate();

        assert!(code.contains("pub trait StatusAssertions {"));
        assert!(code.contains("    fn should_be_retry(&self) -> &Retry;\n"));
        assert!(code.contains("    fn should_be_retry_eq(&self, expected: &Retry) -> &Retry;\n"));
        assert!(code.contains("impl StatusAssertions for Status {"));
        assert!(code.contains("::unionforge_core::AssertionFailed::case_mismatch(\"Status\", \"Aborted\", other.case_name()).raise(),"));
        assert!(code.contains("::unionforge_core::AssertionFailed::value_mismatch(\"Status\", \"Active\", expected, value).raise();"));
        assert_eq!(code.matches("#[track_caller]").count(), 6);
        assert_parses(&code);
    }

    #[test]
    fn test_equality_assertion_only_for_records() {
        let shape = mixed_shape();
        let code = AssertionGenerator::new(&shape).generate();

        assert!(code.contains("fn should_be_done_eq("));
        assert!(code.contains("fn should_be_handle(&self) -> &Handle"));
        assert!(!code.contains("should_be_handle_eq"));
        assert_parses(&code);
    }

    #[test]
    fn test_generic_assertions() {
        let shape = UnionShape::generic(2, DEFAULT_RUNTIME_PATH);
        let code = AssertionGenerator::new(&shape).generate();

        assert!(code.contains("pub trait Union2Assertions<T1, T2> {"));
        assert!(code.contains("    fn should_be_case2_eq(&self, expected: &T2) -> &T2\n    where\n        T2: PartialEq + ::core::fmt::Debug;\n"));
        assert!(code.contains("impl<T1, T2> Union2Assertions<T1, T2> for Union2<T1, T2> {"));
        assert!(code.contains("        T1: PartialEq + ::core::fmt::Debug,\n    {\n"));
        assert_parses(&code);
    }
}
