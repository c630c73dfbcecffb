//! Tap combinator code generation.

use crate::shape::UnionShape;

/// Generator for `tap_<case>`: run a side effect on one case, keep the union.
pub struct TapGenerator<'a> {
    shape: &'a UnionShape,
}

impl<'a> TapGenerator<'a> {
    /// Creates a new tap generator.
    #[must_use]
    pub fn new(shape: &'a UnionShape) -> Self {
        Self { shape }
    }

    /// Generates one tap method per case.
    #[must_use]
    pub fn generate(&self) -> String {
        let shape = self.shape;
        let binding = &shape.binding;
        let mut output = String::new();

        output.push_str(&format!("{} {{\n", shape.impl_header()));
        let methods: Vec<String> = shape
            .cases
            .iter()
            .map(|case| {
                let mut method = String::new();
                method.push_str(&format!(
                    "    /// Calls `f` with the held `{}`, if any, and returns the union unchanged.\n",
                    case.type_name
                ));
                method.push_str("    #[must_use]\n");
                method.push_str(&format!(
                    "    pub fn tap_{}(self, f: impl FnOnce(&{})) -> Self {{\n",
                    case.stem, case.type_name
                ));
                method.push_str(&format!(
                    "        if let Self::{}({binding}) = &self {{\n",
                    case.variant
                ));
                method.push_str(&format!("            f({binding});\n"));
                method.push_str("        }\n");
                method.push_str("        self\n");
                method.push_str("    }\n");
                method
            })
            .collect();
        output.push_str(&methods.join("\n"));
        output.push_str("}\n\n");

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rust::test_support::assert_parses;
    use crate::shape::DEFAULT_RUNTIME_PATH;

    #[test]
    fn test_generic_tap() {
        let shape = UnionShape::generic(3, DEFAULT_RUNTIME_PATH);
        let code = TapGenerator::new(&shape).generate();

        assert!(code.contains("pub fn tap_case2(self, f: impl FnOnce(&T2)) -> Self {"));
        assert!(code.contains("if let Self::Case2(value) = &self {"));
        assert_eq!(code.matches("pub fn tap_").count(), 3);
        assert_parses(&code);
    }
}
