//! Partition code generation.

use crate::shape::UnionShape;

/// Generator for `partition`: split unions into one collection per case.
pub struct PartitionGenerator<'a> {
    shape: &'a UnionShape,
}

impl<'a> PartitionGenerator<'a> {
    /// Creates a new partition generator.
    #[must_use]
    pub fn new(shape: &'a UnionShape) -> Self {
        Self { shape }
    }

    /// Generates the partition function.
    #[must_use]
    pub fn generate(&self) -> String {
        let shape = self.shape;
        let binding = &shape.binding;
        let items = shape.fresh("I");
        let tuple: Vec<String> = shape
            .cases
            .iter()
            .map(|c| format!("Vec<{}>", c.type_name))
            .collect();
        let mut output = String::new();

        output.push_str(&format!("{} {{\n", shape.impl_header()));
        output.push_str("    /// Splits unions by held case, keeping their order within each case.\n");
        output.push_str("    ///\n");
        output.push_str("    /// # Returns\n");
        output.push_str("    /// One vector per case, in declaration order.\n");
        if shape.arity() >= 4 {
            output.push_str("    #[allow(clippy::type_complexity)]\n");
        }
        output.push_str("    #[must_use]\n");
        output.push_str(&format!(
            "    pub fn partition<{items}>(items: {items}) -> ({})\n",
            tuple.join(", ")
        ));
        output.push_str("    where\n");
        output.push_str(&format!("        {items}: IntoIterator<Item = Self>,\n"));
        output.push_str("    {\n");
        for case in &shape.cases {
            output.push_str(&format!("        let mut {} = Vec::new();\n", case.stem));
        }
        output.push_str("        for item in items {\n");
        output.push_str("            match item {\n");
        for case in &shape.cases {
            output.push_str(&format!(
                "                Self::{}({binding}) => {}.push({binding}),\n",
                case.variant, case.stem
            ));
        }
        output.push_str("            }\n");
        output.push_str("        }\n");
        let stems: Vec<&str> = shape.cases.iter().map(|c| c.stem.as_str()).collect();
        output.push_str(&format!("        ({})\n", stems.join(", ")));
        output.push_str("    }\n");
        output.push_str("}\n\n");

        output
    }
}
