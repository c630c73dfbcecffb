//! Exhaustive match code generation.

use crate::rust::{
    FUTURE, future_bounds, handler_args, handler_docs, handler_name, handler_params,
    pending_blanket_impl, pending_trait_header,
};
use crate::shape::UnionShape;

/// Generator for `match_with` and `match_async`.
pub struct MatchGenerator<'a> {
    shape: &'a UnionShape,
}

impl<'a> MatchGenerator<'a> {
    /// Creates a new match generator.
    #[must_use]
    pub fn new(shape: &'a UnionShape) -> Self {
        Self { shape }
    }

    /// Returns the name of the pending-input extension trait.
    #[must_use]
    pub fn trait_name(&self) -> String {
        format!("{}MatchFutureExt", self.shape.name)
    }

    /// Generates the match combinators and their pending-input trait.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("{} {{\n", self.shape.impl_header()));
        output.push_str(&self.generate_match());
        output.push_str(&self.generate_match_async());
        output.push_str("}\n\n");

        output.push_str(&self.generate_pending_trait());
        output.push_str(&pending_blanket_impl(self.shape, &self.trait_name()));

        output
    }

    fn generate_match(&self) -> String {
        let shape = self.shape;
        let r = shape.fresh("R");
        let binding = &shape.binding;
        let mut output = String::new();

        output.push_str("    /// Calls the handler of the held case and returns its result.\n");
        output.push_str("    ///\n");
        output.push_str("    /// Exactly one handler runs.\n");
        output.push_str("    ///\n");
        output.push_str(&handler_docs(shape, "    "));
        output.push_str(&shape.handler_lints("    "));
        output.push_str(&format!("    pub fn match_with<{r}>(\n"));
        output.push_str("        self,\n");
        output.push_str(&handler_params(shape, "        ", |_, _| format!(" -> {r}")));
        output.push_str(&format!("    ) -> {r} {{\n"));
        output.push_str("        match self {\n");
        for case in &shape.cases {
            output.push_str(&format!(
                "            Self::{}({binding}) => {}({binding}),\n",
                case.variant,
                handler_name(case)
            ));
        }
        output.push_str("        }\n");
        output.push_str("    }\n\n");

        output
    }

    fn generate_match_async(&self) -> String {
        let shape = self.shape;
        let r = shape.fresh("R");
        let futures = shape.fresh_numbered("Fut");
        let binding = &shape.binding;
        let mut output = String::new();

        output.push_str("    /// Calls the handler of the held case and awaits its future.\n");
        output.push_str("    ///\n");
        output.push_str(&handler_docs(shape, "    "));
        output.push_str(&shape.handler_lints("    "));
        output.push_str(&format!(
            "    pub async fn match_async<{r}, {}>(\n",
            futures.join(", ")
        ));
        output.push_str("        self,\n");
        output.push_str(&handler_params(shape, "        ", |i, _| {
            format!(" -> {}", futures[i])
        }));
        output.push_str(&format!("    ) -> {r}\n"));
        output.push_str(&future_bounds(
            "    ",
            &futures,
            &vec![r.clone(); futures.len()],
        ));
        output.push_str("    {\n");
        output.push_str("        match self {\n");
        for case in &shape.cases {
            output.push_str(&format!(
                "            Self::{}({binding}) => {}({binding}).await,\n",
                case.variant,
                handler_name(case)
            ));
        }
        output.push_str("        }\n");
        output.push_str("    }\n");

        output
    }

    fn generate_pending_trait(&self) -> String {
        let shape = self.shape;
        let r = shape.fresh("R");
        let futures = shape.fresh_numbered("Fut");
        let args = handler_args(shape);
        let mut output = pending_trait_header(
            shape,
            &self.trait_name(),
            &format!("Exhaustive match on a pending `{}`.", shape.name),
        );

        output.push_str("    /// Awaits the union, then calls the handler of the held case.\n");
        output.push_str(&shape.handler_lints("    "));
        output.push_str(&format!("    fn match_with<{r}>(\n"));
        output.push_str("        self,\n");
        output.push_str(&handler_params(shape, "        ", |_, _| format!(" -> {r}")));
        output.push_str(&format!("    ) -> impl {FUTURE}<Output = {r}> {{\n"));
        output.push_str(&format!(
            "        async move {{ self.await.match_with({args}) }}\n"
        ));
        output.push_str("    }\n\n");

        output.push_str(
            "    /// Awaits the union, then calls the handler of the held case and awaits its future.\n",
        );
        output.push_str(&shape.handler_lints("    "));
        output.push_str(&format!(
            "    fn match_async<{r}, {}>(\n",
            futures.join(", ")
        ));
        output.push_str("        self,\n");
        output.push_str(&handler_params(shape, "        ", |i, _| {
            format!(" -> {}", futures[i])
        }));
        output.push_str(&format!("    ) -> impl {FUTURE}<Output = {r}>\n"));
        output.push_str(&future_bounds(
            "    ",
            &futures,
            &vec![r.clone(); futures.len()],
        ));
        output.push_str("    {\n");
        output.push_str(&format!(
            "        async move {{ self.await.match_async({args}).await }}\n"
        ));
        output.push_str("    }\n");
        output.push_str("}\n\n");

        output
    }
}
