//! Exhaustive switch code generation.

use crate::rust::{
    FUTURE, future_bounds, handler_args, handler_docs, handler_name, handler_params,
    pending_blanket_impl, pending_trait_header,
};
use crate::shape::UnionShape;

/// Generator for `switch` and `switch_async`.
///
/// Same shape as the match combinators, but handlers return `()`.
pub struct SwitchGenerator<'a> {
    shape: &'a UnionShape,
}

impl<'a> SwitchGenerator<'a> {
    /// Creates a new switch generator.
    #[must_use]
    pub fn new(shape: &'a UnionShape) -> Self {
        Self { shape }
    }

    /// Returns the name of the pending-input extension trait.
    #[must_use]
    pub fn trait_name(&self) -> String {
        format!("{}SwitchFutureExt", self.shape.name)
    }

    /// Generates the switch combinators and their pending-input trait.
    #[must_use]
    pub fn generate(&self) -> String {
        let shape = self.shape;
        let futures = shape.fresh_numbered("Fut");
        let units = vec!["()".to_string(); futures.len()];
        let binding = &shape.binding;
        let args = handler_args(shape);
        let mut output = String::new();

        output.push_str(&format!("{} {{\n", shape.impl_header()));

        output.push_str("    /// Calls the handler of the held case.\n");
        output.push_str("    ///\n");
        output.push_str(&handler_docs(shape, "    "));
        output.push_str(&shape.handler_lints("    "));
        output.push_str("    pub fn switch(\n");
        output.push_str("        self,\n");
        output.push_str(&handler_params(shape, "        ", |_, _| String::new()));
        output.push_str("    ) {\n");
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

        output.push_str("    /// Calls the handler of the held case and awaits its future.\n");
        output.push_str("    ///\n");
        output.push_str(&handler_docs(shape, "    "));
        output.push_str(&shape.handler_lints("    "));
        output.push_str(&format!(
            "    pub async fn switch_async<{}>(\n",
            futures.join(", ")
        ));
        output.push_str("        self,\n");
        output.push_str(&handler_params(shape, "        ", |i, _| {
            format!(" -> {}", futures[i])
        }));
        output.push_str("    )\n");
        output.push_str(&future_bounds("    ", &futures, &units));
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
        output.push_str("}\n\n");

        output.push_str(&pending_trait_header(
            shape,
            &self.trait_name(),
            &format!("Exhaustive switch on a pending `{}`.", shape.name),
        ));

        output.push_str("    /// Awaits the union, then calls the handler of the held case.\n");
        output.push_str(&shape.handler_lints("    "));
        output.push_str("    fn switch(\n");
        output.push_str("        self,\n");
        output.push_str(&handler_params(shape, "        ", |_, _| String::new()));
        output.push_str(&format!("    ) -> impl {FUTURE}<Output = ()> {{\n"));
        output.push_str(&format!("        async move {{ self.await.switch({args}) }}\n"));
        output.push_str("    }\n\n");

        output.push_str(
            "    /// Awaits the union, then calls the handler of the held case and awaits its future.\n",
        );
        output.push_str(&shape.handler_lints("    "));
        output.push_str(&format!(
            "    fn switch_async<{}>(\n",
            futures.join(", ")
        ));
        output.push_str("        self,\n");
        output.push_str(&handler_params(shape, "        ", |i, _| {
            format!(" -> {}", futures[i])
        }));
        output.push_str(&format!("    ) -> impl {FUTURE}<Output = ()>\n"));
        output.push_str(&future_bounds("    ", &futures, &units));
        output.push_str("    {\n");
        output.push_str(&format!(
            "        async move {{ self.await.switch_async({args}).await }}\n"
        ));
        output.push_str("    }\n");
        output.push_str("}\n\n");

        output.push_str(&pending_blanket_impl(shape, &self.trait_name()));

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rust::test_support::{assert_parses, status_shape};
    use crate::shape::DEFAULT_RUNTIME_PATH;

    #[test]
    fn test_named_switch() {
        let shape = status_shape();
        let code = SwitchGenerator::new(&shape).generate();

        assert!(code.contains("    pub fn switch(\n        self,\n        on_active: impl FnOnce(Active),\n"));
        assert!(code.contains("Self::Active(value) => on_active(value),"));
        assert!(code.contains("pub async fn switch_async<Fut1, Fut2, Fut3>("));
        assert!(code.contains("Fut3: ::core::future::Future<Output = ()>,"));
        assert!(code.contains("pub trait StatusSwitchFutureExt"));
        assert!(code.contains("async move { self.await.switch(on_active, on_retry, on_aborted) }"));
        assert!(code.contains("impl<Pending> StatusSwitchFutureExt for Pending"));
        assert_parses(&code);
    }

    #[test]
    fn test_generic_switch() {
        let shape = UnionShape::generic(2, DEFAULT_RUNTIME_PATH);
        let code = SwitchGenerator::new(&shape).generate();

        assert!(code.contains("on_case2: impl FnOnce(T2),"));
        assert!(code.contains("impl<Pending, T1, T2> Union2SwitchFutureExt<T1, T2> for Pending"));
        assert_parses(&code);
    }
}
