//! Code generation shared by the map and bind combinators.
//!
//! Both families have the same matrix of methods (full and per-case, sync and
//! async, plus a pending-input trait); they differ in what a handler returns
//! and how its result is put back into a union.

use crate::rust::{
    FUTURE, future_bounds, handler_args, handler_docs, handler_name, handler_params,
    pending_blanket_impl, pending_trait_header,
};
use crate::shape::{CaseShape, UnionShape};

/// Which transform family to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TransformKind {
    /// Handlers return a replacement case value.
    Map,
    /// Handlers return a whole union.
    Bind,
}

impl TransformKind {
    const fn prefix(self) -> &'static str {
        match self {
            Self::Map => "map",
            Self::Bind => "bind",
        }
    }

    const fn trait_suffix(self) -> &'static str {
        match self {
            Self::Map => "MapFutureExt",
            Self::Bind => "BindFutureExt",
        }
    }
}

/// One method of the matrix, ready to render as inherent or trait method.
struct Method {
    name: String,
    docs: String,
    generics: Vec<String>,
    params: String,
    result: String,
    bounds: String,
    body: String,
    forward: String,
    is_async: bool,
}

/// Renders the map or bind family for a union.
pub(crate) struct TransformEmitter<'a> {
    shape: &'a UnionShape,
    kind: TransformKind,
}

impl<'a> TransformEmitter<'a> {
    pub(crate) fn new(shape: &'a UnionShape, kind: TransformKind) -> Self {
        Self { shape, kind }
    }

    pub(crate) fn trait_name(&self) -> String {
        format!("{}{}", self.shape.name, self.kind.trait_suffix())
    }

    pub(crate) fn generate(&self) -> String {
        let mut methods = vec![self.full(false), self.full(true)];
        for (index, case) in self.shape.cases.iter().enumerate() {
            methods.push(self.partial(index, case, false));
            methods.push(self.partial(index, case, true));
        }

        let mut output = String::new();

        output.push_str(&format!("{} {{\n", self.shape.impl_header()));
        let inherent: Vec<String> = methods.iter().map(render_inherent).collect();
        output.push_str(&inherent.join("\n"));
        output.push_str("}\n\n");

        let summary = match self.kind {
            TransformKind::Map => format!("Case transforms on a pending `{}`.", self.shape.name),
            TransformKind::Bind => format!("Rebinds on a pending `{}`.", self.shape.name),
        };
        output.push_str(&pending_trait_header(
            self.shape,
            &self.trait_name(),
            &summary,
        ));
        let pending: Vec<String> = methods.iter().map(render_pending).collect();
        output.push_str(&pending.join("\n"));
        output.push_str("}\n\n");

        output.push_str(&pending_blanket_impl(self.shape, &self.trait_name()));

        output
    }

    /// Method taking one handler per case.
    fn full(&self, is_async: bool) -> Method {
        let shape = self.shape;
        let binding = &shape.binding;

        let targets: Vec<String> = if shape.generic {
            shape.fresh_numbered("U")
        } else {
            shape.cases.iter().map(|c| c.type_name.clone()).collect()
        };
        let result = shape.retyped(&targets);
        let outputs: Vec<String> = match self.kind {
            TransformKind::Map => targets.clone(),
            TransformKind::Bind => vec![result.clone(); shape.arity()],
        };

        let mut generics = if shape.generic {
            targets.clone()
        } else {
            Vec::new()
        };
        let mut bounds = String::new();
        let params = if is_async {
            let futures = shape.fresh_numbered("Fut");
            generics.extend(futures.iter().cloned());
            bounds = future_bounds("    ", &futures, &outputs);
            handler_params(shape, "        ", |i, _| format!(" -> {}", futures[i]))
        } else {
            handler_params(shape, "        ", |i, _| format!(" -> {}", outputs[i]))
        };

        let await_suffix = if is_async { ".await" } else { "" };
        let mut body = String::from("        match self {\n");
        for case in &shape.cases {
            let call = format!("{}({binding}){await_suffix}", handler_name(case));
            let value = match self.kind {
                TransformKind::Map => format!("{}::{}({call})", shape.name, case.variant),
                TransformKind::Bind => call,
            };
            body.push_str(&format!(
                "            Self::{}({binding}) => {value},\n",
                case.variant
            ));
        }
        body.push_str("        }\n");

        let name = if is_async {
            format!("{}_async", self.kind.prefix())
        } else {
            self.kind.prefix().to_string()
        };

        let mut docs = match self.kind {
            TransformKind::Map => {
                String::from("    /// Replaces the held case value with its handler's result.\n")
            }
            TransformKind::Bind => String::from(
                "    /// Replaces the whole union with the union returned by the held case's handler.\n",
            ),
        };
        docs.push_str("    ///\n");
        docs.push_str(&handler_docs(shape, "    "));
        docs.push_str(&shape.handler_lints("    "));

        Method {
            forward: format!("{name}({})", handler_args(shape)),
            name,
            docs,
            generics,
            params,
            result,
            bounds,
            body,
            is_async,
        }
    }

    /// Method transforming one case, passing every other case through.
    fn partial(&self, index: usize, target: &CaseShape, is_async: bool) -> Method {
        let shape = self.shape;
        let binding = &shape.binding;

        let replacement = if shape.generic {
            shape.fresh("U")
        } else {
            target.type_name.clone()
        };
        let result = shape.retyped_case(index, &replacement);
        let output = match self.kind {
            TransformKind::Map => replacement.clone(),
            TransformKind::Bind => result.clone(),
        };

        let mut generics = if shape.generic {
            vec![replacement.clone()]
        } else {
            Vec::new()
        };
        let handler_output = if is_async {
            let future = shape.fresh("Fut");
            generics.push(future.clone());
            future
        } else {
            output.clone()
        };
        let bounds = if is_async {
            future_bounds(
                "    ",
                std::slice::from_ref(&handler_output),
                std::slice::from_ref(&output),
            )
        } else {
            String::new()
        };
        let params = format!(
            "        f: impl FnOnce({}) -> {handler_output},\n",
            target.type_name
        );

        let await_suffix = if is_async { ".await" } else { "" };
        let mut body = String::from("        match self {\n");
        for case in &shape.cases {
            let value = if case.ordinal == target.ordinal {
                let call = format!("f({binding}){await_suffix}");
                match self.kind {
                    TransformKind::Map => format!("{}::{}({call})", shape.name, case.variant),
                    TransformKind::Bind => call,
                }
            } else {
                format!("{}::{}({binding})", shape.name, case.variant)
            };
            body.push_str(&format!(
                "            Self::{}({binding}) => {value},\n",
                case.variant
            ));
        }
        body.push_str("        }\n");

        let name = if is_async {
            format!("{}_{}_async", self.kind.prefix(), target.stem)
        } else {
            format!("{}_{}", self.kind.prefix(), target.stem)
        };

        let mut docs = match self.kind {
            TransformKind::Map => format!(
                "    /// Replaces a held `{}` with the result of `f`.\n",
                target.type_name
            ),
            TransformKind::Bind => format!(
                "    /// Replaces the whole union with the result of `f` if it holds a `{}`.\n",
                target.type_name
            ),
        };
        docs.push_str("    ///\n    /// Other cases pass through unchanged.\n");

        Method {
            forward: format!("{name}(f)"),
            name,
            docs,
            generics,
            params,
            result,
            bounds,
            body,
            is_async,
        }
    }
}

fn generic_list(generics: &[String]) -> String {
    if generics.is_empty() {
        String::new()
    } else {
        format!("<{}>", generics.join(", "))
    }
}

fn render_inherent(method: &Method) -> String {
    let mut output = method.docs.clone();
    if method.is_async {
        output.push_str(&format!(
            "    pub async fn {}{}(\n",
            method.name,
            generic_list(&method.generics)
        ));
    } else {
        output.push_str("    #[must_use]\n");
        output.push_str(&format!(
            "    pub fn {}{}(\n",
            method.name,
            generic_list(&method.generics)
        ));
    }
    output.push_str("        self,\n");
    output.push_str(&method.params);
    if method.bounds.is_empty() {
        output.push_str(&format!("    ) -> {} {{\n", method.result));
    } else {
        output.push_str(&format!("    ) -> {}\n", method.result));
        output.push_str(&method.bounds);
        output.push_str("    {\n");
    }
    output.push_str(&method.body);
    output.push_str("    }\n");
    output
}

fn render_pending(method: &Method) -> String {
    let mut output = String::new();
    // Keep only the summary line and lint allowances of the inherent docs.
    for line in method.docs.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("#[") || output.is_empty() {
            output.push_str(line);
            output.push('\n');
        }
    }
    output.push_str(&format!(
        "    fn {}{}(\n",
        method.name,
        generic_list(&method.generics)
    ));
    output.push_str("        self,\n");
    output.push_str(&method.params);
    let returns = format!("impl {FUTURE}<Output = {}>", method.result);
    if method.bounds.is_empty() {
        output.push_str(&format!("    ) -> {returns} {{\n"));
    } else {
        output.push_str(&format!("    ) -> {returns}\n"));
        output.push_str(&method.bounds);
        output.push_str("    {\n");
    }
    let await_suffix = if method.is_async { ".await" } else { "" };
    output.push_str(&format!(
        "        async move {{ self.await.{}{await_suffix} }}\n",
        method.forward
    ));
    output.push_str("    }\n");
    output
}
