//! Rust code generation modules.
//!
//! Every generator renders one combinator family from a [`UnionShape`]. The
//! same generator serves named unions and the generic `UnionN` types.

pub mod assertions;
pub mod bind;
pub mod enums;
pub mod map;
pub mod matching;
pub mod partition;
pub mod switching;
pub mod tap;
mod transform;

pub use assertions::AssertionGenerator;
pub use bind::BindGenerator;
pub use enums::CoreGenerator;
pub use map::MapGenerator;
pub use matching::MatchGenerator;
pub use partition::PartitionGenerator;
pub use switching::SwitchGenerator;
pub use tap::TapGenerator;

use crate::shape::{CaseShape, UnionShape};

/// Path of the `Future` trait in emitted code.
pub(crate) const FUTURE: &str = "::core::future::Future";

/// Returns the handler parameter name for a case.
pub(crate) fn handler_name(case: &CaseShape) -> String {
    format!("on_{}", case.stem)
}

/// Renders one `on_<stem>: impl FnOnce(<case>)<returns>,` line per case.
///
/// `returns` yields the return clause for the case at an index, including the
/// leading ` -> `, or an empty string for handlers returning `()`.
pub(crate) fn handler_params<F>(shape: &UnionShape, indent: &str, returns: F) -> String
where
    F: Fn(usize, &CaseShape) -> String,
{
    let mut output = String::new();
    for (i, case) in shape.cases.iter().enumerate() {
        output.push_str(&format!(
            "{indent}{}: impl FnOnce({}){},\n",
            handler_name(case),
            case.type_name,
            returns(i, case)
        ));
    }
    output
}

/// Renders the handler names as a call argument list.
pub(crate) fn handler_args(shape: &UnionShape) -> String {
    shape
        .cases
        .iter()
        .map(handler_name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders `# Arguments` doc lines for one handler per case.
pub(crate) fn handler_docs(shape: &UnionShape, indent: &str) -> String {
    let mut output = format!("{indent}/// # Arguments\n");
    for case in &shape.cases {
        output.push_str(&format!(
            "{indent}/// * `{}` - Called with the `{}` case\n",
            handler_name(case),
            case.type_name
        ));
    }
    output
}

/// Renders a `where` clause binding each future parameter to its output.
pub(crate) fn future_bounds(indent: &str, futures: &[String], outputs: &[String]) -> String {
    let mut output = format!("{indent}where\n");
    for (future, out) in futures.iter().zip(outputs) {
        output.push_str(&format!("{indent}    {future}: {FUTURE}<Output = {out}>,\n"));
    }
    output
}

/// Renders the blanket impl of a pending-input extension trait.
pub(crate) fn pending_blanket_impl(shape: &UnionShape, trait_name: &str) -> String {
    let pending = shape.fresh("Pending");
    let params = shape.type_parameters();
    let impl_generics = if shape.generic {
        format!("<{pending}, {params}>")
    } else {
        format!("<{pending}>")
    };
    format!(
        "impl{impl_generics} {trait_name}{} for {pending}\nwhere\n    {pending}: {FUTURE}<Output = {}>,\n{{\n}}\n\n",
        shape.generics(),
        shape.self_type()
    )
}

/// Renders the header of a pending-input extension trait, up to the brace.
pub(crate) fn pending_trait_header(shape: &UnionShape, trait_name: &str, summary: &str) -> String {
    format!(
        "/// {summary}\n///\n/// Implemented for every future resolving to `{}`; each method awaits the\n/// union first, then behaves like the method of the same name on the union.\npub trait {trait_name}{}: {FUTURE}<Output = {}> + Sized {{\n",
        shape.name,
        shape.generics(),
        shape.self_type()
    )
}
