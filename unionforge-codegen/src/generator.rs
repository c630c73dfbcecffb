//! Named union generation.
//!
//! [`Generator`] runs the six named-union emitters over one validated schema.
//! [`generate_union`] is the full pipeline from a symbol source: build,
//! validate, introspect, emit.

use crate::artifact::{Artifact, Family};
use crate::error::CodegenError;
use crate::rust::{
    AssertionGenerator, BindGenerator, CoreGenerator, MapGenerator, MatchGenerator,
    PartitionGenerator, SwitchGenerator, TapGenerator,
};
use crate::shape::{DEFAULT_RUNTIME_PATH, UnionShape};
use tracing::{debug, info, warn};
use unionforge_schema::{
    Diagnostic, Introspector, SymbolSource, UnionSchema, Validator, build_schema,
};

/// Generator configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Path emitted code uses to reach `Union` and `AssertionFailed`.
    pub runtime_path: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            runtime_path: DEFAULT_RUNTIME_PATH.to_string(),
        }
    }
}

impl GeneratorOptions {
    /// Sets the runtime path, builder style.
    #[must_use]
    pub fn with_runtime_path(mut self, runtime_path: impl Into<String>) -> Self {
        self.runtime_path = runtime_path.into();
        self
    }
}

/// Renders one family for a shape.
pub(crate) fn render(family: Family, shape: &UnionShape) -> String {
    match family {
        Family::Core => CoreGenerator::new(shape).generate(),
        Family::Match => MatchGenerator::new(shape).generate(),
        Family::Switch => SwitchGenerator::new(shape).generate(),
        Family::Map => MapGenerator::new(shape).generate(),
        Family::Bind => BindGenerator::new(shape).generate(),
        Family::Tap => TapGenerator::new(shape).generate(),
        Family::Partition => PartitionGenerator::new(shape).generate(),
        Family::TestAssertions => AssertionGenerator::new(shape).generate(),
    }
}

/// Main code generator for named unions.
pub struct Generator<'a> {
    schema: &'a UnionSchema,
    options: GeneratorOptions,
}

impl<'a> Generator<'a> {
    /// Creates a new generator for a validated, introspected schema.
    #[must_use]
    pub fn new(schema: &'a UnionSchema) -> Self {
        Self {
            schema,
            options: GeneratorOptions::default(),
        }
    }

    /// Replaces the options, builder style.
    #[must_use]
    pub fn with_options(mut self, options: GeneratorOptions) -> Self {
        self.options = options;
        self
    }

    /// Generates one artifact per named-union family.
    ///
    /// Artifacts are named `<union>_<family>.rs` and can all be included into
    /// the same module.
    #[must_use]
    pub fn generate(&self) -> Vec<Artifact> {
        let shape = UnionShape::named(self.schema, &self.options.runtime_path);
        let snake = shape.snake_name();

        Family::NAMED
            .iter()
            .map(|&family| {
                debug!(union = %shape.name, family = family.label(), "rendering");
                let body = render(family, &shape);
                Artifact::new(
                    family,
                    format!("{snake}_{}.rs", family.file_suffix()),
                    &body,
                )
            })
            .collect()
    }
}

/// Artifacts of one named union, with the diagnostics of its validation.
#[derive(Debug, Clone)]
pub struct GeneratedUnion {
    /// Generated files.
    pub artifacts: Vec<Artifact>,
    /// Non-fatal diagnostics (warnings).
    pub diagnostics: Vec<Diagnostic>,
}

/// Builds, validates, introspects and generates a named union.
///
/// # Arguments
/// * `source` - Symbol source declaring the union and its case types
/// * `union_name` - Name of the union declaration
/// * `options` - Generator options
///
/// # Errors
/// Returns `CodegenError::Schema` if the union is not declared, or
/// `CodegenError::Invalid` with every diagnostic if validation fails.
pub fn generate_union<S>(
    source: &S,
    union_name: &str,
    options: &GeneratorOptions,
) -> Result<GeneratedUnion, CodegenError>
where
    S: SymbolSource + ?Sized,
{
    let schema = build_schema(source, union_name)?;
    let validation = Validator::new().validate(&schema);

    if validation.is_fatal() {
        return Err(CodegenError::Invalid {
            union: schema.location_key(),
            diagnostics: validation.into_diagnostics(),
        });
    }
    for diagnostic in validation.diagnostics() {
        warn!("{diagnostic}");
    }

    let schema = Introspector::new(source).populate(schema);
    let artifacts = Generator::new(&schema)
        .with_options(options.clone())
        .generate();
    info!(
        union = %schema.location_key(),
        arity = schema.arity(),
        artifacts = artifacts.len(),
        "generated union"
    );

    Ok(GeneratedUnion {
        artifacts,
        diagnostics: validation.into_diagnostics(),
    })
}
