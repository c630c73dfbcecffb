//! Generated artifacts and their output layout.

use crate::error::CodegenError;
use std::path::{Path, PathBuf};

/// Header line of every generated file.
pub const GENERATED_HEADER: &str = "// @generated by unionforge. Do not edit.\n";

/// Combinator family an artifact belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Family {
    /// The union type, constructors and accessors.
    Core,
    /// Exhaustive expression dispatch.
    Match,
    /// Exhaustive side-effecting dispatch.
    Switch,
    /// Case value transforms.
    Map,
    /// Whole-union rebinds.
    Bind,
    /// Side-effecting peeks at one case.
    Tap,
    /// Splitting collections of unions by case.
    Partition,
    /// Test assertion helpers.
    TestAssertions,
}

impl Family {
    /// Families generated for a named union.
    pub const NAMED: [Self; 6] = [
        Self::Core,
        Self::Match,
        Self::Switch,
        Self::Map,
        Self::Bind,
        Self::TestAssertions,
    ];

    /// Families generated by the arity sweep.
    pub const SWEEP: [Self; 8] = [
        Self::Core,
        Self::Match,
        Self::Switch,
        Self::Map,
        Self::Bind,
        Self::Tap,
        Self::Partition,
        Self::TestAssertions,
    ];

    /// Returns a human readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Match => "match",
            Self::Switch => "switch",
            Self::Map => "map",
            Self::Bind => "bind",
            Self::Tap => "tap",
            Self::Partition => "partition",
            Self::TestAssertions => "test assertions",
        }
    }

    /// Returns the file name suffix of a named union artifact.
    #[must_use]
    pub const fn file_suffix(self) -> &'static str {
        match self {
            Self::Core => "union",
            Self::Match => "match",
            Self::Switch => "switch",
            Self::Map => "map",
            Self::Bind => "bind",
            Self::Tap => "tap",
            Self::Partition => "partition",
            Self::TestAssertions => "test_extensions",
        }
    }

    /// Returns the relative path of the sweep artifact for this family.
    #[must_use]
    pub const fn sweep_path(self) -> &'static str {
        match self {
            Self::Core => "union.rs",
            Self::Match => "extensions/match_extensions.rs",
            Self::Switch => "extensions/switch_extensions.rs",
            Self::Map => "extensions/map_extensions.rs",
            Self::Bind => "extensions/bind_extensions.rs",
            Self::Tap => "extensions/tap_extensions.rs",
            Self::Partition => "collections/partition_extensions.rs",
            Self::TestAssertions => "test_extensions/test_extensions.rs",
        }
    }
}

/// One generated source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Family the contents belong to.
    pub family: Family,
    /// Path relative to the output directory.
    pub path: PathBuf,
    /// Rust source.
    pub contents: String,
}

impl Artifact {
    /// Creates an artifact, prefixing the contents with the generated header.
    #[must_use]
    pub fn new(family: Family, path: impl Into<PathBuf>, body: &str) -> Self {
        let mut contents = String::with_capacity(GENERATED_HEADER.len() + body.len() + 1);
        contents.push_str(GENERATED_HEADER);
        contents.push('\n');
        contents.push_str(body);
        Self {
            family,
            path: path.into(),
            contents,
        }
    }

    /// Writes the artifact below `root`, creating directories as needed.
    ///
    /// Files whose contents are already up to date are left untouched.
    ///
    /// # Returns
    /// The path written to.
    ///
    /// # Errors
    /// Returns `CodegenError::Io` if a directory or the file cannot be written.
    pub fn write_to(&self, root: &Path) -> Result<PathBuf, CodegenError> {
        let target = root.join(&self.path);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let unchanged = std::fs::read_to_string(&target)
            .map(|existing| existing == self.contents)
            .unwrap_or(false);
        if !unchanged {
            std::fs::write(&target, &self.contents)?;
        }
        Ok(target)
    }
}
