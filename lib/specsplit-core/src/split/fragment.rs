//! Fragment types for split OpenAPI specifications.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::yaml::ToYaml;
use crate::{CollisionPolicy, SplitError};

/// File name of the root document inside the output directory.
pub const ROOT_FILE: &str = "openapi.yaml";

/// A fragment extracted from an OpenAPI specification.
///
/// Represents a piece of the original specification that should be written to a separate file.
///
/// # Example
///
/// ```rust
/// use specsplit_core::split::Fragment;
/// use serde_json::json;
///
/// let fragment = Fragment::new(
///     "components/schemas/invoice.yaml",
///     "Invoice",
///     json!({ "type": "object" }),
/// );
/// assert_eq!(fragment.source, "Invoice");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    /// Relative path where this fragment should be written.
    ///
    /// This path is relative to the output directory, where the root document lives.
    pub path: PathBuf,

    /// Name of the extracted entry: a schema name or a path template.
    pub source: String,

    /// The content to serialize into the fragment file.
    pub content: Value,
}

impl Fragment {
    /// Creates a new fragment with the given path, source entry and content.
    pub fn new(path: impl Into<PathBuf>, source: impl Into<String>, content: Value) -> Self {
        Self {
            path: path.into(),
            source: source.into(),
            content,
        }
    }
}

/// The result of splitting an OpenAPI specification.
///
/// Contains the main specification (with `$ref` references to external files)
/// and a collection of fragments to be written to separate files.
///
/// # Example
///
/// ```rust,no_run
/// use specsplit_core::split::{OpenApiSplitExt, SplitByComponent};
/// use specsplit_core::load_document;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let spec = load_document("api/ksef-openapi.yaml")?;
/// let result = spec.split_with(SplitByComponent::default())?;
///
/// let root = result.write_to("openapi")?;
/// println!("{}", root.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SplitResult {
    /// The main OpenAPI specification with `$ref` references to extracted fragments.
    pub main: Value,

    /// Extracted fragments to be written to separate files.
    pub fragments: Vec<Fragment>,
}

impl SplitResult {
    /// Creates a new split result with no fragments.
    pub fn new(main: Value) -> Self {
        Self {
            main,
            fragments: Vec::new(),
        }
    }

    /// Adds a fragment to the result.
    ///
    /// When another fragment already targets the same path, `collisions` decides
    /// whether the run fails or the new fragment replaces the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::NamingCollision`] with [`CollisionPolicy::Fail`].
    pub fn add_fragment(
        &mut self,
        fragment: Fragment,
        collisions: CollisionPolicy,
    ) -> Result<(), SplitError> {
        let existing = self
            .fragments
            .iter_mut()
            .find(|existing| existing.path == fragment.path);

        match (existing, collisions) {
            (None, _) => {
                debug!(path = %fragment.path.display(), source = %fragment.source, "fragment extracted");
                self.fragments.push(fragment);
            }
            (Some(existing), CollisionPolicy::Fail) => {
                return Err(SplitError::NamingCollision {
                    file: fragment.path,
                    first: existing.source.clone(),
                    second: fragment.source,
                });
            }
            (Some(existing), CollisionPolicy::Overwrite) => {
                warn!(
                    path = %fragment.path.display(),
                    previous = %existing.source,
                    source = %fragment.source,
                    "fragment overwritten"
                );
                *existing = fragment;
            }
        }
        Ok(())
    }

    /// Returns `true` if there are no fragments (no splitting occurred).
    pub fn is_unsplit(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Returns the number of fragments.
    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    /// Returns the fragment written at `path`, if any.
    pub fn fragment(&self, path: impl AsRef<Path>) -> Option<&Fragment> {
        let path = path.as_ref();
        self.fragments.iter().find(|fragment| fragment.path == path)
    }

    /// Writes every fragment, then the root document, below `output_dir`.
    ///
    /// Missing directories are created; existing files are replaced. Nothing is
    /// rolled back if a write fails midway.
    ///
    /// Returns the path of the written root document.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::Write`] on I/O failure and [`SplitError::Serialize`]
    /// if a tree cannot be serialized.
    pub fn write_to(&self, output_dir: impl AsRef<Path>) -> Result<PathBuf, SplitError> {
        let output_dir = output_dir.as_ref();

        for fragment in &self.fragments {
            write_yaml(&output_dir.join(&fragment.path), &fragment.content)?;
        }

        let root = output_dir.join(ROOT_FILE);
        write_yaml(&root, &self.main)?;
        debug!(
            fragments = self.fragments.len(),
            root = %root.display(),
            "split specification written"
        );

        Ok(root)
    }
}

fn write_yaml(path: &Path, content: &Value) -> Result<(), SplitError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|error| SplitError::Write {
            path: parent.to_path_buf(),
            error,
        })?;
    }

    let yaml = content.to_yaml()?;
    fs::write(path, yaml).map_err(|error| SplitError::Write {
        path: path.to_path_buf(),
        error,
    })
}
