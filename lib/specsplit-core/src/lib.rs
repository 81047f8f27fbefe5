//! # Specsplit Core
//!
//! Split a single large OpenAPI document into a directory tree of smaller files.
//!
//! The output layout is:
//!
//! ```text
//! <output>/openapi.yaml                       root document, only `$ref` stubs
//! <output>/components/schemas/<name>.yaml     one file per schema
//! <output>/paths/<folder>/<file>.yaml         one file per path item
//! ```
//!
//! Schema file names are the `snake_case` form of the schema names. Path files are
//! named after the URL segments following a routing prefix (`/api/v2` by default):
//! `/api/v2/invoices/{id}` lands in `paths/invoices/by_id.yaml`.
//!
//! Local schema references (`#/components/schemas/Invoice`) are rewritten into paths
//! relative to the file containing them, and operation tags are translated with a
//! [`TagTranslator`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use specsplit_core::{SplitConfig, split_file};
//!
//! # fn main() -> Result<(), specsplit_core::SplitError> {
//! let root = split_file("api/ksef-openapi.yaml", "openapi", SplitConfig::default())?;
//! println!("Split OpenAPI written to: {}", root.display());
//! # Ok(())
//! # }
//! ```
//!
//! ## Working on the document
//!
//! Loading, splitting and writing are separate steps, so the split can be inspected
//! before anything is written:
//!
//! ```rust
//! use serde_json::json;
//! use specsplit_core::split::{OpenApiSplitExt, SplitByComponent};
//!
//! # fn main() -> Result<(), specsplit_core::SplitError> {
//! let spec = json!({
//!     "components": { "schemas": { "InvoiceStatus": { "type": "string" } } }
//! });
//!
//! let result = spec.split_with(SplitByComponent::default())?;
//!
//! assert!(result.fragment("components/schemas/invoice_status.yaml").is_some());
//! # Ok(())
//! # }
//! ```
//!
//! ## Strictness
//!
//! By default a reference to a missing schema and two entries sharing an output file
//! both fail the run. See [`ReferencePolicy`] and [`CollisionPolicy`] to relax them.

use std::path::{Path, PathBuf};

use tracing::info;

mod config;
mod error;
mod naming;
mod refs;
mod tags;
mod yaml;

pub mod split;

pub use self::config::{CollisionPolicy, DEFAULT_STRIP_PREFIX, ReferencePolicy, SplitConfig};
pub use self::error::SplitError;
pub use self::naming::{PATHS_DIR, PathLocation, SCHEMAS_DIR, schema_file_name, to_snake_case};
pub use self::refs::{SchemaNameMap, local_schema_name, relative_path, rewrite_schema_refs};
pub use self::tags::TagTranslator;
pub use self::yaml::{ParseError, ToYaml, YamlError, from_yaml, load_document};

use self::split::{OpenApiSplitExt, SplitByComponent};

/// Loads `input`, splits it with [`SplitByComponent`] and writes the result below `output_dir`.
///
/// Returns the path of the written root document.
///
/// # Errors
///
/// Returns a [`SplitError`] if the input cannot be loaded, the split fails, or
/// the output cannot be written. Files written before a failure are kept.
pub fn split_file(
    input: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    config: SplitConfig,
) -> Result<PathBuf, SplitError> {
    let input = input.as_ref();
    info!(input = %input.display(), "loading specification");
    let spec = load_document(input)?;

    let result = spec.split_with(SplitByComponent::new(config))?;
    let root = result.write_to(output_dir)?;

    info!(
        fragments = result.fragment_count(),
        root = %root.display(),
        "specification split"
    );
    Ok(root)
}
