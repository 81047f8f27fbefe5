//! YAML support using serde-saphyr.
//!
//! Loading goes through [`load_document`], which reads the input file into a generic
//! [`Value`] tree. Mapping order is preserved (`serde_json` is built with
//! `preserve_order`), so the split files keep the key order of the input.
//!
//! Writing goes through the [`ToYaml`] extension trait. Non-ASCII text is emitted as-is.
//!
//! # Example
//!
//! ```rust,no_run
//! use specsplit_core::{ToYaml, load_document};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let spec = load_document("api/openapi.yaml")?;
//! let yaml = spec.to_yaml()?;
//! std::fs::write("copy.yaml", yaml)?;
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::SplitError;

/// Error type for YAML serialization operations.
pub type YamlError = serde_saphyr::ser_error::Error;

/// Error type for YAML parsing operations.
pub type ParseError = serde_saphyr::Error;

/// Extension trait for serializing types to YAML.
///
/// This trait is implemented for all types that implement [`Serialize`].
pub trait ToYaml: Serialize + Sized {
    /// Serializes this value to a YAML string.
    ///
    /// # Errors
    ///
    /// Returns a [`YamlError`] if serialization fails.
    fn to_yaml(&self) -> Result<String, YamlError> {
        serde_saphyr::to_string(self)
    }
}

impl<T: Serialize + Sized> ToYaml for T {}

/// Parses a YAML (or JSON) string into a generic document tree.
///
/// # Errors
///
/// Returns a [`ParseError`] if the input is not well-formed.
pub fn from_yaml(content: &str) -> Result<Value, ParseError> {
    serde_saphyr::from_str(content)
}

/// Reads and parses the document at `path`.
///
/// # Errors
///
/// Returns [`SplitError::Load`] if the file cannot be read and
/// [`SplitError::Parse`] if it is not well-formed.
pub fn load_document(path: impl AsRef<Path>) -> Result<Value, SplitError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|error| SplitError::Load {
        path: path.to_path_buf(),
        error,
    })?;

    from_yaml(&content).map_err(|error| SplitError::Parse {
        path: path.to_path_buf(),
        error,
    })
}
