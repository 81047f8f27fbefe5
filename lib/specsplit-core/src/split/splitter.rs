//! The OpenApiSplitter trait for splitting OpenAPI specifications.

use serde_json::Value;

use super::SplitResult;
use crate::SplitError;

/// Trait for splitting an OpenAPI specification into multiple files.
///
/// Implementations of this trait define different strategies for organizing
/// schemas and path items into separate files.
///
/// # Implementing Custom Splitters
///
/// ```rust
/// use serde_json::Value;
/// use specsplit_core::SplitError;
/// use specsplit_core::split::{OpenApiSplitter, SplitResult};
///
/// struct KeepAsIs;
///
/// impl OpenApiSplitter for KeepAsIs {
///     fn split(&self, spec: Value) -> Result<SplitResult, SplitError> {
///         Ok(SplitResult::new(spec))
///     }
/// }
/// ```
///
/// # Built-in Implementations
///
/// * [`SplitByComponent`](super::SplitByComponent) - One file per schema and per path item
pub trait OpenApiSplitter {
    /// Splits the OpenAPI specification into a main spec and fragments.
    ///
    /// This method consumes the input specification and returns:
    /// - A modified main spec with `$ref` pointing to external files
    /// - A collection of fragments to be written to separate files
    ///
    /// # Errors
    ///
    /// Returns a [`SplitError`] if the specification cannot be split.
    fn split(&self, spec: Value) -> Result<SplitResult, SplitError>;
}

/// Extension trait for convenient splitting of OpenAPI specifications.
pub trait OpenApiSplitExt {
    /// Splits this specification using the provided splitter.
    ///
    /// This is a convenience method that calls `splitter.split(self)`.
    ///
    /// # Errors
    ///
    /// Returns the splitter's error.
    fn split_with<S: OpenApiSplitter>(self, splitter: S) -> Result<SplitResult, SplitError>;
}

impl OpenApiSplitExt for Value {
    fn split_with<S: OpenApiSplitter>(self, splitter: S) -> Result<SplitResult, SplitError> {
        splitter.split(self)
    }
}
