use std::io;
use std::path::PathBuf;

use crate::yaml::{ParseError, YamlError};

/// Errors that can occur while loading, splitting or writing an OpenAPI document.
///
/// Every variant is fatal for the current run: the splitter never retries and
/// never rolls back files already written.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum SplitError {
    /// The input document could not be read.
    #[display("Failed to read '{}': {error}", path.display())]
    #[from(skip)]
    Load {
        /// The input path.
        path: PathBuf,
        /// The underlying I/O error.
        error: io::Error,
    },

    /// The input document is not well-formed YAML (or JSON).
    #[display("Failed to parse '{}': {error}", path.display())]
    #[from(skip)]
    Parse {
        /// The input path.
        path: PathBuf,
        /// The underlying parser error.
        error: ParseError,
    },

    /// An output directory or file could not be created.
    #[display("Failed to write '{}': {error}", path.display())]
    #[from(skip)]
    Write {
        /// The output path.
        path: PathBuf,
        /// The underlying I/O error.
        error: io::Error,
    },

    /// A sub-tree could not be serialized to YAML.
    Serialize(YamlError),

    /// A local schema reference points at a schema that does not exist.
    ///
    /// Only raised with [`ReferencePolicy::Strict`](crate::ReferencePolicy::Strict).
    #[display("Unresolved reference '{reference}' in '{}'", file.display())]
    #[from(skip)]
    UnresolvedReference {
        /// The reference as found in the document.
        reference: String,
        /// The output file that would contain the dangling reference.
        file: PathBuf,
    },

    /// Two distinct entries map to the same output file.
    ///
    /// Only raised with [`CollisionPolicy::Fail`](crate::CollisionPolicy::Fail).
    #[display("'{first}' and '{second}' both map to '{}'", file.display())]
    #[from(skip)]
    NamingCollision {
        /// The shared output file.
        file: PathBuf,
        /// The entry that claimed the file first.
        first: String,
        /// The entry that collides with it.
        second: String,
    },

    /// A section of the document does not have the expected shape.
    #[display("Invalid document: {message}")]
    #[from(skip)]
    InvalidDocument {
        /// What was expected.
        message: String,
    },

    /// A tag translation table could not be loaded.
    #[display("Invalid tag table '{}': {message}", path.display())]
    #[from(skip)]
    TagTable {
        /// The table path.
        path: PathBuf,
        /// Why the table was rejected.
        message: String,
    },
}
