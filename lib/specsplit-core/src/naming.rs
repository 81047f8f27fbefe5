//! File naming for extracted schemas and path items.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

/// Directory (relative to the output root) holding one file per schema.
pub const SCHEMAS_DIR: &str = "components/schemas";

/// Directory (relative to the output root) holding one folder per path group.
pub const PATHS_DIR: &str = "paths";

/// Name used for the folder and/or file when a path has no segment left.
const DEFAULT_NAME: &str = "root";

/// Extension of every written file.
const EXTENSION: &str = "yaml";

/// A capitalized word preceded by anything: `HTTPHeader` -> `HTTP_Header`.
static CAPITALIZED_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.)([A-Z][a-z]+)").expect("a valid regex"));

/// A lowercase letter or digit followed by an uppercase one: `fooBar` -> `foo_Bar`.
static LOWER_TO_UPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("a valid regex"));

/// Regular expression for matching path parameters in the format `{param_name}`.
static PATH_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(?<name>\w+)}").expect("a valid regex"));

/// Converts a `PascalCase` or `camelCase` identifier to `snake_case`.
///
/// ```rust
/// use specsplit_core::to_snake_case;
///
/// assert_eq!(to_snake_case("FooBarBaz"), "foo_bar_baz");
/// assert_eq!(to_snake_case("HTTPHeader"), "http_header");
/// ```
pub fn to_snake_case(name: &str) -> String {
    let words = CAPITALIZED_WORD.replace_all(name, "${1}_${2}");
    let words = LOWER_TO_UPPER.replace_all(&words, "${1}_${2}");
    words.to_lowercase()
}

/// File name of the extracted schema `name`.
pub fn schema_file_name(name: &str) -> String {
    format!("{}.{EXTENSION}", to_snake_case(name))
}

/// Output location of a path item, derived from its URL template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathLocation {
    /// Sub-directory of [`PATHS_DIR`], the first segment after the stripped prefix.
    pub folder: String,
    /// File name inside the folder.
    pub file_name: String,
}

impl PathLocation {
    /// Derives the location of `path` after dropping `strip_prefix` leading segments.
    ///
    /// When the template has no more segments than the prefix, both folder and
    /// file are named `root`. Path parameters like `{id}` become `by_id` in the
    /// file name.
    ///
    /// ```rust
    /// use specsplit_core::PathLocation;
    ///
    /// let location = PathLocation::from_template("/api/v2/invoices/{id}", 2);
    /// assert_eq!(location.folder, "invoices");
    /// assert_eq!(location.file_name, "by_id.yaml");
    /// ```
    pub fn from_template(path: &str, strip_prefix: usize) -> Self {
        let segments = path.trim_matches('/').split('/').collect::<Vec<_>>();
        let core: &[&str] = match segments.get(strip_prefix..) {
            Some(rest) if !rest.is_empty() => rest,
            _ => &[DEFAULT_NAME],
        };

        let (folder, rest) = match core.split_first() {
            Some((folder, rest)) => (*folder, rest),
            None => (DEFAULT_NAME, &[][..]),
        };

        let base = if rest.is_empty() {
            DEFAULT_NAME.to_string()
        } else {
            rest.iter()
                .map(|segment| PATH_PARAM.replace_all(segment, "by_${name}"))
                .collect::<Vec<_>>()
                .join("_")
        };

        Self {
            folder: folder.to_string(),
            file_name: format!("{base}.{EXTENSION}"),
        }
    }

    /// The file path relative to the output root, e.g. `paths/invoices/by_id.yaml`.
    pub fn file_path(&self) -> PathBuf {
        Path::new(PATHS_DIR).join(&self.folder).join(&self.file_name)
    }

    /// The reference used in the root document, e.g. `./paths/invoices/by_id.yaml`.
    pub fn root_ref(&self) -> String {
        format!("./{PATHS_DIR}/{}/{}", self.folder, self.file_name)
    }
}
