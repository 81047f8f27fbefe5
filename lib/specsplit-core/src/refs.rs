//! Rewriting of local schema references into relative file references.

use std::path::{Component, Path, PathBuf};

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::warn;

use crate::naming::{SCHEMAS_DIR, schema_file_name};
use crate::{ReferencePolicy, SplitError};

/// Key holding a reference in an OpenAPI document.
pub const REF_KEY: &str = "$ref";

const SCHEMA_PREFIX: &str = "#/components/schemas/";

/// Extracts the schema name from a local `$ref` string.
///
/// Only direct references to a schema match; pointers into a schema
/// (`#/components/schemas/User/properties/id`) and external references do not.
///
/// ```rust
/// use specsplit_core::local_schema_name;
///
/// assert_eq!(local_schema_name("#/components/schemas/User"), Some("User"));
/// assert_eq!(local_schema_name("#/components/responses/Error"), None);
/// ```
pub fn local_schema_name(reference: &str) -> Option<&str> {
    reference
        .strip_prefix(SCHEMA_PREFIX)
        .filter(|name| !name.is_empty() && !name.contains('/'))
}

/// Schema name to extracted file name, e.g. `InvoiceStatus` -> `invoice_status.yaml`.
///
/// The map must be complete before any rewriting happens, since schemas may
/// reference each other in any order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaNameMap(IndexMap<String, String>);

impl SchemaNameMap {
    /// Builds the map for every schema name.
    pub fn new<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let files = names
            .into_iter()
            .map(|name| (name.to_string(), schema_file_name(name)))
            .collect();
        Self(files)
    }

    /// The file name of `name`, if the schema exists.
    pub fn file_name(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// The file path of `name` relative to the output root.
    pub fn file_path(&self, name: &str) -> Option<PathBuf> {
        self.file_name(name)
            .map(|file_name| Path::new(SCHEMAS_DIR).join(file_name))
    }

    /// The reference used in the root document, e.g. `./components/schemas/user.yaml`.
    pub fn root_ref(&self, name: &str) -> Option<String> {
        self.file_name(name)
            .map(|file_name| format!("./{SCHEMAS_DIR}/{file_name}"))
    }

    /// Iterates over `(schema name, file name)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, file)| (name.as_str(), file.as_str()))
    }

    /// Number of schemas.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there is no schema.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Computes the `/`-separated path leading from the directory `from_dir` to `to`.
///
/// Both paths are relative to the same root; the filesystem is never queried.
///
/// ```rust
/// use std::path::Path;
/// use specsplit_core::relative_path;
///
/// let reference = relative_path(
///     Path::new("paths/invoices"),
///     Path::new("components/schemas/invoice.yaml"),
/// );
/// assert_eq!(reference, "../../components/schemas/invoice.yaml");
/// ```
pub fn relative_path(from_dir: &Path, to: &Path) -> String {
    let from = normal_components(from_dir);
    let to = normal_components(to);

    let common = from
        .iter()
        .zip(&to)
        .take_while(|(left, right)| left == right)
        .count();

    let ups = from.len().saturating_sub(common);
    let parts = std::iter::repeat_n("..", ups)
        .chain(to.iter().skip(common).map(String::as_str))
        .collect::<Vec<_>>();

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

/// Lexically normalized components: `.` is dropped and `..` removes its parent.
fn normal_components(path: &Path) -> Vec<String> {
    let mut parts = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::ParentDir => {
                parts.pop();
            }
            _ => {}
        }
    }
    parts
}

/// Returns a copy of `value` where every local schema reference points at the
/// extracted schema file, relative to `current_file`.
///
/// `current_file` is the output file (relative to the output root) that will
/// contain the rewritten tree. Mapping order is preserved and values other than
/// `$ref` strings are copied unchanged.
///
/// # Errors
///
/// With [`ReferencePolicy::Strict`], returns [`SplitError::UnresolvedReference`]
/// for a reference to a schema missing from `names`.
pub fn rewrite_schema_refs(
    value: &Value,
    current_file: &Path,
    names: &SchemaNameMap,
    policy: ReferencePolicy,
) -> Result<Value, SplitError> {
    let rewriter = RefRewriter {
        names,
        current_file,
        current_dir: current_file.parent().unwrap_or_else(|| Path::new("")),
        policy,
    };
    rewriter.rewrite(value)
}

struct RefRewriter<'a> {
    names: &'a SchemaNameMap,
    current_file: &'a Path,
    current_dir: &'a Path,
    policy: ReferencePolicy,
}

impl RefRewriter<'_> {
    fn rewrite(&self, value: &Value) -> Result<Value, SplitError> {
        let result = match value {
            Value::Object(map) => {
                let mut rewritten = Map::with_capacity(map.len());
                for (key, item) in map {
                    let item = match (key.as_str(), item) {
                        (REF_KEY, Value::String(reference)) => self.rewrite_ref(reference)?,
                        _ => self.rewrite(item)?,
                    };
                    rewritten.insert(key.clone(), item);
                }
                Value::Object(rewritten)
            }
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|item| self.rewrite(item))
                    .collect::<Result<_, _>>()?,
            ),
            scalar => scalar.clone(),
        };
        Ok(result)
    }

    fn rewrite_ref(&self, reference: &str) -> Result<Value, SplitError> {
        let Some(name) = local_schema_name(reference) else {
            return Ok(Value::String(reference.to_string()));
        };

        match self.names.file_path(name) {
            Some(target) => Ok(Value::String(relative_path(self.current_dir, &target))),
            None => match self.policy {
                ReferencePolicy::Strict => Err(SplitError::UnresolvedReference {
                    reference: reference.to_string(),
                    file: self.current_file.to_path_buf(),
                }),
                ReferencePolicy::Lenient => {
                    warn!(
                        reference,
                        file = %self.current_file.display(),
                        "schema not found, keeping local reference"
                    );
                    Ok(Value::String(reference.to_string()))
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn names() -> SchemaNameMap {
        SchemaNameMap::new(["Invoice", "InvoiceStatus", "HTTPHeader"])
    }

    #[test]
    fn should_extract_schema_name() {
        assert_eq!(local_schema_name("#/components/schemas/User"), Some("User"));
        assert_eq!(
            local_schema_name("#/components/schemas/MyError"),
            Some("MyError")
        );
        assert_eq!(local_schema_name("#/components/responses/Error"), None);
        assert_eq!(local_schema_name("#/components/schemas/"), None);
        assert_eq!(
            local_schema_name("#/components/schemas/User/properties/id"),
            None
        );
        assert_eq!(local_schema_name("common.yaml#/components/schemas/User"), None);
        assert_eq!(local_schema_name("User"), None);
    }

    #[test]
    fn should_build_name_map_in_order() {
        let names = names();

        let entries = names.iter().collect::<Vec<_>>();
        assert_eq!(
            entries,
            [
                ("Invoice", "invoice.yaml"),
                ("InvoiceStatus", "invoice_status.yaml"),
                ("HTTPHeader", "http_header.yaml"),
            ]
        );
        assert_eq!(
            names.root_ref("InvoiceStatus").as_deref(),
            Some("./components/schemas/invoice_status.yaml")
        );
        assert_eq!(names.file_name("Missing"), None);
        assert_eq!(names.len(), 3);
        assert!(!names.is_empty());
        assert!(SchemaNameMap::default().is_empty());
    }

    #[rstest]
    #[case::sibling("components/schemas", "components/schemas/invoice.yaml", "invoice.yaml")]
    #[case::path_file("paths/invoices", "components/schemas/invoice.yaml", "../../components/schemas/invoice.yaml")]
    #[case::root("", "components/schemas/invoice.yaml", "components/schemas/invoice.yaml")]
    #[case::current_dir("./paths/a", "./paths/b/c.yaml", "../b/c.yaml")]
    #[case::same("paths", "paths", ".")]
    #[case::parent_segment("paths/..", "components/schemas/a.yaml", "components/schemas/a.yaml")]
    #[case::parent_in_target("paths/invoices", "paths/../components/schemas/a.yaml", "../../components/schemas/a.yaml")]
    fn should_compute_relative_path(#[case] from: &str, #[case] to: &str, #[case] expected: &str) {
        assert_eq!(relative_path(Path::new(from), Path::new(to)), expected);
    }

    #[test]
    fn should_rewrite_nested_refs() -> anyhow::Result<()> {
        let operation = json!({
            "get": {
                "tags": ["Operations"],
                "responses": {
                    "200": {
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/Invoice" }
                            }
                        }
                    }
                },
                "parameters": [
                    { "schema": { "$ref": "#/components/schemas/InvoiceStatus" } }
                ]
            }
        });

        let rewritten = rewrite_schema_refs(
            &operation,
            Path::new("paths/invoices/by_id.yaml"),
            &names(),
            ReferencePolicy::Strict,
        )?;

        assert_eq!(
            rewritten.pointer("/get/responses/200/content/application~1json/schema/$ref"),
            Some(&json!("../../components/schemas/invoice.yaml"))
        );
        assert_eq!(
            rewritten.pointer("/get/parameters/0/schema/$ref"),
            Some(&json!("../../components/schemas/invoice_status.yaml"))
        );
        assert_eq!(rewritten.pointer("/get/tags"), Some(&json!(["Operations"])));
        Ok(())
    }

    #[test]
    fn should_rewrite_refs_between_schemas() -> anyhow::Result<()> {
        let schema = json!({
            "type": "object",
            "properties": {
                "status": { "$ref": "#/components/schemas/InvoiceStatus" },
                "headers": {
                    "type": "array",
                    "items": { "$ref": "#/components/schemas/HTTPHeader" }
                }
            }
        });

        let rewritten = rewrite_schema_refs(
            &schema,
            Path::new("components/schemas/invoice.yaml"),
            &names(),
            ReferencePolicy::Strict,
        )?;

        assert_eq!(
            rewritten,
            json!({
                "type": "object",
                "properties": {
                    "status": { "$ref": "invoice_status.yaml" },
                    "headers": {
                        "type": "array",
                        "items": { "$ref": "http_header.yaml" }
                    }
                }
            })
        );
        Ok(())
    }

    #[test]
    fn should_leave_tree_without_refs_unchanged() -> anyhow::Result<()> {
        let schema = json!({
            "type": "object",
            "required": ["id"],
            "properties": {
                "id": { "type": "integer", "format": "int64", "nullable": false },
                "note": { "type": "string", "default": null }
            }
        });

        let rewritten = rewrite_schema_refs(
            &schema,
            Path::new("components/schemas/invoice.yaml"),
            &names(),
            ReferencePolicy::Strict,
        )?;

        assert_eq!(rewritten, schema);
        Ok(())
    }

    #[test]
    fn should_preserve_key_order() -> anyhow::Result<()> {
        let schema = json!({
            "zeta": { "$ref": "#/components/schemas/Invoice" },
            "alpha": 1,
            "$ref": "#/components/schemas/Invoice",
            "mid": [true]
        });

        let rewritten = rewrite_schema_refs(
            &schema,
            Path::new("paths/invoices/root.yaml"),
            &names(),
            ReferencePolicy::Strict,
        )?;

        let keys = rewritten
            .as_object()
            .map(|map| map.keys().cloned().collect::<Vec<_>>())
            .unwrap_or_default();
        assert_eq!(keys, ["zeta", "alpha", "$ref", "mid"]);
        Ok(())
    }

    #[test]
    fn should_keep_non_schema_refs() -> anyhow::Result<()> {
        let operation = json!({
            "responses": {
                "400": { "$ref": "#/components/responses/BadRequest" },
                "500": { "$ref": "errors.yaml#/components/schemas/Error" }
            },
            "description": "#/components/schemas/Invoice"
        });

        let rewritten = rewrite_schema_refs(
            &operation,
            Path::new("paths/invoices/root.yaml"),
            &names(),
            ReferencePolicy::Strict,
        )?;

        assert_eq!(rewritten, operation);
        Ok(())
    }

    #[test]
    fn should_fail_on_unresolved_ref_when_strict() {
        let schema = json!({ "$ref": "#/components/schemas/Missing" });

        let result = rewrite_schema_refs(
            &schema,
            Path::new("components/schemas/invoice.yaml"),
            &names(),
            ReferencePolicy::Strict,
        );

        match result {
            Err(SplitError::UnresolvedReference { reference, file }) => {
                assert_eq!(reference, "#/components/schemas/Missing");
                assert_eq!(file, PathBuf::from("components/schemas/invoice.yaml"));
            }
            other => panic!("expected an unresolved reference error, got {other:?}"),
        }
    }

    #[test]
    fn should_keep_unresolved_ref_when_lenient() -> anyhow::Result<()> {
        let schema = json!({ "items": { "$ref": "#/components/schemas/Missing" } });

        let rewritten = rewrite_schema_refs(
            &schema,
            Path::new("components/schemas/invoice.yaml"),
            &names(),
            ReferencePolicy::Lenient,
        )?;

        assert_eq!(rewritten, schema);
        Ok(())
    }
}
