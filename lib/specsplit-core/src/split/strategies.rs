//! Built-in splitting strategies for OpenAPI specifications.

use std::mem;
use std::path::Path;

use serde_json::{Map, Value, json};
use tracing::info;

use super::{Fragment, OpenApiSplitter, SplitResult};
use crate::naming::{PathLocation, SCHEMAS_DIR, schema_file_name};
use crate::refs::{REF_KEY, SchemaNameMap, rewrite_schema_refs};
use crate::{SplitConfig, SplitError};

/// Keys of a path item holding an operation.
const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Splits every schema and every path item into its own file.
///
/// The layout below the output directory is:
///
/// - `openapi.yaml`: the root document, where `components.schemas` and `paths`
///   only hold `$ref` stubs
/// - `components/schemas/<snake_case_name>.yaml`: one file per schema
/// - `paths/<folder>/<file>.yaml`: one file per path item, named after the
///   path segments following the stripped prefix
///
/// Local schema references (`#/components/schemas/Name`) are rewritten relative to
/// the file containing them, and operation tags are translated.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use specsplit_core::split::{OpenApiSplitter, SplitByComponent};
///
/// # fn main() -> Result<(), specsplit_core::SplitError> {
/// let spec = json!({
///     "paths": {
///         "/api/v2/invoices/{id}": {
///             "get": {
///                 "tags": ["Operacje"],
///                 "responses": { "200": { "$ref": "#/components/schemas/Invoice" } }
///             }
///         }
///     },
///     "components": { "schemas": { "Invoice": { "type": "object" } } }
/// });
///
/// let result = SplitByComponent::default().split(spec)?;
///
/// assert_eq!(
///     result.main["paths"]["/api/v2/invoices/{id}"],
///     json!({ "$ref": "./paths/invoices/by_id.yaml" })
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct SplitByComponent {
    config: SplitConfig,
}

impl SplitByComponent {
    /// Creates a splitter with the given configuration.
    pub fn new(config: SplitConfig) -> Self {
        Self { config }
    }

    /// The configuration of this splitter.
    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    /// Extracts every schema, returning the stubs replacing them in the root document.
    fn split_schemas(
        &self,
        schemas: Map<String, Value>,
        names: &SchemaNameMap,
        result: &mut SplitResult,
    ) -> Result<Map<String, Value>, SplitError> {
        let mut stubs = Map::with_capacity(schemas.len());

        for (name, schema) in schemas {
            let file_name = names
                .file_name(&name)
                .map_or_else(|| schema_file_name(&name), str::to_string);
            let file = Path::new(SCHEMAS_DIR).join(&file_name);

            let content = rewrite_schema_refs(&schema, &file, names, self.config.references)?;
            result.add_fragment(Fragment::new(file, name.clone(), content), self.config.collisions)?;

            stubs.insert(name, ref_stub(format!("./{SCHEMAS_DIR}/{file_name}")));
        }

        info!(count = stubs.len(), "schemas extracted");
        Ok(stubs)
    }

    /// Extracts every path item, returning the stubs replacing them in the root document.
    fn split_paths(
        &self,
        paths: Map<String, Value>,
        names: &SchemaNameMap,
        result: &mut SplitResult,
    ) -> Result<Map<String, Value>, SplitError> {
        let mut stubs = Map::with_capacity(paths.len());

        for (template, item) in paths {
            let Value::Object(mut item) = item else {
                return Err(SplitError::InvalidDocument {
                    message: format!("path item '{template}' is not a mapping"),
                });
            };

            self.translate_tags(&mut item);

            let location = PathLocation::from_template(&template, self.config.strip_prefix);
            let file = location.file_path();
            let content = rewrite_schema_refs(
                &Value::Object(item),
                &file,
                names,
                self.config.references,
            )?;
            result.add_fragment(
                Fragment::new(file, template.clone(), content),
                self.config.collisions,
            )?;

            stubs.insert(template, ref_stub(location.root_ref()));
        }

        info!(count = stubs.len(), "path items extracted");
        Ok(stubs)
    }

    /// Translates the `tags` of every operation of a path item.
    fn translate_tags(&self, item: &mut Map<String, Value>) {
        let operations = item
            .iter_mut()
            .filter(|(method, _)| HTTP_METHODS.contains(&method.as_str()))
            .map(|(_, operation)| operation);

        for operation in operations {
            let Some(Value::Array(tags)) = operation.get_mut("tags") else {
                continue;
            };
            for tag in tags {
                if let Value::String(label) = tag {
                    let translated = self.config.tags.translate(label).to_string();
                    *label = translated;
                }
            }
        }
    }
}

impl OpenApiSplitter for SplitByComponent {
    fn split(&self, mut spec: Value) -> Result<SplitResult, SplitError> {
        let Value::Object(root) = &mut spec else {
            return Err(SplitError::InvalidDocument {
                message: "the document root is not a mapping".to_string(),
            });
        };

        let components = root
            .entry("components")
            .or_insert_with(|| Value::Object(Map::new()));
        if components.is_null() {
            *components = Value::Object(Map::new());
        }
        let Value::Object(components) = components else {
            return Err(SplitError::InvalidDocument {
                message: "'components' is not a mapping".to_string(),
            });
        };
        let schemas = take_section(components, "schemas", "components.schemas")?;
        let paths = take_section(root, "paths", "paths")?;

        // Every file name is known before the first rewrite
        let names = SchemaNameMap::new(schemas.keys().map(String::as_str));

        let mut result = SplitResult::new(Value::Null);
        let schema_stubs = self.split_schemas(schemas, &names, &mut result)?;
        let path_stubs = self.split_paths(paths, &names, &mut result)?;

        if let Some(Value::Object(components)) = root.get_mut("components") {
            components.insert("schemas".to_string(), Value::Object(schema_stubs));
        }
        root.insert("paths".to_string(), Value::Object(path_stubs));

        result.main = spec;
        Ok(result)
    }
}

/// Takes the mapping stored under `key`, leaving the key in place so the
/// document keeps its order. A missing or `null` section is empty.
fn take_section(
    parent: &mut Map<String, Value>,
    key: &str,
    display_name: &str,
) -> Result<Map<String, Value>, SplitError> {
    match parent.get_mut(key).map(mem::take) {
        None | Some(Value::Null) => Ok(Map::new()),
        Some(Value::Object(section)) => Ok(section),
        Some(_) => Err(SplitError::InvalidDocument {
            message: format!("'{display_name}' is not a mapping"),
        }),
    }
}

fn ref_stub(reference: String) -> Value {
    json!({ REF_KEY: reference })
}
