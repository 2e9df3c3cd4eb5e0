use minijinja::{AutoEscape, Environment, UndefinedBehavior, context};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::error::{ExportError, TemplateError};
use crate::dictionary::{Dictionary, EntitySchema};

pub const SCHEMA_TEMPLATE_NAME: &str = "templates/schema.json.j2";
const SCHEMA_TEMPLATE: &str = include_str!("../../templates/schema.json.j2");

/// JSON Schema keywords carried over from dictionary property definitions
const PROPERTY_KEYWORDS: &[&str] = &[
    "type",
    "enum",
    "pattern",
    "format",
    "minimum",
    "maximum",
    "items",
    "oneOf",
    "anyOf",
    "description",
];

#[derive(Debug, Serialize)]
struct EntityContext<'a> {
    id: &'a str,
    description: &'a str,
    properties: Map<String, Value>,
}

/// Renders the graph data JSON Schema of a dictionary
pub struct SchemaGenerator {
    env: Environment<'static>,
    name: String,
    source: String,
}

impl Default for SchemaGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaGenerator {
    pub fn new() -> Self {
        Self::with_template(SCHEMA_TEMPLATE_NAME, SCHEMA_TEMPLATE)
    }

    /// Use a custom template instead of the embedded one
    pub fn with_template(name: impl Into<String>, source: impl Into<String>) -> Self {
        let mut env = Environment::new();

        env.set_undefined_behavior(UndefinedBehavior::Strict);
        // Output is JSON assembled with `tojson`, never escaped again
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);

        Self {
            env,
            name: name.into(),
            source: source.into(),
        }
    }

    /// Render the template for `dictionary` into raw text
    pub fn render_str(&self, dictionary: &Dictionary) -> Result<String, TemplateError> {
        let entities: Vec<EntityContext> = dictionary
            .schema()
            .values()
            .map(|entity| EntityContext {
                id: &entity.id,
                description: &entity.description,
                properties: sanitize_properties(entity),
            })
            .collect();
        let links: Vec<&str> = dictionary.links().into_iter().collect();

        debug!(
            "Rendering {} for {} entity type(s), {} link(s)",
            self.name,
            entities.len(),
            links.len()
        );

        let ctx = context! {
            name => dictionary.name(),
            version => dictionary.version(),
            url => dictionary.url(),
            description => format!(
                "Graph data schema for {} {}",
                dictionary.name(),
                dictionary.version()
            ),
            entities => entities,
            links => links,
        };

        self.env
            .render_str(&self.source, ctx)
            .map_err(|error| {
                TemplateError::from_minijinja_error(error, self.source.clone(), &self.name)
            })
    }

    /// Render and parse the schema document
    pub fn render(&self, dictionary: &Dictionary) -> Result<Value, ExportError> {
        let rendered = self.render_str(dictionary)?;
        serde_json::from_str(&rendered).map_err(ExportError::Json)
    }

    /// Write `<flavor>.json` and `<flavor>.yaml` into `output_dir`, returning
    /// the shared path stem
    pub fn write(
        &self,
        dictionary: &Dictionary,
        flavor: &str,
        output_dir: &Path,
    ) -> Result<PathBuf, ExportError> {
        let schema = self.render(dictionary)?;

        std::fs::create_dir_all(output_dir).map_err(|source| ExportError::Io {
            path: output_dir.to_path_buf(),
            source,
        })?;

        let stem = output_dir.join(flavor.to_ascii_lowercase());

        let json_path = stem.with_extension("json");
        let json = serde_json::to_string_pretty(&schema).map_err(ExportError::Json)?;
        write_file(&json_path, &json)?;

        let yaml_path = stem.with_extension("yaml");
        let yaml = serde_yaml::to_string(&schema).map_err(ExportError::Yaml)?;
        write_file(&yaml_path, &yaml)?;

        info!("Wrote {} and {}", json_path.display(), yaml_path.display());
        Ok(stem)
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), ExportError> {
    std::fs::write(path, content).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reduce each property definition of an entity to plain validation keywords
fn sanitize_properties(entity: &EntitySchema) -> Map<String, Value> {
    entity
        .properties
        .iter()
        .map(|(name, definition)| (name.clone(), sanitize_definition(definition)))
        .collect()
}

fn sanitize_definition(definition: &Value) -> Value {
    let Value::Object(map) = definition else {
        return Value::Object(Map::new());
    };

    let mut sanitized = Map::new();
    for keyword in PROPERTY_KEYWORDS {
        let Some(value) = map.get(*keyword) else {
            continue;
        };

        let value = match (*keyword, value) {
            ("items", item) => sanitize_definition(item),
            ("oneOf" | "anyOf", Value::Array(options)) => {
                Value::Array(options.iter().map(sanitize_definition).collect())
            }
            _ => value.clone(),
        };
        sanitized.insert(keyword.to_string(), value);
    }
    Value::Object(sanitized)
}
