use anyhow::{Context, Result};
use serde_json::Value;
use std::path::PathBuf;

use crate::dictionary::Dictionary;
use crate::templating::SchemaGenerator;

/// Where a flavor's graph-data JSON Schema comes from
#[derive(Debug, Clone, Default)]
pub enum SchemaSource {
    /// Rendered from the flavor's dictionary
    #[default]
    Generated,
    /// A pinned JSON or YAML schema document on disk
    File(PathBuf),
    Inline(Value),
}

impl SchemaSource {
    pub fn load(&self, dictionary: &Dictionary) -> Result<Value> {
        match self {
            SchemaSource::Generated => SchemaGenerator::new()
                .render(dictionary)
                .context("Failed to generate graph data schema"),
            SchemaSource::File(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read schema file: {path:?}"))?;
                let is_json = path.extension().is_some_and(|ext| ext == "json");
                if is_json {
                    serde_json::from_str(&content)
                        .with_context(|| format!("Failed to parse JSON schema: {path:?}"))
                } else {
                    serde_yaml::from_str(&content)
                        .with_context(|| format!("Failed to parse YAML schema: {path:?}"))
                }
            }
            SchemaSource::Inline(value) => Ok(value.clone()),
        }
    }
}

/// Convert a JSON Pointer instance path (`/nodes/0/label`) into the dotted
/// form used in violations (`nodes.0.label`)
pub fn dotted_path(pointer: &str) -> String {
    pointer
        .split('/')
        .skip(1)
        .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
        .collect::<Vec<_>>()
        .join(".")
}
