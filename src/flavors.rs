//! Dictionary flavors: named pairings of a dictionary source with the JSON
//! Schema data graphs of that flavor are checked against.

use miette::Diagnostic;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::config::Settings;
use crate::dictionary::{
    Dictionary, DictionaryReader, DictionarySource, LocalSource, ReadError, dictionary_home,
};
use crate::validation::SchemaSource;

#[derive(Error, Debug, Diagnostic)]
pub enum FlavorError {
    #[error("unknown dictionary flavor '{flavor}' (known: {})", known.join(", "))]
    #[diagnostic(
        code(psqlgml::flavor::unknown),
        help("flavors are declared under `flavors` in gml.yaml")
    )]
    Unknown { flavor: String, known: Vec<String> },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Read(#[from] ReadError),

    #[error("failed to load graph data schema for flavor '{flavor}': {message}")]
    #[diagnostic(code(psqlgml::flavor::schema))]
    Schema { flavor: String, message: String },
}

/// A resolved flavor: its dictionary and where its data schema comes from
#[derive(Debug, Clone)]
pub struct Flavor {
    name: String,
    dictionary: Arc<Dictionary>,
    schema: SchemaSource,
}

impl Flavor {
    pub fn new(name: impl Into<String>, dictionary: Arc<Dictionary>, schema: SchemaSource) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            dictionary,
            schema,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn schema_source(&self) -> &SchemaSource {
        &self.schema
    }

    /// The graph data JSON Schema document of this flavor
    pub fn json_schema(&self) -> Result<Value, FlavorError> {
        self.schema
            .load(&self.dictionary)
            .map_err(|error| FlavorError::Schema {
                flavor: self.name.clone(),
                message: format!("{error:#}"),
            })
    }
}

struct FlavorEntry {
    source: Box<dyn DictionarySource>,
    schema: SchemaSource,
}

/// Flavor identifiers mapped to their dictionary and schema sources.
///
/// Identifiers are matched case-insensitively. Dictionaries are loaded on
/// first resolution and shared afterwards.
#[derive(Default)]
pub struct FlavorRegistry {
    flavors: BTreeMap<String, FlavorEntry>,
    reader: DictionaryReader,
}

impl FlavorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from configured flavors. Flavors without an explicit
    /// path are looked up under the dictionary home.
    pub fn from_settings(settings: &Settings, home_override: Option<PathBuf>) -> Self {
        let home = home_override
            .or_else(|| settings.dictionary_home.clone())
            .unwrap_or_else(dictionary_home);
        debug!("Dictionary home: {}", home.display());

        let mut registry = Self::new();
        for (flavor, entry) in &settings.flavors {
            let mut source = match &entry.path {
                Some(path) => LocalSource::at(path, &entry.name, &entry.version),
                None => LocalSource::in_home(&home, &entry.name, &entry.version),
            };
            if let Some(excludes) = &entry.excludes {
                source = source.with_excludes(excludes.iter().cloned());
            }

            let schema = entry
                .schema
                .clone()
                .map(SchemaSource::File)
                .unwrap_or_default();
            registry.register(flavor, source, schema);
        }
        registry
    }

    pub fn register(
        &mut self,
        flavor: &str,
        source: impl DictionarySource + 'static,
        schema: SchemaSource,
    ) {
        self.flavors.insert(
            flavor.to_ascii_uppercase(),
            FlavorEntry {
                source: Box::new(source),
                schema,
            },
        );
    }

    pub fn names(&self) -> Vec<&str> {
        self.flavors.keys().map(String::as_str).collect()
    }

    pub fn contains(&self, flavor: &str) -> bool {
        self.flavors.contains_key(&flavor.to_ascii_uppercase())
    }

    pub fn resolve(&self, flavor: &str) -> Result<Flavor, FlavorError> {
        let key = flavor.to_ascii_uppercase();
        let entry = self.flavors.get(&key).ok_or_else(|| FlavorError::Unknown {
            flavor: flavor.to_string(),
            known: self.flavors.keys().cloned().collect(),
        })?;

        let dictionary = self.reader.read(entry.source.as_ref())?;
        Ok(Flavor::new(key, dictionary, entry.schema.clone()))
    }
}
