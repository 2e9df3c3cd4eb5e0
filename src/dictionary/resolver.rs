//! `$ref` expansion across the schema files of one dictionary

use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::{debug, trace};

use super::error::ResolveError;

pub const REF_KEY: &str = "$ref";

/// The set of raw schema documents a dictionary load may reference.
///
/// Every file of a dictionary is registered before any file is resolved,
/// because references are not ordered with respect to load order. A session
/// lives for exactly one dictionary load and is never shared between
/// dictionaries.
#[derive(Debug, Default, Clone)]
pub struct ResolutionSession {
    documents: HashMap<String, Value>,
}

impl ResolutionSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the raw content of a schema file under its file name
    pub fn register(&mut self, file: impl Into<String>, document: Value) {
        let file = file.into();
        trace!("Registering schema file {file}");
        self.documents.insert(file, document);
    }

    pub fn is_registered(&self, file: &str) -> bool {
        self.documents.contains_key(file)
    }

    pub fn document(&self, file: &str) -> Option<&Value> {
        self.documents.get(file)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Resolve a registered file in its own context
    pub fn resolve_file(&self, file: &str) -> Result<Value, ResolveError> {
        let document = self
            .documents
            .get(file)
            .ok_or_else(|| ResolveError::UnresolvedReference {
                reference: format!("{file}#"),
                file: file.to_string(),
            })?;
        self.resolve(document, Some(file))
    }

    /// Return a copy of `value` with every `$ref` replaced by its target.
    ///
    /// `current_file` is the file same-file references (`#/...`) resolve
    /// against. Referenced content is itself resolved in the context of the
    /// file it came from.
    pub fn resolve(&self, value: &Value, current_file: Option<&str>) -> Result<Value, ResolveError> {
        let mut chain = Vec::new();
        self.resolve_value(value, current_file, &mut chain)
    }

    fn resolve_value(
        &self,
        value: &Value,
        current_file: Option<&str>,
        chain: &mut Vec<String>,
    ) -> Result<Value, ResolveError> {
        match value {
            Value::Array(items) => items
                .iter()
                .map(|item| self.resolve_value(item, current_file, chain))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            Value::Object(map) => self.resolve_mapping(map, current_file, chain),
            scalar => Ok(scalar.clone()),
        }
    }

    fn resolve_mapping(
        &self,
        map: &Map<String, Value>,
        current_file: Option<&str>,
        chain: &mut Vec<String>,
    ) -> Result<Value, ResolveError> {
        let mut resolved = Map::new();

        // Referenced content first; plain siblings overwrite it below
        if let Some(refs) = map.get(REF_KEY) {
            for reference in Self::references(refs)? {
                match self.resolve_reference(reference, current_file, chain)? {
                    Value::Object(target) => resolved.extend(target),
                    _ => {
                        return Err(ResolveError::NonObjectReference {
                            reference: reference.to_string(),
                        });
                    }
                }
            }
        }

        for (key, value) in map {
            if key == REF_KEY {
                continue;
            }
            let value = self.resolve_value(value, current_file, chain)?;
            resolved.insert(key.clone(), value);
        }

        Ok(Value::Object(resolved))
    }

    fn references(value: &Value) -> Result<Vec<&str>, ResolveError> {
        match value {
            Value::String(reference) => Ok(vec![reference.as_str()]),
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_str().ok_or_else(|| ResolveError::InvalidReference {
                        found: item.to_string(),
                    })
                })
                .collect(),
            other => Err(ResolveError::InvalidReference {
                found: other.to_string(),
            }),
        }
    }

    fn resolve_reference(
        &self,
        reference: &str,
        current_file: Option<&str>,
        chain: &mut Vec<String>,
    ) -> Result<Value, ResolveError> {
        debug!("Resolving reference: {reference} (current file: {current_file:?})");

        let (file_part, pointer) = reference.split_once('#').unwrap_or((reference, ""));
        let file = if file_part.is_empty() {
            current_file.ok_or_else(|| ResolveError::UnresolvedReference {
                reference: reference.to_string(),
                file: "<none>".to_string(),
            })?
        } else {
            file_part
        };

        let document = self
            .documents
            .get(file)
            .ok_or_else(|| ResolveError::UnresolvedReference {
                reference: reference.to_string(),
                file: file.to_string(),
            })?;

        let target = document
            .pointer(pointer)
            .ok_or_else(|| ResolveError::MalformedPointer {
                reference: reference.to_string(),
                file: file.to_string(),
                pointer: pointer.to_string(),
            })?;

        let location = format!("{file}#{pointer}");
        if chain.contains(&location) {
            let mut cycle = chain.clone();
            cycle.push(location);
            return Err(ResolveError::Cycle { chain: cycle });
        }

        chain.push(location);
        let resolved = self.resolve_value(target, Some(file), chain);
        chain.pop();
        resolved
    }
}
