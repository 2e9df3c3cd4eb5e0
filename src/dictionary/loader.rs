//! Loading every schema file of a dictionary directory into resolved entity schemas

use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

use super::error::ResolveError;
use super::resolver::ResolutionSession;
use super::schema::EntitySchema;

pub const DEFAULT_META_SCHEMA: &str = "metaschema.yaml";
pub const DEFAULT_DEFINITIONS: [&str; 3] = ["_definitions.yaml", "_terms.yaml", "_terms_enum.yaml"];

/// File names that are registered for reference resolution but never
/// loaded as entity schemas
pub fn default_excludes() -> BTreeSet<String> {
    std::iter::once(DEFAULT_META_SCHEMA)
        .chain(DEFAULT_DEFINITIONS)
        .map(str::to_string)
        .collect()
}

pub const README: &str = "README.md";

/// Regular files directly inside `root` except the README, sorted by name.
///
/// Every file is read as YAML, which also covers JSON documents.
fn scan_schema_files(root: &Path) -> Result<Vec<PathBuf>, ResolveError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| ResolveError::Io {
            path: e.path().unwrap_or(root).to_path_buf(),
            source: e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("directory walk failed")),
        })?;

        if entry.file_type().is_file() && entry.file_name() != README {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

fn read_document(path: &Path) -> Result<Value, ResolveError> {
    let content = std::fs::read_to_string(path).map_err(|source| ResolveError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&content).map_err(|source| ResolveError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Register every schema file under `root`, then resolve each one that is
/// not excluded and key it by its declared `id`.
pub fn load_schemas(
    root: &Path,
    excludes: &BTreeSet<String>,
) -> Result<BTreeMap<String, EntitySchema>, ResolveError> {
    let mut session = ResolutionSession::new();
    let mut entity_files = Vec::new();

    for path in scan_schema_files(root)? {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
            .to_string();

        session.register(file_name.clone(), read_document(&path)?);
        if !excludes.contains(&file_name) {
            entity_files.push(file_name);
        }
    }

    debug!(
        "Registered {} schema files from {}",
        session.len(),
        root.display()
    );

    let mut schemas = BTreeMap::new();
    for file in entity_files {
        let raw_id = session
            .document(&file)
            .and_then(|document| document.get("id"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| ResolveError::MissingId { file: file.clone() })?;

        debug!("Resolving dictionary schema with id: {raw_id}");
        let resolved = session.resolve_file(&file)?;
        let entity = EntitySchema::from_value(resolved).map_err(|source| {
            ResolveError::InvalidSchema {
                id: raw_id.clone(),
                source,
            }
        })?;

        schemas.insert(raw_id, entity);
    }

    info!("Resolved {} entity schemas from {}", schemas.len(), root.display());
    Ok(schemas)
}
