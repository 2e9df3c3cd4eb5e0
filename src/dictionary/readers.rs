//! Locating dictionary sources and loading them into [`Dictionary`] instances

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use super::error::ReadError;
use super::loader::{default_excludes, load_schemas};
use super::model::Dictionary;

pub const DICTIONARY_HOME_ENV: &str = "GML_DICTIONARY_HOME";

/// Default location of locally stored dictionaries:
/// `$GML_DICTIONARY_HOME`, else `$HOME/.gml/dictionaries`.
pub fn dictionary_home() -> PathBuf {
    if let Some(home) = std::env::var_os(DICTIONARY_HOME_ENV) {
        return PathBuf::from(home);
    }
    let user_home = std::env::var_os("HOME").map(PathBuf::from).unwrap_or_default();
    user_home.join(".gml").join("dictionaries")
}

/// Somewhere a dictionary's schema files can be fetched from.
///
/// `fetch` yields a directory holding one schema file per entity type plus
/// the shared definition files.
pub trait DictionarySource: Send + Sync {
    fn name(&self) -> &str;
    fn version(&self) -> &str;

    /// Location recorded on the loaded dictionary
    fn url(&self) -> String;

    fn fetch(&self) -> Result<PathBuf, ReadError>;

    /// Files registered for `$ref` resolution but not loaded as entities
    fn excludes(&self) -> BTreeSet<String> {
        default_excludes()
    }
}

/// A dictionary already present on disk
#[derive(Debug, Clone)]
pub struct LocalSource {
    name: String,
    version: String,
    directory: PathBuf,
    excludes: Option<BTreeSet<String>>,
}

impl LocalSource {
    /// Dictionary stored as `<home>/<name>/<version>`
    pub fn in_home(home: &Path, name: &str, version: &str) -> Self {
        Self::at(home.join(name).join(version), name, version)
    }

    /// Dictionary stored in an explicit directory
    pub fn at(directory: impl Into<PathBuf>, name: &str, version: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            directory: directory.into(),
            excludes: None,
        }
    }

    pub fn with_excludes(mut self, excludes: impl IntoIterator<Item = String>) -> Self {
        self.excludes = Some(excludes.into_iter().collect());
        self
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl DictionarySource for LocalSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn url(&self) -> String {
        self.directory.display().to_string()
    }

    fn fetch(&self) -> Result<PathBuf, ReadError> {
        if !self.directory.is_dir() {
            info!(
                "No local dictionary with name: {}, version: {} found",
                self.name, self.version
            );
            return Err(ReadError::NotFound {
                name: self.name.clone(),
                version: self.version.clone(),
                path: self.directory.clone(),
            });
        }
        Ok(self.directory.clone())
    }

    fn excludes(&self) -> BTreeSet<String> {
        self.excludes.clone().unwrap_or_else(default_excludes)
    }
}

/// Loads dictionaries from their sources, resolving each (name, version)
/// at most once per reader.
#[derive(Debug, Default)]
pub struct DictionaryReader {
    cache: Mutex<HashMap<(String, String), Arc<Dictionary>>>,
}

impl DictionaryReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&self, source: &dyn DictionarySource) -> Result<Arc<Dictionary>, ReadError> {
        let key = (source.name().to_string(), source.version().to_string());

        if let Some(dictionary) = self.lock().get(&key) {
            debug!("Using cached dictionary {} {}", key.0, key.1);
            return Ok(Arc::clone(dictionary));
        }

        let directory = source.fetch()?;
        info!("Loading dictionary from {}", directory.display());

        let schema = load_schemas(&directory, &source.excludes()).map_err(|source_error| {
            ReadError::Resolve {
                name: key.0.clone(),
                version: key.1.clone(),
                source: source_error,
            }
        })?;

        let dictionary = Arc::new(Dictionary::new(
            source.name(),
            source.version(),
            schema,
            Some(source.url()),
        ));
        self.lock().insert(key, Arc::clone(&dictionary));
        Ok(dictionary)
    }

    pub fn cached(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<(String, String), Arc<Dictionary>>> {
        // A poisoned cache only ever holds fully built dictionaries
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
