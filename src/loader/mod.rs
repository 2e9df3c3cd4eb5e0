//! Loading data graph resources and resolving their `extends` chains

pub mod error;
mod file_scanner;

use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

pub use self::error::ResourceError;
pub use self::file_scanner::DocumentFormat;
use crate::models::{DataGraph, Payload, Resource};

/// Loads data graph files from one resource directory.
///
/// `extends` values name other files in the same directory.
pub struct ResourceLoader {
    resource_dir: PathBuf,
}

impl ResourceLoader {
    pub fn new(resource_dir: impl Into<PathBuf>) -> Self {
        Self {
            resource_dir: resource_dir.into(),
        }
    }

    pub fn resource_dir(&self) -> &Path {
        &self.resource_dir
    }

    /// Read a data file into its untyped document
    pub fn read_document(&self, file_name: &str) -> Result<Value, ResourceError> {
        let path = self.resource_dir.join(file_name);
        let format = DocumentFormat::from_path(&path)?;

        debug!("Loading data graph {}", path.display());
        let content = std::fs::read_to_string(&path).map_err(|source| ResourceError::Io {
            path: path.clone(),
            source,
        })?;

        match format {
            DocumentFormat::Json => {
                serde_json::from_str(&content).map_err(|source| ResourceError::Json { path, source })
            }
            DocumentFormat::Yaml => {
                serde_yaml::from_str(&content).map_err(|source| ResourceError::Yaml { path, source })
            }
        }
    }

    /// Load a single file without following `extends`
    pub fn load(&self, file_name: &str) -> Result<DataGraph, ResourceError> {
        let document = self.read_document(file_name)?;
        serde_json::from_value(document).map_err(|source| ResourceError::Shape {
            path: self.resource_dir.join(file_name),
            source,
        })
    }

    /// Load `file_name` and fold its whole extension chain into one graph
    pub fn merge(&self, file_name: &str) -> Result<DataGraph, ResourceError> {
        let mut merged = self.load(file_name)?;
        let mut chain = vec![file_name.to_string()];
        let mut next = merged.extends.take();

        while let Some(base_name) = next {
            Self::check_chain(&mut chain, &base_name)?;
            debug!("Merging {base_name} into {file_name}");

            let mut base = self.load(&base_name)?;
            next = base.extends.take();
            merged.absorb(base);
        }

        Ok(merged)
    }

    /// Load every file of the extension chain as separate, unmerged
    /// resources, child first.
    ///
    /// Only unreadable or unparseable files fail the load. A file whose
    /// content is not shaped like a data graph is kept with its document so
    /// the schema check can report on it.
    pub fn load_all(&self, file_name: &str) -> Result<Payload, ResourceError> {
        let mut payload = Payload::new();
        let mut chain = vec![file_name.to_string()];
        let mut next = Some(file_name.to_string());

        while let Some(name) = next {
            let document = self.read_document(&name)?;
            let resource = Resource::new(name, document);
            next = resource.extends().map(str::to_string);
            if let Some(base_name) = &next {
                Self::check_chain(&mut chain, base_name)?;
            }
            payload.push(resource);
        }

        Ok(payload)
    }

    fn check_chain(chain: &mut Vec<String>, next: &str) -> Result<(), ResourceError> {
        if chain.iter().any(|seen| seen == next) {
            let mut cycle = chain.clone();
            cycle.push(next.to_string());
            return Err(ResourceError::ExtendsCycle { chain: cycle });
        }
        chain.push(next.to_string());
        Ok(())
    }
}
