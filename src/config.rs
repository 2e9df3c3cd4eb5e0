//! `gml.yaml` settings: where dictionaries live and which flavors exist

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "gml.yaml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Root of locally stored dictionaries, `<home>/<name>/<version>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dictionary_home: Option<PathBuf>,

    #[serde(default)]
    pub flavors: BTreeMap<String, FlavorSettings>,
}

/// One configured dictionary flavor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlavorSettings {
    /// Dictionary name
    pub name: String,
    pub version: String,

    /// Explicit dictionary directory, overrides the dictionary home layout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Pinned graph data schema; generated from the dictionary when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excludes: Option<Vec<String>>,
}

impl Settings {
    /// Read settings from `path`. A missing file yields empty settings.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        // Relative paths are taken from the settings file's directory
        if let Some(base) = path.parent() {
            settings.rebase(base);
        }
        Ok(settings)
    }

    fn rebase(&mut self, base: &Path) {
        let rebase = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };

        if let Some(home) = self.dictionary_home.as_mut() {
            rebase(home);
        }
        for flavor in self.flavors.values_mut() {
            if let Some(path) = flavor.path.as_mut() {
                rebase(path);
            }
            if let Some(schema) = flavor.schema.as_mut() {
                rebase(schema);
            }
        }
    }
}
