//! Data file format detection

use std::path::Path;

use super::error::ResourceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Pick the format from the file extension
    pub fn from_path(path: &Path) -> Result<Self, ResourceError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();

        match extension {
            "json" => Ok(DocumentFormat::Json),
            "yml" | "yaml" => Ok(DocumentFormat::Yaml),
            other => Err(ResourceError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: other.to_string(),
            }),
        }
    }

    pub fn is_data_file(path: &Path) -> bool {
        Self::from_path(path).is_ok()
    }
}
