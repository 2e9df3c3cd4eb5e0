use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Failure while loading a data graph resource
#[derive(Error, Debug, Diagnostic)]
pub enum ResourceError {
    #[error("unsupported data file format '{extension}' for {path:?}")]
    #[diagnostic(
        code(psqlgml::resource::unsupported_format),
        help("data files must end in .json, .yml or .yaml")
    )]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("failed to read data file {path:?}")]
    #[diagnostic(code(psqlgml::resource::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON data file {path:?}")]
    #[diagnostic(code(psqlgml::resource::parse))]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse YAML data file {path:?}")]
    #[diagnostic(code(psqlgml::resource::parse))]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("data file {path:?} is not shaped like a data graph")]
    #[diagnostic(
        code(psqlgml::resource::shape),
        help("run `psqlgml validate` on the file to list its schema violations")
    )]
    Shape {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("circular 'extends' chain: {}", chain.join(" -> "))]
    #[diagnostic(code(psqlgml::resource::extends_cycle))]
    ExtendsCycle { chain: Vec<String> },
}
