//! Error types for dictionary resolution and reading

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Failure while expanding `$ref` pointers or loading schema files.
///
/// Every variant is fatal to the dictionary load: a partially resolved
/// dictionary would produce wrong associations.
#[derive(Error, Debug, Diagnostic)]
pub enum ResolveError {
    #[error("reference '{reference}' points to unregistered schema file '{file}'")]
    #[diagnostic(
        code(psqlgml::resolve::unresolved_reference),
        help("every file referenced by a `$ref` must live in the dictionary directory")
    )]
    UnresolvedReference { reference: String, file: String },

    #[error("pointer '{pointer}' not found in schema file '{file}' (reference '{reference}')")]
    #[diagnostic(code(psqlgml::resolve::malformed_pointer))]
    MalformedPointer {
        reference: String,
        file: String,
        pointer: String,
    },

    #[error("reference '{reference}' resolved to a non-mapping value")]
    #[diagnostic(
        code(psqlgml::resolve::non_object_reference),
        help("`$ref` targets are merged into the referencing mapping and must be mappings")
    )]
    NonObjectReference { reference: String },

    #[error("'$ref' value must be a string or a list of strings, found: {found}")]
    #[diagnostic(code(psqlgml::resolve::invalid_reference))]
    InvalidReference { found: String },

    #[error("reference cycle detected: {}", chain.join(" -> "))]
    #[diagnostic(code(psqlgml::resolve::cycle))]
    Cycle { chain: Vec<String> },

    #[error("schema file '{file}' has no string 'id' field")]
    #[diagnostic(code(psqlgml::resolve::missing_id))]
    MissingId { file: String },

    #[error("resolved schema '{id}' is not a valid entity schema: {source}")]
    #[diagnostic(code(psqlgml::resolve::invalid_schema))]
    InvalidSchema {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read schema file {path:?}")]
    #[diagnostic(code(psqlgml::resolve::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse schema file {path:?}")]
    #[diagnostic(code(psqlgml::resolve::parse))]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Failure while locating or reading a dictionary from its source.
#[derive(Error, Debug, Diagnostic)]
pub enum ReadError {
    #[error("no dictionary named '{name}' with version '{version}' found at {path:?}")]
    #[diagnostic(
        code(psqlgml::dictionary::not_found),
        help("set GML_DICTIONARY_HOME or pass --dictionary-home to point at the dictionary store")
    )]
    NotFound {
        name: String,
        version: String,
        path: PathBuf,
    },

    #[error("failed to load dictionary '{name}' version '{version}'")]
    #[diagnostic(code(psqlgml::dictionary::resolve))]
    Resolve {
        name: String,
        version: String,
        #[source]
        #[diagnostic_source]
        source: ResolveError,
    },
}
