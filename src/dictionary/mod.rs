//! Data dictionaries: `$ref` resolution of schema files, resolved entity
//! schemas, and the association graph derived from their links.

mod association;
pub mod error;
mod loader;
mod model;
pub mod readers;
pub mod resolver;
mod schema;

pub use association::{Association, extract_associations};
pub use error::{ReadError, ResolveError};
pub use loader::{DEFAULT_DEFINITIONS, DEFAULT_META_SCHEMA, default_excludes, load_schemas};
pub use model::Dictionary;
pub use readers::{DictionaryReader, DictionarySource, LocalSource, dictionary_home};
pub use resolver::ResolutionSession;
pub use schema::{Category, EntitySchema, LinkDeclaration, Multiplicity};
