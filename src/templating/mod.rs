pub mod engine;
pub mod error;

pub use engine::{SCHEMA_TEMPLATE_NAME, SchemaGenerator};
pub use error::{ExportError, TemplateError};
