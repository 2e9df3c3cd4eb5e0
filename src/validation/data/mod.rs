//! Relational checks over the nodes and edges of a payload

mod association_validator;
mod duplicate_validator;
mod undefined_link_validator;

pub use association_validator::{ASSOCIATION_VALIDATOR, AssociationValidator};
pub use duplicate_validator::{DUPLICATE_VALIDATOR, DuplicateDefinitionValidator};
pub use undefined_link_validator::{UNDEFINED_LINK_VALIDATOR, UndefinedLinkValidator};
