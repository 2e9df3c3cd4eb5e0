mod data;
mod schema_validator;
mod schemas;
mod validator;
mod violation;

#[cfg(test)]
mod tests;

pub use data::{
    ASSOCIATION_VALIDATOR, AssociationValidator, DUPLICATE_VALIDATOR,
    DuplicateDefinitionValidator, UNDEFINED_LINK_VALIDATOR, UndefinedLinkValidator,
};
pub use schema_validator::{SCHEMA_VALIDATOR, SchemaValidator};
pub use schemas::{SchemaSource, dotted_path};
pub use validator::{
    GRAPH_SHAPE_VALIDATOR, Payload, Validator, ValidatorFactory, ValidatorSelection,
};
pub use violation::{
    PipelineDiagnostic, Severity, ValidationReport, Violation, ViolationMap,
};
