use anyhow::Result;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, warn};

use super::data::{AssociationValidator, DuplicateDefinitionValidator, UndefinedLinkValidator};
use super::schema_validator::SchemaValidator;
use super::violation::{PipelineDiagnostic, ValidationReport, Violation, ViolationMap};
use crate::flavors::Flavor;
use crate::loader::{ResourceError, ResourceLoader};
pub use crate::models::Payload;

/// Reported for a resource whose content has no typed graph view
pub const GRAPH_SHAPE_VALIDATOR: &str = "graph_shape";

/// One independent check over a payload
pub trait Validator: Send + Sync {
    fn name(&self) -> &'static str;

    fn validate(&self, payload: &Payload, flavor: &Flavor) -> Result<ViolationMap>;
}

/// Which group of validators to run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidatorSelection {
    #[default]
    All,
    Schema,
    Data,
}

impl FromStr for ValidatorSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ALL" => Ok(ValidatorSelection::All),
            "SCHEMA" => Ok(ValidatorSelection::Schema),
            "DATA" => Ok(ValidatorSelection::Data),
            other => Err(format!(
                "unknown validator selection '{other}' (expected ALL, SCHEMA or DATA)"
            )),
        }
    }
}

impl fmt::Display for ValidatorSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidatorSelection::All => f.write_str("ALL"),
            ValidatorSelection::Schema => f.write_str("SCHEMA"),
            ValidatorSelection::Data => f.write_str("DATA"),
        }
    }
}

/// Runs an ordered list of validators and unions their findings
#[derive(Default)]
pub struct ValidatorFactory {
    validators: Vec<Box<dyn Validator>>,
}

impl ValidatorFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schema, duplicate-definition, undefined-link and association checks
    pub fn with_defaults() -> Self {
        let mut factory = Self::new();
        factory.register(SchemaValidator::new());
        factory.register(DuplicateDefinitionValidator);
        factory.register(UndefinedLinkValidator);
        factory.register(AssociationValidator);
        factory
    }

    pub fn for_selection(selection: ValidatorSelection) -> Self {
        match selection {
            ValidatorSelection::All => Self::with_defaults(),
            ValidatorSelection::Schema => {
                let mut factory = Self::new();
                factory.register(SchemaValidator::new());
                factory
            }
            ValidatorSelection::Data => {
                let mut factory = Self::new();
                factory.register(AssociationValidator);
                factory.register(UndefinedLinkValidator);
                factory.register(DuplicateDefinitionValidator);
                factory
            }
        }
    }

    pub fn register(&mut self, validator: impl Validator + 'static) {
        self.validators.push(Box::new(validator));
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.validators.iter().map(|v| v.name()).collect()
    }

    /// Run every registered validator over the payload.
    ///
    /// A validator that fails is recorded as a diagnostic and the remaining
    /// validators still run.
    pub fn validate(&self, payload: &Payload, flavor: &Flavor) -> ValidationReport {
        let mut report = ValidationReport::default();
        report.absorb(Self::shape_violations(payload, flavor));

        for validator in &self.validators {
            debug!("Running {} validator", validator.name());
            match validator.validate(payload, flavor) {
                Ok(violations) => {
                    debug!(
                        "  {} validator flagged {} resource(s)",
                        validator.name(),
                        violations.values().filter(|v| !v.is_empty()).count()
                    );
                    report.absorb(violations);
                }
                Err(error) => {
                    warn!("{} validator failed: {error:#}", validator.name());
                    report.diagnostics.push(PipelineDiagnostic {
                        validator: validator.name().to_string(),
                        message: format!("{error:#}"),
                    });
                }
            }
        }

        info!(
            "Validation against {} finished: {} error(s), {} warning(s)",
            flavor.name(),
            report.error_count(),
            report.warning_count()
        );
        report
    }

    /// Data checks skip resources that are not shaped like a data graph;
    /// each of those carries one error saying so.
    fn shape_violations(payload: &Payload, flavor: &Flavor) -> ViolationMap {
        let mut violations = ViolationMap::new();
        for resource in payload {
            if let Err(error) = &resource.graph {
                warn!("Skipping data checks for {}: {error}", resource.name);
                violations.insert(
                    resource.name.clone(),
                    BTreeSet::from([Violation::error(
                        GRAPH_SHAPE_VALIDATOR,
                        flavor.name(),
                        String::new(),
                        format!("not a data graph, data checks skipped: {error}"),
                    )]),
                );
            }
        }
        violations
    }

    /// Load every file of `file_name`'s extension chain and validate them
    pub fn validate_resource(
        &self,
        loader: &ResourceLoader,
        file_name: &str,
        flavor: &Flavor,
    ) -> Result<ValidationReport, ResourceError> {
        let payload = loader.load_all(file_name)?;
        Ok(self.validate(&payload, flavor))
    }
}
