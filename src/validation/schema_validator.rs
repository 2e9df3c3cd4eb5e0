use anyhow::{Context, Result};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};
use tracing::debug;

use super::schemas::dotted_path;
use super::validator::{Payload, Validator};
use super::violation::{Violation, ViolationMap};
use crate::flavors::Flavor;

// Graph data schemas are generated as draft-07 documents
use jsonschema::draft7 as schema_draft;

pub const SCHEMA_VALIDATOR: &str = "schema";

/// Structural check of every resource against the flavor's JSON Schema.
///
/// The submitted document is checked, not its typed view, so missing keys
/// and wrongly typed values are reported here.
///
/// Compiled schemas are kept per flavor and dictionary version for the
/// lifetime of the validator.
#[derive(Default)]
pub struct SchemaValidator {
    compiled: Mutex<HashMap<String, Arc<jsonschema::Validator>>>,
}

impl SchemaValidator {
    pub fn new() -> Self {
        Self::default()
    }

    fn compiled(&self, flavor: &Flavor) -> Result<Arc<jsonschema::Validator>> {
        let key = format!("{}@{}", flavor.name(), flavor.dictionary().version());
        let mut compiled = self
            .compiled
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(validator) = compiled.get(&key) {
            return Ok(Arc::clone(validator));
        }

        debug!("Compiling graph data schema for {key}");
        let schema = flavor.json_schema()?;
        let validator = schema_draft::options()
            .build(&schema)
            .with_context(|| format!("Failed to compile graph data schema for {key}"))?;

        let validator = Arc::new(validator);
        compiled.insert(key, Arc::clone(&validator));
        Ok(validator)
    }

    pub fn compiled_count(&self) -> usize {
        self.compiled
            .lock()
            .map(|compiled| compiled.len())
            .unwrap_or_default()
    }
}

impl Validator for SchemaValidator {
    fn name(&self) -> &'static str {
        SCHEMA_VALIDATOR
    }

    fn validate(&self, payload: &Payload, flavor: &Flavor) -> Result<ViolationMap> {
        let validator = self.compiled(flavor)?;
        let mut violations = ViolationMap::new();

        for resource in payload {
            let found: BTreeSet<Violation> = validator
                .iter_errors(&resource.document)
                .map(|error| {
                    Violation::error(
                        SCHEMA_VALIDATOR,
                        flavor.name(),
                        dotted_path(&error.instance_path.to_string()),
                        error.to_string(),
                    )
                })
                .collect();

            violations.insert(resource.name.clone(), found);
        }

        Ok(violations)
    }
}
