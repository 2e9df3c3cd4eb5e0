use anyhow::Result;
use std::collections::{BTreeSet, HashSet};

use crate::flavors::Flavor;
use crate::validation::validator::{Payload, Validator};
use crate::validation::violation::{Violation, ViolationMap};

pub const DUPLICATE_VALIDATOR: &str = "duplicate_definition";

/// Flags a node whose unique value was already used by an earlier node,
/// in the same resource or any resource loaded before it.
///
/// Resources are visited in load order, child first, so the copy in the
/// base resource is the one reported.
pub struct DuplicateDefinitionValidator;

impl Validator for DuplicateDefinitionValidator {
    fn name(&self) -> &'static str {
        DUPLICATE_VALIDATOR
    }

    fn validate(&self, payload: &Payload, flavor: &Flavor) -> Result<ViolationMap> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut violations = ViolationMap::new();

        for (resource, graph) in payload.graphs() {
            let unique_field = graph.unique_field();
            let mut found = BTreeSet::new();

            for (index, node) in graph.nodes.iter().enumerate() {
                let Some(uid) = node.unique_value(unique_field) else {
                    continue;
                };

                if !seen.insert(uid) {
                    found.insert(Violation::error(
                        DUPLICATE_VALIDATOR,
                        flavor.name(),
                        format!("nodes.{index}"),
                        format!("{unique_field} redefined for {uid}"),
                    ));
                }
            }

            if !found.is_empty() {
                violations.insert(resource.to_string(), found);
            }
        }

        Ok(violations)
    }
}
