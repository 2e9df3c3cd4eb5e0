use anyhow::Result;
use std::collections::{BTreeSet, HashMap};

use crate::flavors::Flavor;
use crate::validation::validator::{Payload, Validator};
use crate::validation::violation::{Violation, ViolationMap};

pub const ASSOCIATION_VALIDATOR: &str = "association";

/// Checks every edge against the dictionary's declared associations.
///
/// An edge between types with no association is an error. An edge whose
/// explicit label matches none of the associations between its types is a
/// warning. Edges with an endpoint that is not defined are left to the
/// undefined-link check.
pub struct AssociationValidator;

impl Validator for AssociationValidator {
    fn name(&self) -> &'static str {
        ASSOCIATION_VALIDATOR
    }

    fn validate(&self, payload: &Payload, flavor: &Flavor) -> Result<ViolationMap> {
        let dictionary = flavor.dictionary();

        let mut node_types: HashMap<&str, &str> = HashMap::new();
        for (_, graph) in payload.graphs() {
            let unique_field = graph.unique_field();
            for node in &graph.nodes {
                if let (Some(uid), Some(label)) =
                    (node.unique_value(unique_field), node.label.as_deref())
                {
                    node_types.insert(uid, label);
                }
            }
        }

        let mut violations = ViolationMap::new();
        for (resource, graph) in payload.graphs() {
            let mut found = BTreeSet::new();

            for (index, edge) in graph.edges.iter().enumerate() {
                let (Some(&src_label), Some(&dst_label)) = (
                    node_types.get(edge.src.as_str()),
                    node_types.get(edge.dst.as_str()),
                ) else {
                    continue;
                };

                let matched: Vec<_> = dictionary
                    .associations(src_label)
                    .into_iter()
                    .filter(|association| association.dst == dst_label)
                    .collect();

                if matched.is_empty() {
                    found.insert(Violation::error(
                        ASSOCIATION_VALIDATOR,
                        flavor.name(),
                        format!("edges.{index}"),
                        format!("node type {src_label} cannot be linked to {dst_label}"),
                    ));
                    continue;
                }

                if let Some(edge_label) = &edge.label
                    && !matched
                        .iter()
                        .any(|association| &association.label == edge_label)
                {
                    found.insert(Violation::warning(
                        ASSOCIATION_VALIDATOR,
                        flavor.name(),
                        format!("edges.{index}"),
                        format!(
                            "Invalid edge name {edge_label} for edge {src_label} -> {dst_label}"
                        ),
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
