use anyhow::Result;
use std::collections::{BTreeSet, HashSet};

use crate::flavors::Flavor;
use crate::validation::validator::{Payload, Validator};
use crate::validation::violation::{Violation, ViolationMap};

pub const UNDEFINED_LINK_VALIDATOR: &str = "undefined_link";

/// Flags edges whose source or destination is not defined by any node of
/// the payload. Each missing endpoint is reported separately.
pub struct UndefinedLinkValidator;

impl Validator for UndefinedLinkValidator {
    fn name(&self) -> &'static str {
        UNDEFINED_LINK_VALIDATOR
    }

    fn validate(&self, payload: &Payload, flavor: &Flavor) -> Result<ViolationMap> {
        // Resources of one chain may link to each other's nodes
        let defined: HashSet<&str> = payload
            .graphs()
            .flat_map(|(_, graph)| {
                let unique_field = graph.unique_field();
                graph
                    .nodes
                    .iter()
                    .filter_map(move |node| node.unique_value(unique_field))
            })
            .collect();

        let mut violations = ViolationMap::new();
        for (resource, graph) in payload.graphs() {
            let unique_field = graph.unique_field();
            let mut found = BTreeSet::new();

            for (index, edge) in graph.edges.iter().enumerate() {
                for endpoint in [&edge.src, &edge.dst] {
                    if defined.contains(endpoint.as_str()) {
                        continue;
                    }
                    found.insert(Violation::error(
                        UNDEFINED_LINK_VALIDATOR,
                        flavor.name(),
                        format!("edges.{index}"),
                        format!("node with {unique_field} value {endpoint} not defined"),
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
