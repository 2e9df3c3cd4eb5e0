use super::*;
use crate::dictionary::{Dictionary, EntitySchema, LinkDeclaration};
use crate::flavors::Flavor;
use crate::models::{DataEdge, DataGraph, DataNode, Resource, UniqueField};
use anyhow::bail;
use serde_json::json;
use std::sync::Arc;

fn link(name: &str, target: &str, backref: &str) -> LinkDeclaration {
    LinkDeclaration {
        name: Some(name.to_string()),
        target_type: Some(target.to_string()),
        backref: Some(backref.to_string()),
        ..Default::default()
    }
}

fn entity(id: &str, links: Vec<LinkDeclaration>) -> EntitySchema {
    let mut entity = EntitySchema::from_value(json!({"id": id})).unwrap();
    entity.links = links;
    entity
}

fn dictionary() -> Arc<Dictionary> {
    Arc::new(Dictionary::from_schemas(
        "dictionary",
        "0.1.0",
        vec![
            entity("program", vec![]),
            entity("project", vec![link("programs", "program", "projects")]),
            entity("case", vec![link("projects", "project", "cases")]),
            entity("sample", vec![link("cases", "case", "samples")]),
            entity("aliquot", vec![link("samples", "sample", "aliquots")]),
        ],
    ))
}

fn flavor() -> Flavor {
    Flavor::new("test", dictionary(), SchemaSource::Generated)
}

fn payload(graphs: Vec<(&str, DataGraph)>) -> Payload {
    graphs
        .into_iter()
        .map(|(name, graph)| Resource::new(name, serde_json::to_value(&graph).unwrap()))
        .collect()
}

fn graph(nodes: Vec<DataNode>, edges: Vec<DataEdge>) -> DataGraph {
    DataGraph {
        nodes,
        edges,
        ..Default::default()
    }
}

fn only(report: &ValidationReport, resource: &str) -> Vec<Violation> {
    report
        .violations_for(resource)
        .map(|set| set.iter().cloned().collect())
        .unwrap_or_default()
}

#[test]
fn test_duplicate_submitter_id() {
    let payload = payload(vec![(
        "dupes.yaml",
        graph(
            vec![DataNode::new("case", "c1"), DataNode::new("case", "c1")],
            vec![],
        ),
    )]);

    let violations = DuplicateDefinitionValidator
        .validate(&payload, &flavor())
        .unwrap();
    let found: Vec<_> = violations["dupes.yaml"].iter().collect();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].path, "nodes.1");
    assert_eq!(found[0].severity, Severity::Error);
    assert_eq!(found[0].message, "submitter_id redefined for c1");
}

#[test]
fn test_duplicate_across_resources_and_node_id_policy() {
    let mut base = graph(vec![DataNode::new("case", "c1")], vec![]);
    base.unique_field = Some(UniqueField::NodeId);
    base.nodes[0].node_id = Some("n1".to_string());

    let mut child = graph(vec![DataNode::new("case", "c2")], vec![]);
    child.unique_field = Some(UniqueField::NodeId);
    child.nodes[0].node_id = Some("n1".to_string());

    // child is loaded first, whatever the file names
    let payload = payload(vec![("z_child.yaml", child), ("a_base.yaml", base)]);
    let violations = DuplicateDefinitionValidator
        .validate(&payload, &flavor())
        .unwrap();

    assert!(!violations.contains_key("z_child.yaml"));
    let found: Vec<_> = violations["a_base.yaml"].iter().collect();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].message, "node_id redefined for n1");
}

#[test]
fn test_undefined_link() {
    let payload = payload(vec![(
        "dangling.yaml",
        graph(
            vec![DataNode::new("case", "a")],
            vec![DataEdge::new("a", "z")],
        ),
    )]);

    let violations = UndefinedLinkValidator.validate(&payload, &flavor()).unwrap();
    let found: Vec<_> = violations["dangling.yaml"].iter().collect();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].path, "edges.0");
    assert_eq!(found[0].message, "node with submitter_id value z not defined");
}

#[test]
fn test_undefined_link_reports_each_endpoint() {
    let payload = payload(vec![(
        "dangling.yaml",
        graph(vec![], vec![DataEdge::new("x", "y")]),
    )]);

    let violations = UndefinedLinkValidator.validate(&payload, &flavor()).unwrap();
    assert_eq!(violations["dangling.yaml"].len(), 2);
}

#[test]
fn test_undefined_link_sees_other_resources() {
    let payload = payload(vec![
        (
            "child.yaml",
            graph(
                vec![DataNode::new("case", "c1")],
                vec![DataEdge::new("c1", "p1")],
            ),
        ),
        ("base.yaml", graph(vec![DataNode::new("project", "p1")], vec![])),
    ]);

    let violations = UndefinedLinkValidator.validate(&payload, &flavor()).unwrap();
    assert!(violations.is_empty());
}

#[test]
fn test_association_not_declared() {
    let payload = payload(vec![(
        "assoc.yaml",
        graph(
            vec![DataNode::new("case", "c1"), DataNode::new("aliquot", "a1")],
            vec![DataEdge::new("c1", "a1")],
        ),
    )]);

    let violations = AssociationValidator.validate(&payload, &flavor()).unwrap();
    let found: Vec<_> = violations["assoc.yaml"].iter().collect();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].severity, Severity::Error);
    assert_eq!(found[0].path, "edges.0");
    assert_eq!(found[0].message, "node type case cannot be linked to aliquot");
}

#[test]
fn test_association_wrong_label_is_warning() {
    let payload = payload(vec![(
        "assoc.yaml",
        graph(
            vec![DataNode::new("case", "c1"), DataNode::new("project", "p1")],
            vec![
                DataEdge::new("c1", "p1").with_label("programs"),
                DataEdge::new("c1", "p1").with_label("projects"),
                DataEdge::new("p1", "c1"),
            ],
        ),
    )]);

    let violations = AssociationValidator.validate(&payload, &flavor()).unwrap();
    let found: Vec<_> = violations["assoc.yaml"].iter().collect();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].severity, Severity::Warning);
    assert_eq!(found[0].path, "edges.0");
    assert_eq!(
        found[0].message,
        "Invalid edge name programs for edge case -> project"
    );
}

#[test]
fn test_association_skips_unresolved_endpoints() {
    let payload = payload(vec![(
        "assoc.yaml",
        graph(
            vec![DataNode::new("case", "c1")],
            vec![DataEdge::new("c1", "missing")],
        ),
    )]);

    let violations = AssociationValidator.validate(&payload, &flavor()).unwrap();
    assert!(violations.is_empty());
}

#[test]
fn test_schema_validator_reports_paths() {
    let flavor = Flavor::new(
        "inline",
        dictionary(),
        SchemaSource::Inline(json!({
            "type": "object",
            "properties": {
                "nodes": {
                    "type": "array",
                    "items": {"type": "object", "required": ["label"]}
                }
            }
        })),
    );
    let payload = payload(vec![
        (
            "bad.yaml",
            graph(
                vec![
                    DataNode::new("case", "c1"),
                    DataNode {
                        submitter_id: Some("c2".to_string()),
                        ..Default::default()
                    },
                ],
                vec![],
            ),
        ),
        ("good.yaml", graph(vec![DataNode::new("case", "c3")], vec![])),
    ]);

    let validator = SchemaValidator::new();
    let violations = validator.validate(&payload, &flavor).unwrap();

    assert!(violations["good.yaml"].is_empty());
    let found: Vec<_> = violations["bad.yaml"].iter().collect();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].path, "nodes.1");
    assert_eq!(found[0].validator, SCHEMA_VALIDATOR);
    assert_eq!(found[0].flavor, "INLINE");

    validator.validate(&payload, &flavor).unwrap();
    assert_eq!(validator.compiled_count(), 1);
}

#[test]
fn test_generated_schema_rejects_unknown_label() {
    let payload = payload(vec![(
        "labels.yaml",
        graph(
            vec![DataNode::new("case", "c1"), DataNode::new("spaceship", "s1")],
            vec![],
        ),
    )]);

    let violations = SchemaValidator::new().validate(&payload, &flavor()).unwrap();
    let found: Vec<_> = violations["labels.yaml"].iter().collect();

    assert!(!found.is_empty());
    assert!(found.iter().all(|violation| violation.path == "nodes.1"));
}

#[test]
fn test_schema_checks_submitted_document_for_missing_keys() {
    let payload: Payload = [Resource::new(
        "missing.json",
        json!({"description": "no nodes or edges"}),
    )]
    .into_iter()
    .collect();

    let violations = SchemaValidator::new().validate(&payload, &flavor()).unwrap();
    let messages: Vec<_> = violations["missing.json"]
        .iter()
        .map(|violation| (violation.path.as_str(), violation.message.as_str()))
        .collect();

    assert!(messages.iter().all(|(path, _)| path.is_empty()));
    assert!(messages.iter().any(|(_, message)| message.contains("\"nodes\"")));
    assert!(messages.iter().any(|(_, message)| message.contains("\"edges\"")));
}

#[test]
fn test_misshapen_resource_gets_schema_errors_and_skips_data_checks() {
    let payload: Payload = [
        Resource::new(
            "odd.json",
            json!({
                "nodes": [{"label": "case", "submitter_id": 1}],
                "edges": [{"src": "a"}],
            }),
        ),
        Resource::new(
            "fine.json",
            json!({"nodes": [], "edges": [{"src": "x", "dst": "y"}]}),
        ),
    ]
    .into_iter()
    .collect();

    let report = ValidatorFactory::with_defaults().validate(&payload, &flavor());
    let odd = only(&report, "odd.json");

    let by = |validator: &str| -> Vec<String> {
        odd.iter()
            .filter(|violation| violation.validator == validator)
            .map(|violation| violation.path.clone())
            .collect()
    };
    assert!(by(SCHEMA_VALIDATOR).contains(&"nodes.0".to_string()));
    assert!(by(SCHEMA_VALIDATOR).contains(&"edges.0".to_string()));
    assert_eq!(by(GRAPH_SHAPE_VALIDATOR), vec![String::new()]);
    assert!(by(UNDEFINED_LINK_VALIDATOR).is_empty());

    // the well-formed resource is still checked
    assert_eq!(
        only(&report, "fine.json")
            .iter()
            .filter(|violation| violation.validator == UNDEFINED_LINK_VALIDATOR)
            .count(),
        2
    );
    assert!(report.diagnostics.is_empty());
    assert!(report.has_errors());
}

#[test]
fn test_selection_names() {
    assert_eq!(
        ValidatorFactory::for_selection(ValidatorSelection::All).names(),
        vec![
            SCHEMA_VALIDATOR,
            DUPLICATE_VALIDATOR,
            UNDEFINED_LINK_VALIDATOR,
            ASSOCIATION_VALIDATOR
        ]
    );
    assert_eq!(
        ValidatorFactory::for_selection(ValidatorSelection::Data).names(),
        vec![
            ASSOCIATION_VALIDATOR,
            UNDEFINED_LINK_VALIDATOR,
            DUPLICATE_VALIDATOR
        ]
    );
    assert_eq!(
        ValidatorFactory::for_selection(ValidatorSelection::Schema).names(),
        vec![SCHEMA_VALIDATOR]
    );

    assert_eq!("data".parse::<ValidatorSelection>(), Ok(ValidatorSelection::Data));
    assert!("everything".parse::<ValidatorSelection>().is_err());
}

struct FailingValidator;

impl Validator for FailingValidator {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn validate(&self, _payload: &Payload, _flavor: &Flavor) -> anyhow::Result<ViolationMap> {
        bail!("dictionary unavailable")
    }
}

#[test]
fn test_failing_validator_becomes_diagnostic() {
    let mut factory = ValidatorFactory::new();
    factory.register(FailingValidator);
    factory.register(UndefinedLinkValidator);

    let payload = payload(vec![(
        "dangling.yaml",
        graph(vec![], vec![DataEdge::new("a", "a")]),
    )]);
    let report = factory.validate(&payload, &flavor());

    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].validator, "failing");
    assert_eq!(report.diagnostics[0].message, "dictionary unavailable");
    // identical violations for both endpoints collapse into one
    assert_eq!(only(&report, "dangling.yaml").len(), 1);
    assert!(report.has_errors());
}

#[test]
fn test_clean_payload_through_all_validators() {
    let payload = payload(vec![(
        "clean.yaml",
        graph(
            vec![
                DataNode::new("program", "prog"),
                DataNode::new("project", "proj"),
            ],
            vec![DataEdge::new("proj", "prog").with_label("programs")],
        ),
    )]);

    let report = ValidatorFactory::with_defaults().validate(&payload, &flavor());

    assert!(report.diagnostics.is_empty());
    assert!(only(&report, "clean.yaml").is_empty());
    assert!(!report.has_errors());
}
