use std::path::{Path, PathBuf};

use psqlgml::dictionary::LocalSource;
use psqlgml::flavors::{Flavor, FlavorRegistry};
use psqlgml::validation::{
    ASSOCIATION_VALIDATOR, DUPLICATE_VALIDATOR, SCHEMA_VALIDATOR, SchemaSource, Severity,
    UNDEFINED_LINK_VALIDATOR, ValidatorFactory, ValidatorSelection,
};
use psqlgml::loader::{ResourceError, ResourceLoader};

fn data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data")
}

fn graphs_dir() -> PathBuf {
    data_dir().join("graphs")
}

fn flavor() -> Flavor {
    let mut registry = FlavorRegistry::new();
    registry.register(
        "TEST",
        LocalSource::in_home(&data_dir(), "dictionary", "0.1.0"),
        SchemaSource::Generated,
    );
    psqlgml::resolve_dictionary(&registry, "test").unwrap()
}

#[test]
fn merge_folds_extension_chain() {
    let merged = psqlgml::merge_graph(&graphs_dir(), "simple_valid.json").unwrap();

    assert_eq!(merged.nodes.len(), 4);
    assert_eq!(merged.edges.len(), 3);
    assert_eq!(merged.nodes[0].submitter_id.as_deref(), Some("case-1"));
    assert_eq!(merged.nodes[3].submitter_id.as_deref(), Some("GDC-MISC"));
    assert!(merged.extends.is_none());

    let summary = merged.summary.unwrap();
    assert_eq!(summary["case"], 2);
    assert_eq!(summary["project"], 2);
    assert_eq!(summary["program"], 1);
}

#[test]
fn load_graph_reads_one_file_only() {
    let graph = psqlgml::load_graph(&graphs_dir(), "simple_valid.json").unwrap();

    assert_eq!(graph.extends.as_deref(), Some("simple_valid.yaml"));
    assert_eq!(graph.nodes.len(), 2);
    assert_eq!(graph.nodes[0].submitter_id.as_deref(), Some("case-1"));
}

#[test]
fn load_all_lists_chain_child_first() {
    let payload = psqlgml::load_all(&graphs_dir(), "simple_valid.json").unwrap();

    assert_eq!(payload.names(), vec!["simple_valid.json", "simple_valid.yaml"]);
    assert!(payload.iter().all(|resource| resource.graph.is_ok()));
}

#[test]
fn misshapen_file_is_reported_not_rejected() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("odd.json"),
        r#"{"nodes": [{"label": "case", "submitter_id": 1}], "edges": [{"src": "a"}]}"#,
    )
    .unwrap();

    assert!(matches!(
        psqlgml::load_graph(temp_dir.path(), "odd.json"),
        Err(ResourceError::Shape { .. })
    ));

    let payload = psqlgml::load_all(temp_dir.path(), "odd.json").unwrap();
    let report = psqlgml::run_validators(ValidatorSelection::Schema, &payload, &flavor());
    let paths: Vec<_> = report
        .iter()
        .filter(|violation| violation.validator == SCHEMA_VALIDATOR)
        .map(|violation| violation.path.as_str())
        .collect();

    assert!(paths.contains(&"nodes.0"));
    assert!(paths.contains(&"edges.0"));
    assert!(report.has_errors());
}

#[test]
fn missing_nodes_and_edges_are_schema_errors() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("empty.yaml"),
        "description: no nodes or edges\n",
    )
    .unwrap();

    let payload = psqlgml::load_all(temp_dir.path(), "empty.yaml").unwrap();
    let report = psqlgml::run_validators(ValidatorSelection::All, &payload, &flavor());
    let messages: Vec<_> = report.iter().map(|violation| violation.message.clone()).collect();

    assert!(messages.iter().any(|message| message.contains("\"nodes\"")));
    assert!(messages.iter().any(|message| message.contains("\"edges\"")));
    assert!(report.has_errors());
}

#[test]
fn valid_chain_passes_every_validator() {
    let flavor = flavor();
    let payload = psqlgml::load_all(&graphs_dir(), "simple_valid.json").unwrap();
    assert_eq!(payload.len(), 2);

    let report = psqlgml::run_validators(ValidatorSelection::All, &payload, &flavor);

    assert!(report.diagnostics.is_empty(), "{:?}", report.diagnostics);
    assert_eq!(report.iter().count(), 0, "{:?}", report.violations);
    // the schema validator records every resource, clean or not
    assert!(report.violations_for("simple_valid.json").is_some());
    assert!(report.violations_for("simple_valid.yaml").is_some());
}

#[test]
fn mislabelled_edge_is_only_a_warning() {
    let flavor = flavor();
    let payload = psqlgml::load_all(&graphs_dir(), "warning.yaml").unwrap();

    let report = psqlgml::run_validators(ValidatorSelection::Data, &payload, &flavor);
    let found: Vec<_> = report.iter().collect();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].severity, Severity::Warning);
    assert_eq!(found[0].validator, ASSOCIATION_VALIDATOR);
    assert_eq!(
        found[0].message,
        "Invalid edge name cases for edge case -> project"
    );
    assert!(!report.has_errors());
}

#[test]
fn invalid_file_trips_every_check() {
    let flavor = flavor();
    let payload = psqlgml::load_all(&graphs_dir(), "invalid.yaml").unwrap();

    let report = psqlgml::run_validators(ValidatorSelection::All, &payload, &flavor);
    let violations = report.violations_for("invalid.yaml").unwrap();

    let by = |validator: &str| {
        violations
            .iter()
            .filter(|violation| violation.validator == validator)
            .map(|violation| (violation.path.clone(), violation.message.clone()))
            .collect::<Vec<_>>()
    };
    let pair = |path: &str, message: &str| vec![(path.to_string(), message.to_string())];

    assert!(by(SCHEMA_VALIDATOR).iter().any(|(path, _)| path == "nodes.0"));
    assert_eq!(
        by(DUPLICATE_VALIDATOR),
        pair("nodes.1", "submitter_id redefined for case-1")
    );
    assert_eq!(
        by(ASSOCIATION_VALIDATOR),
        pair("edges.0", "node type case cannot be linked to program")
    );
    assert_eq!(
        by(UNDEFINED_LINK_VALIDATOR),
        pair("edges.1", "node with submitter_id value nowhere not defined")
    );
    assert!(report.has_errors());
}

#[test]
fn schema_selection_runs_schema_checks_only() {
    let flavor = flavor();
    let payload = psqlgml::load_all(&graphs_dir(), "invalid.yaml").unwrap();

    let report = psqlgml::run_validators(ValidatorSelection::Schema, &payload, &flavor);
    assert!(report.error_count() > 0);
    assert!(report.iter().all(|violation| violation.validator == SCHEMA_VALIDATOR));
}

#[test]
fn factory_validates_resource_from_loader() {
    let flavor = flavor();
    let loader = ResourceLoader::new(graphs_dir());

    let report = ValidatorFactory::with_defaults()
        .validate_resource(&loader, "simple_valid.json", &flavor)
        .unwrap();
    assert!(!report.has_errors());

    let error = ValidatorFactory::with_defaults()
        .validate_resource(&loader, "simple_valid.toml", &flavor)
        .unwrap_err();
    assert!(matches!(error, ResourceError::UnsupportedFormat { .. }));
}

#[test]
fn missing_base_fails_the_load() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("orphan.yaml"),
        "extends: gone.yaml\nnodes: []\nedges: []\n",
    )
    .unwrap();

    assert!(psqlgml::load_all(temp_dir.path(), "orphan.yaml").is_err());
}
