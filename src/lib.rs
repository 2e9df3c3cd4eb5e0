pub mod config;
pub mod dictionary;
pub mod flavors;
pub mod loader;
pub mod models;
pub mod templating;
pub mod validation;

use std::path::Path;

use flavors::{Flavor, FlavorError, FlavorRegistry};
use loader::{ResourceError, ResourceLoader};
use models::DataGraph;
use validation::{Payload, ValidationReport, ValidatorFactory, ValidatorSelection};

/// Resolve a flavor identifier into its loaded dictionary and schema source
pub fn resolve_dictionary(registry: &FlavorRegistry, flavor: &str) -> Result<Flavor, FlavorError> {
    registry.resolve(flavor)
}

/// Load a single data file, without following `extends`
pub fn load_graph(resource_dir: &Path, file_name: &str) -> Result<DataGraph, ResourceError> {
    ResourceLoader::new(resource_dir).load(file_name)
}

/// Load every file of `file_name`'s extension chain, unmerged, child first
pub fn load_all(resource_dir: &Path, file_name: &str) -> Result<Payload, ResourceError> {
    ResourceLoader::new(resource_dir).load_all(file_name)
}

/// Load `file_name` with its whole extension chain folded into one graph
pub fn merge_graph(resource_dir: &Path, file_name: &str) -> Result<DataGraph, ResourceError> {
    ResourceLoader::new(resource_dir).merge(file_name)
}

pub fn run_validators(
    selection: ValidatorSelection,
    payload: &Payload,
    flavor: &Flavor,
) -> ValidationReport {
    ValidatorFactory::for_selection(selection).validate(payload, flavor)
}
