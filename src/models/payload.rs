use serde_json::Value;
use tracing::debug;

use super::graph::DataGraph;

/// One loaded data file.
///
/// `document` is the file content as submitted. `graph` is its typed view,
/// which is an error when the content does not have the shape of a data
/// graph.
#[derive(Debug)]
pub struct Resource {
    pub name: String,
    pub document: Value,
    pub graph: Result<DataGraph, serde_json::Error>,
}

impl Resource {
    pub fn new(name: impl Into<String>, document: Value) -> Self {
        let name = name.into();
        let graph = serde_json::from_value(document.clone());
        if let Err(error) = &graph {
            debug!("{name} has no typed graph view: {error}");
        }
        Self {
            name,
            document,
            graph,
        }
    }

    /// The `extends` value of the submitted document, when it is a string
    pub fn extends(&self) -> Option<&str> {
        self.document.get("extends").and_then(Value::as_str)
    }
}

/// The resources of one validation run, in the order they were loaded
#[derive(Debug, Default)]
pub struct Payload {
    resources: Vec<Resource>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, resource: Resource) {
        self.resources.push(resource);
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Resource> {
        self.resources.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Resource> {
        self.resources.iter().find(|resource| resource.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.resources.iter().map(|resource| resource.name.as_str()).collect()
    }

    /// Typed graphs in load order; resources without one are skipped
    pub fn graphs(&self) -> impl Iterator<Item = (&str, &DataGraph)> {
        self.resources.iter().filter_map(|resource| {
            resource
                .graph
                .as_ref()
                .ok()
                .map(|graph| (resource.name.as_str(), graph))
        })
    }
}

impl FromIterator<Resource> for Payload {
    fn from_iter<T: IntoIterator<Item = Resource>>(iter: T) -> Self {
        Self {
            resources: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Payload {
    type Item = &'a Resource;
    type IntoIter = std::slice::Iter<'a, Resource>;

    fn into_iter(self) -> Self::IntoIter {
        self.resources.iter()
    }
}
