use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Which node attribute identifies a node within a data set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UniqueField {
    NodeId,
    #[default]
    SubmitterId,
}

impl UniqueField {
    pub fn as_str(&self) -> &'static str {
        match self {
            UniqueField::NodeId => "node_id",
            UniqueField::SubmitterId => "submitter_id",
        }
    }
}

impl fmt::Display for UniqueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A submitted entity instance.
///
/// Everything besides the identity fields and the label (`props`, `acl`,
/// system annotations, ...) is kept verbatim in `properties`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitter_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl DataNode {
    pub fn new(label: &str, submitter_id: &str) -> Self {
        Self {
            label: Some(label.to_string()),
            submitter_id: Some(submitter_id.to_string()),
            ..Default::default()
        }
    }

    /// The node's identity under the given policy
    pub fn unique_value(&self, field: UniqueField) -> Option<&str> {
        match field {
            UniqueField::NodeId => self.node_id.as_deref(),
            UniqueField::SubmitterId => self.submitter_id.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataEdge {
    /// Unique id of the source node
    pub src: String,
    /// Unique id of the destination node
    pub dst: String,
    /// Relation name from the dictionary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Free-form friendly name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl DataEdge {
    pub fn new(src: &str, dst: &str) -> Self {
        Self {
            src: src.to_string(),
            dst: dst.to_string(),
            ..Default::default()
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }
}

/// One data graph resource: the content of a single data file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataGraph {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub nodes: Vec<DataNode>,
    #[serde(default)]
    pub edges: Vec<DataEdge>,
    /// Name of the base resource this one builds on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_field: Option<UniqueField>,
    /// Running count of nodes per entity type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<BTreeMap<String, i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mock_all_props: Option<bool>,
}

impl DataGraph {
    /// The identity policy in effect, `submitter_id` unless overridden
    pub fn unique_field(&self) -> UniqueField {
        self.unique_field.unwrap_or_default()
    }

    /// Append `base` after this graph's own content.
    ///
    /// Nodes and edges keep child-then-base order and summary counts are
    /// summed per entity type. `extends` is cleared.
    pub fn absorb(&mut self, base: DataGraph) {
        self.extends = None;
        self.nodes.extend(base.nodes);
        self.edges.extend(base.edges);

        if self.unique_field.is_none() {
            self.unique_field = base.unique_field;
        }
        if self.description.is_none() {
            self.description = base.description;
        }

        match (&mut self.summary, base.summary) {
            (Some(summary), Some(base_summary)) => {
                for (label, count) in base_summary {
                    *summary.entry(label).or_insert(0) += count;
                }
            }
            (None, base_summary) => self.summary = base_summary,
            (Some(_), None) => {}
        }
    }
}
