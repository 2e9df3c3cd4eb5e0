//! Display implementations for models

use std::collections::BTreeMap;
use std::fmt;

use super::graph::DataGraph;

impl DataGraph {
    /// Node counts per label, as found in the node list
    pub fn label_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for node in &self.nodes {
            *counts
                .entry(node.label.as_deref().unwrap_or("<unlabeled>"))
                .or_insert(0) += 1;
        }
        counts
    }
}

impl fmt::Display for DataGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DataGraph {{")?;

        if let Some(description) = &self.description {
            writeln!(f, "    description: {description:?},")?;
        }

        writeln!(f, "    unique_field: {},", self.unique_field())?;
        writeln!(f, "    nodes: {} [", self.nodes.len())?;
        for (label, count) in self.label_counts() {
            writeln!(f, "        {label}: {count},")?;
        }
        writeln!(f, "    ],")?;

        writeln!(f, "    edges: {} [", self.edges.len())?;
        for edge in &self.edges {
            match &edge.label {
                Some(label) => writeln!(f, "        {} -[{label}]-> {},", edge.src, edge.dst)?,
                None => writeln!(f, "        {} -> {},", edge.src, edge.dst)?,
            }
        }
        writeln!(f, "    ],")?;

        if let Some(summary) = &self.summary {
            writeln!(f, "    summary: {{")?;
            for (label, count) in summary {
                writeln!(f, "        {label:?}: {count},")?;
            }
            writeln!(f, "    }},")?;
        }

        if let Some(extends) = &self.extends {
            writeln!(f, "    extends: {extends:?},")?;
        }

        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DataEdge, DataNode};

    #[test]
    fn test_label_counts() {
        let graph = DataGraph {
            nodes: vec![
                DataNode::new("case", "c1"),
                DataNode::new("case", "c2"),
                DataNode::default(),
            ],
            ..Default::default()
        };

        let counts = graph.label_counts();
        assert_eq!(counts["case"], 2);
        assert_eq!(counts["<unlabeled>"], 1);
    }

    #[test]
    fn test_display_lists_edges() {
        let graph = DataGraph {
            nodes: vec![DataNode::new("case", "c1")],
            edges: vec![DataEdge::new("c1", "p1").with_label("projects")],
            ..Default::default()
        };

        let rendered = graph.to_string();
        assert!(rendered.contains("unique_field: submitter_id"));
        assert!(rendered.contains("c1 -[projects]-> p1"));
        assert!(rendered.ends_with('}'));
    }
}
