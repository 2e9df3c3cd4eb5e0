pub mod display;
pub mod graph;
pub mod payload;

// Re-export commonly used types
pub use graph::{DataEdge, DataGraph, DataNode, UniqueField};
pub use payload::{Payload, Resource};
