//! Serializable view of a finished lattice for external renderers.
//!
//! Rendering and file formats live outside the core; this module only hands
//! out the graph with identifiers resolved against the context.

use serde::Serialize;

use crate::context::Context;
use crate::error::Result;
use crate::lattice::{Lattice, NodeId};

#[derive(Debug, Clone, Serialize)]
pub struct LatticeGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub top: NodeId,
    pub bottom: NodeId,
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphNode {
    pub id: NodeId,
    pub extent: Vec<String>,
    pub intent: Vec<String>,
}

/// `upper` covers `lower`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub lower: NodeId,
    pub upper: NodeId,
}

impl LatticeGraph {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn label(names: Vec<&str>) -> Vec<String> {
    names.into_iter().map(String::from).collect()
}

impl Lattice {
    /// The lattice as plain nodes and edges, labelled with the identifiers of `context`.
    pub fn graph(&self, context: &Context) -> LatticeGraph {
        LatticeGraph {
            nodes: self
                .concepts()
                .iter()
                .enumerate()
                .map(|(id, c)| GraphNode {
                    id,
                    extent: label(c.object_names(context)),
                    intent: label(c.attribute_names(context)),
                })
                .collect(),
            edges: self.edge_ids().map(|(lower, upper)| GraphEdge { lower, upper }).collect(),
            top: self.top_id(),
            bottom: self.bottom_id(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_of_scenario() {
        let context = Context::from_pairs(
            ["1", "2", "3"],
            ["a", "b"],
            [("1", "a"), ("1", "b"), ("2", "a"), ("3", "b")],
        )
        .unwrap();
        let lattice = Lattice::from_context(&context).unwrap();
        let graph = lattice.graph(&context);
        assert_eq!(graph.nodes.len(), 4);
        assert_eq!(graph.nodes[graph.top].extent, vec!["1", "2", "3"]);
        assert!(graph.nodes[graph.top].intent.is_empty());
        assert_eq!(graph.nodes[graph.bottom].intent, vec!["a", "b"]);
        assert_eq!(graph.edges.len(), 4);
        assert!(graph.edges.iter().all(|e| e.upper != graph.bottom && e.lower != graph.top));

        let json: serde_json::Value = serde_json::from_str(&graph.to_json().unwrap()).unwrap();
        assert_eq!(json["nodes"].as_array().unwrap().len(), 4);
        assert_eq!(json["edges"][0]["lower"], 0);
        assert_eq!(json["top"], 3);
    }
}
