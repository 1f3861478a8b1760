use petgraph::{graph::NodeIndex, Directed, Direction, Graph};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use super::model::CrossReferenceEdge;

/// Aggregated references from one file to another.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Coupling {
    /// Number of cross-reference edges folded into this one.
    pub references: usize,
    pub symbols: BTreeSet<String>,
}

/// File-level graph: an edge `a -> b` means `a` calls names defined in `b`.
pub type CouplingGraph = Graph<String, Coupling, Directed>;

pub struct CouplingGraphBuilder {
    graph: CouplingGraph,
    node_map: HashMap<String, NodeIndex>,
    edge_map: HashMap<(NodeIndex, NodeIndex), petgraph::graph::EdgeIndex>,
}

impl CouplingGraphBuilder {
    pub fn new() -> Self {
        Self {
            graph: Graph::new(),
            node_map: HashMap::new(),
            edge_map: HashMap::new(),
        }
    }

    pub fn from_edges(edges: &[CrossReferenceEdge]) -> CouplingGraph {
        let mut builder = Self::new();
        for edge in edges {
            builder.add_reference(edge);
        }
        builder.build()
    }

    pub fn add_file(&mut self, path: &str) -> NodeIndex {
        if let Some(&index) = self.node_map.get(path) {
            return index;
        }
        let index = self.graph.add_node(path.to_string());
        self.node_map.insert(path.to_string(), index);
        index
    }

    pub fn add_reference(&mut self, edge: &CrossReferenceEdge) {
        let source = self.add_file(&edge.used_in);
        let target = self.add_file(&edge.defined_in);

        let index = match self.edge_map.get(&(source, target)) {
            Some(&index) => index,
            None => {
                let index = self.graph.add_edge(source, target, Coupling::default());
                self.edge_map.insert((source, target), index);
                index
            }
        };

        if let Some(coupling) = self.graph.edge_weight_mut(index) {
            coupling.references += 1;
            coupling.symbols.insert(edge.symbol.clone());
        }
    }

    pub fn build(self) -> CouplingGraph {
        self.graph
    }
}

impl Default for CouplingGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Files ranked by the number of distinct files referencing them.
pub fn most_referenced(graph: &CouplingGraph, limit: usize) -> Vec<(String, usize)> {
    rank_by_degree(graph, Direction::Incoming, limit)
}

/// Files ranked by the number of distinct files they reference.
pub fn most_dependent(graph: &CouplingGraph, limit: usize) -> Vec<(String, usize)> {
    rank_by_degree(graph, Direction::Outgoing, limit)
}

fn rank_by_degree(graph: &CouplingGraph, direction: Direction, limit: usize) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize)> = graph
        .node_indices()
        .map(|idx| {
            let degree = graph.edges_directed(idx, direction).count();
            (graph[idx].clone(), degree)
        })
        .filter(|(_, degree)| *degree > 0)
        .collect();

    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit);
    ranked
}
