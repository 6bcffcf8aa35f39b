//! Traceability views derived from the links embedded in requirements.
//!
//! Nothing here is cached: edges are projected from the catalog at call time,
//! and a [`TraceabilityGraph`] is a snapshot built on demand.

use std::collections::{HashMap, HashSet};

use petgraph::{
    graph::{DiGraph, EdgeReference, NodeIndex},
    visit::EdgeRef,
    Direction,
};
use serde::Serialize;

use crate::domain::{Catalog, LinkType};

/// One row of the traceability matrix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TraceEdge {
    /// Display ID of the requirement that owns the link.
    #[serde(rename = "source")]
    pub source_id: String,
    /// The asserted relationship.
    #[serde(rename = "type")]
    pub link_type: LinkType,
    /// Display ID the link points at. It may not exist.
    #[serde(rename = "target")]
    pub target_id: String,
}

impl TraceEdge {
    /// Creates an edge.
    pub fn new(
        source_id: impl Into<String>,
        link_type: LinkType,
        target_id: impl Into<String>,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            link_type,
            target_id: target_id.into(),
        }
    }
}

/// Projects every link in the catalog as an edge.
///
/// Edges come in catalog order, then in each requirement's link order. There
/// is no deduplication and no check that targets exist.
pub fn edges(catalog: &Catalog) -> impl Iterator<Item = TraceEdge> + '_ {
    catalog.iter().flat_map(|requirement| {
        requirement.links().iter().map(move |link| {
            TraceEdge::new(
                requirement.display_id(),
                link.link_type,
                link.target_id.as_str(),
            )
        })
    })
}

/// A directed graph of requirements and their links.
///
/// Nodes are display IDs, including IDs that are only known as link targets.
/// Parallel edges and self-loops are kept as they appear in the data.
#[derive(Debug, Default)]
pub struct TraceabilityGraph {
    graph: DiGraph<String, LinkType>,
    nodes: HashMap<String, NodeIndex>,
    stored: HashSet<String>,
}

impl TraceabilityGraph {
    /// Builds the graph from the current contents of a catalog.
    #[must_use]
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut graph = Self::default();
        for requirement in catalog.iter() {
            graph.stored.insert(requirement.display_id().to_string());
            graph.node(requirement.display_id());
        }
        for edge in edges(catalog) {
            let source = graph.node(&edge.source_id);
            let target = graph.node(&edge.target_id);
            graph.graph.add_edge(source, target, edge.link_type);
        }
        graph
    }

    fn node(&mut self, display_id: &str) -> NodeIndex {
        if let Some(&index) = self.nodes.get(display_id) {
            return index;
        }
        let index = self.graph.add_node(display_id.to_string());
        self.nodes.insert(display_id.to_string(), index);
        index
    }

    fn edge(&self, edge: EdgeReference<'_, LinkType>) -> TraceEdge {
        TraceEdge::new(
            self.graph[edge.source()].as_str(),
            *edge.weight(),
            self.graph[edge.target()].as_str(),
        )
    }

    fn directed(&self, display_id: &str, direction: Direction) -> Vec<TraceEdge> {
        let Some(&index) = self.nodes.get(display_id) else {
            return Vec::new();
        };
        let mut edges: Vec<_> = self.graph.edges_directed(index, direction).collect();
        edges.sort_by_key(EdgeRef::id);
        edges.into_iter().map(|edge| self.edge(edge)).collect()
    }

    /// Links owned by the given requirement, in link order.
    #[must_use]
    pub fn outgoing(&self, display_id: &str) -> Vec<TraceEdge> {
        self.directed(display_id, Direction::Outgoing)
    }

    /// Links from any requirement that point at the given display ID.
    #[must_use]
    pub fn incoming(&self, display_id: &str) -> Vec<TraceEdge> {
        self.directed(display_id, Direction::Incoming)
    }

    /// Links whose target is not a stored requirement.
    #[must_use]
    pub fn dangling(&self) -> Vec<TraceEdge> {
        self.graph
            .edge_references()
            .filter(|edge| !self.stored.contains(&self.graph[edge.target()]))
            .map(|edge| self.edge(edge))
            .collect()
    }

    /// The total number of links.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
