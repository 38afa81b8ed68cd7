//! Program dependence graph model.
//!
//! A [`PdGraph`] stores the program as a directed multigraph (self-loops
//! and parallel dependences allowed) together with a derived undirected
//! view without self-loops. Both views share one `NodeIndex` space, and
//! vertex identity is the index; two vertices with equal type and
//! subtypes are still distinct program points.

use std::collections::{BTreeSet, HashSet};

use petgraph::graph::{DiGraph, NodeIndex, UnGraph};

use crate::vertex::{VertexSubtype, VertexType};

/// Kind of dependence recorded on a directed edge.
///
/// The alignment engine treats every edge as untyped weight 1; the kind
/// exists for graph producers and result rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DependenceKind {
    Data,
    Control,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PdgEdge {
    pub kind: DependenceKind,
}

/// A program statement or expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdgVertex {
    vertex_type: VertexType,
    subtypes: BTreeSet<VertexSubtype>,
}

impl PdgVertex {
    pub fn new(vertex_type: VertexType) -> PdgVertex {
        PdgVertex {
            vertex_type,
            subtypes: BTreeSet::new(),
        }
    }

    pub fn with_subtypes(
        vertex_type: VertexType,
        subtypes: impl IntoIterator<Item = VertexSubtype>,
    ) -> PdgVertex {
        PdgVertex {
            vertex_type,
            subtypes: subtypes.into_iter().collect(),
        }
    }

    pub fn vertex_type(&self) -> VertexType {
        self.vertex_type
    }

    pub fn subtypes(&self) -> &BTreeSet<VertexSubtype> {
        &self.subtypes
    }
}

/// Program dependence graph with its two alignment-relevant views.
#[derive(Debug, Clone)]
pub struct PdGraph {
    directed: DiGraph<PdgVertex, PdgEdge>,
    undirected: UnGraph<(), ()>,
}

impl PdGraph {
    pub fn vertex_count(&self) -> usize {
        self.directed.node_count()
    }

    /// The vertex record behind `ix`.
    ///
    /// Panics if `ix` does not belong to this graph, like indexing a
    /// slice out of bounds.
    pub fn vertex(&self, ix: NodeIndex) -> &PdgVertex {
        &self.directed[ix]
    }

    pub fn vertex_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.directed.node_indices()
    }

    /// The original directed multigraph, self-loops included.
    pub fn directed(&self) -> &DiGraph<PdgVertex, PdgEdge> {
        &self.directed
    }

    /// The undirected view without self-loops, with parallel and
    /// antiparallel dependences collapsed to one edge.
    pub fn undirected(&self) -> &UnGraph<(), ()> {
        &self.undirected
    }

    /// Neighbors of `ix` in the undirected view, each reported once.
    pub fn neighbors(&self, ix: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.undirected.neighbors(ix)
    }
}

/// Incremental constructor for [`PdGraph`].
#[derive(Debug, Default)]
pub struct PdGraphBuilder {
    directed: DiGraph<PdgVertex, PdgEdge>,
}

impl PdGraphBuilder {
    pub fn new() -> PdGraphBuilder {
        PdGraphBuilder::default()
    }

    pub fn add_vertex(&mut self, vertex_type: VertexType) -> NodeIndex {
        self.directed.add_node(PdgVertex::new(vertex_type))
    }

    pub fn add_vertex_with_subtypes(
        &mut self,
        vertex_type: VertexType,
        subtypes: impl IntoIterator<Item = VertexSubtype>,
    ) -> NodeIndex {
        self.directed
            .add_node(PdgVertex::with_subtypes(vertex_type, subtypes))
    }

    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex, kind: DependenceKind) {
        self.directed.add_edge(from, to, PdgEdge { kind });
    }

    pub fn build(self) -> PdGraph {
        let mut undirected = UnGraph::with_capacity(self.directed.node_count(), 0);
        for _ in self.directed.node_indices() {
            undirected.add_node(());
        }

        let mut seen: HashSet<(NodeIndex, NodeIndex)> = HashSet::new();
        for edge in self.directed.edge_indices() {
            let (a, b) = self
                .directed
                .edge_endpoints(edge)
                .expect("edge index from iteration");
            if a == b {
                continue;
            }
            let key = if a < b { (a, b) } else { (b, a) };
            if seen.insert(key) {
                undirected.add_edge(key.0, key.1, ());
            }
        }

        PdGraph {
            directed: self.directed,
            undirected,
        }
    }
}
