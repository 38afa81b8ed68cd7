use pdg_align::{DependenceKind, PdGraph, PdGraphBuilder, VertexType};
use petgraph::graph::NodeIndex;

pub fn ix(i: usize) -> NodeIndex {
    NodeIndex::new(i)
}

/// A path v0 - v1 - ... - vn with one vertex per type given.
pub fn path(types: &[VertexType]) -> PdGraph {
    let mut builder = PdGraphBuilder::new();
    let vertices: Vec<NodeIndex> = types.iter().map(|&t| builder.add_vertex(t)).collect();
    for window in vertices.windows(2) {
        builder.add_edge(window[0], window[1], DependenceKind::Data);
    }
    builder.build()
}

/// A complete graph over one vertex per type given.
pub fn complete(types: &[VertexType]) -> PdGraph {
    let mut builder = PdGraphBuilder::new();
    let vertices: Vec<NodeIndex> = types.iter().map(|&t| builder.add_vertex(t)).collect();
    for (i, &a) in vertices.iter().enumerate() {
        for &b in &vertices[i + 1..] {
            builder.add_edge(a, b, DependenceKind::Data);
        }
    }
    builder.build()
}

pub fn single(vertex_type: VertexType) -> PdGraph {
    let mut builder = PdGraphBuilder::new();
    builder.add_vertex(vertex_type);
    builder.build()
}

/// A chain of basic blocks, each a declaration feeding an assignment
/// guarded by a condition, with control edges linking the blocks. The
/// shape is what a PDG of straight-line code with guards looks like.
pub fn block_chain(blocks: usize) -> PdGraph {
    let mut builder = PdGraphBuilder::new();
    let mut previous_ctrl = None;
    for _ in 0..blocks {
        let decl = builder.add_vertex(VertexType::Decl);
        let assign = builder.add_vertex(VertexType::Assign);
        let ctrl = builder.add_vertex(VertexType::Ctrl);
        builder.add_edge(decl, assign, DependenceKind::Data);
        builder.add_edge(ctrl, assign, DependenceKind::Control);
        if let Some(previous) = previous_ctrl {
            builder.add_edge(previous, ctrl, DependenceKind::Control);
        }
        previous_ctrl = Some(ctrl);
    }
    builder.build()
}
