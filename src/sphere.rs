//! Concentric spheres around a vertex.

use petgraph::algo::dijkstra;
use petgraph::graph::NodeIndex;

use crate::graph::PdGraph;

/// Vertices at shortest-path distance exactly `radius` from `center` in
/// the undirected-without-loops view.
///
/// Edges are unweighted, so the distance is the hop count. The center
/// itself and vertices unreachable from it are excluded. The result is
/// sorted by vertex index so downstream iteration is deterministic.
pub fn sphere(graph: &PdGraph, center: NodeIndex, radius: usize) -> Vec<NodeIndex> {
    let distances = dijkstra(graph.undirected(), center, None, |_| 1usize);

    let mut vertices: Vec<NodeIndex> = distances
        .into_iter()
        .filter(|&(vertex, distance)| vertex != center && distance == radius)
        .map(|(vertex, _)| vertex)
        .collect();
    vertices.sort_unstable();
    vertices
}
