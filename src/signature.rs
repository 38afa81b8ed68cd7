//! Structural signatures and their normalized distance.
//!
//! Signature vectors come from an external orbit counter behind
//! [`SignatureProvider`]; the engine only relies on the contract that the
//! same undirected graph yields the same vectors. The bundled providers
//! cover the degenerate ends: [`UniformSignatures`] disables the
//! structural term and [`DegreeSignatures`] counts only orbit 0, the
//! vertex degree.

use closed01::Closed01;

use crate::graph::PdGraph;

/// Number of graphlet orbits for graphlets on up to five vertices.
pub const ORBIT_COUNT: usize = 73;

/// Per-vertex orbit counts, dense in `NodeIndex` order.
pub type Signature = Vec<u32>;

/// Source of signature vectors for the vertices of a graph.
///
/// Invoked at most once per graph per alignment run. Vectors must be
/// computed from the undirected-without-loops view and must all share a
/// length within one run.
pub trait SignatureProvider {
    fn signatures(&self, graph: &PdGraph) -> Vec<Signature>;

    /// Per-orbit weights for the distance. `None` weights every orbit 1.
    fn orbit_weights(&self) -> Option<Vec<f64>> {
        None
    }
}

/// Gives every vertex the same signature, so the signature distance is
/// zero everywhere and alignment is driven by vertex penalties alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformSignatures;

impl SignatureProvider for UniformSignatures {
    fn signatures(&self, graph: &PdGraph) -> Vec<Signature> {
        vec![vec![0; ORBIT_COUNT]; graph.vertex_count()]
    }
}

/// Counts only orbit 0: the degree of the vertex in the undirected view.
#[derive(Debug, Clone, Copy, Default)]
pub struct DegreeSignatures;

impl SignatureProvider for DegreeSignatures {
    fn signatures(&self, graph: &PdGraph) -> Vec<Signature> {
        graph
            .vertex_indices()
            .map(|ix| vec![graph.neighbors(ix).count() as u32])
            .collect()
    }
}

/// Normalized distance between two signature vectors of equal length.
///
/// `d = Σᵢ wᵢ·|ln(sᵢ+1) − ln(tᵢ+1)| / Σᵢ wᵢ·ln(max(sᵢ,tᵢ)+2)`
///
/// Symmetric and bounded: each numerator term is strictly below its
/// denominator term. Zero-length vectors are at distance zero.
pub fn signature_distance(s: &[u32], t: &[u32], weights: Option<&[f64]>) -> Closed01<f32> {
    debug_assert_eq!(s.len(), t.len());

    let mut numerator = 0.0f64;
    let mut denominator = 0.0f64;
    for i in 0..s.len() {
        let w = weights.map_or(1.0, |w| w[i]);
        let a = f64::from(s[i]);
        let b = f64::from(t[i]);
        numerator += w * ((a + 1.0).ln() - (b + 1.0).ln()).abs();
        denominator += w * (a.max(b) + 2.0).ln();
    }

    if denominator == 0.0 {
        Closed01::zero()
    } else {
        Closed01::new((numerator / denominator).min(1.0) as f32)
    }
}
