//! Dense aligning-cost matrices.
//!
//! [`pair_costs`] materializes the weighted sum of vertex penalty and
//! signature distance for every vertex pair of `V₁ × V₂`. [`pdg_costs`]
//! blends each entry with the cost of its neighborhood, solved as a
//! minimum-weight one-to-one matching, and drops entries past the
//! mismatch threshold.

use munkres::{solve_assignment, WeightMatrix};
use nalgebra::DMatrix;
use petgraph::graph::NodeIndex;

use crate::error::AlignError;
use crate::graph::PdGraph;
use crate::result::VertexPair;
use crate::signature::{signature_distance, Signature};
use crate::vertex::{vertex_penalty, MAX_PENALTY};

/// Dense pair-cost map over `V₁ × V₂`, indexed by vertex indices.
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    costs: DMatrix<f64>,
}

impl CostMatrix {
    pub fn nrows(&self) -> usize {
        self.costs.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.costs.ncols()
    }

    pub fn get(&self, u: NodeIndex, v: NodeIndex) -> f64 {
        self.costs[(u.index(), v.index())]
    }

    /// All entries in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (VertexPair, f64)> + '_ {
        (0..self.nrows()).flat_map(move |i| {
            (0..self.ncols()).map(move |j| {
                (
                    (NodeIndex::new(i), NodeIndex::new(j)),
                    self.costs[(i, j)],
                )
            })
        })
    }
}

/// Blended PDG-cost map with entries past the threshold removed.
///
/// The threshold is derived, not configured: `(1 − α) · MAX_PENALTY`.
/// Entries at or above it stem from class-value mismatches that the
/// neighborhood could not rescue.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredCosts {
    costs: DMatrix<f64>,
    threshold: f64,
}

impl FilteredCosts {
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn get(&self, u: NodeIndex, v: NodeIndex) -> Option<f64> {
        let cost = self.costs[(u.index(), v.index())];
        (cost < self.threshold).then_some(cost)
    }

    pub fn contains(&self, u: NodeIndex, v: NodeIndex) -> bool {
        self.get(u, v).is_some()
    }

    /// Surviving entries in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (VertexPair, f64)> + '_ {
        (0..self.costs.nrows()).flat_map(move |i| {
            (0..self.costs.ncols()).filter_map(move |j| {
                let pair = (NodeIndex::new(i), NodeIndex::new(j));
                self.get(pair.0, pair.1).map(|cost| (pair, cost))
            })
        })
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// Builds the pair-cost matrix
/// `(1 − σ) · vertex_penalty + σ · signature_distance`.
pub(crate) fn pair_costs(
    original: &PdGraph,
    suspect: &PdGraph,
    original_signatures: &[Signature],
    suspect_signatures: &[Signature],
    orbit_weights: Option<&[f64]>,
    signature_contribution: f64,
) -> CostMatrix {
    let sigma = signature_contribution;
    let costs = DMatrix::from_fn(original.vertex_count(), suspect.vertex_count(), |i, j| {
        let penalty = vertex_penalty(
            original.vertex(NodeIndex::new(i)),
            suspect.vertex(NodeIndex::new(j)),
        );
        let distance = f64::from(
            signature_distance(
                &original_signatures[i],
                &suspect_signatures[j],
                orbit_weights,
            )
            .get(),
        );
        (1.0 - sigma) * penalty + sigma * distance
    });
    CostMatrix { costs }
}

/// Blends each pair cost with its neighborhood cost,
/// `α · pair + (1 − α) · neighborhood`, and filters the result.
pub(crate) fn pdg_costs(
    original: &PdGraph,
    suspect: &PdGraph,
    pair: &CostMatrix,
    original_contribution: f64,
) -> Result<FilteredCosts, AlignError> {
    let alpha = original_contribution;
    let mut costs = DMatrix::zeros(pair.nrows(), pair.ncols());
    for i in 0..pair.nrows() {
        for j in 0..pair.ncols() {
            let u = NodeIndex::new(i);
            let v = NodeIndex::new(j);
            let neighborhood = neighborhood_cost(original, suspect, u, v, pair)?;
            costs[(i, j)] = alpha * pair.get(u, v) + (1.0 - alpha) * neighborhood;
        }
    }
    Ok(FilteredCosts {
        costs,
        threshold: (1.0 - alpha) * MAX_PENALTY,
    })
}

/// Mean pair cost over the minimum-weight one-to-one matching of `N(u)`
/// with `N(v)` in the undirected views.
///
/// The assignment runs on a square matrix of side `max(|N(u)|, |N(v)|)`
/// padded with zero-cost dummies, so exactly `min(|N(u)|, |N(v)|)` real
/// pairs are matched and the solver dumps the worst excess neighbors on
/// the dummies. With either side empty the term falls back to the raw
/// vertex penalty: an isolated vertex has no neighbors to dilute it.
fn neighborhood_cost(
    original: &PdGraph,
    suspect: &PdGraph,
    u: NodeIndex,
    v: NodeIndex,
    pair: &CostMatrix,
) -> Result<f64, AlignError> {
    let mut u_neighbors: Vec<NodeIndex> = original.neighbors(u).collect();
    let mut v_neighbors: Vec<NodeIndex> = suspect.neighbors(v).collect();
    u_neighbors.sort_unstable();
    v_neighbors.sort_unstable();

    if u_neighbors.is_empty() || v_neighbors.is_empty() {
        return Ok(vertex_penalty(original.vertex(u), suspect.vertex(v)));
    }

    let side = u_neighbors.len().max(v_neighbors.len());
    let mut weights = Vec::with_capacity(side * side);
    for row in 0..side {
        for column in 0..side {
            let weight = if row < u_neighbors.len() && column < v_neighbors.len() {
                pair.get(u_neighbors[row], v_neighbors[column]) as f32
            } else {
                0.0
            };
            weights.push(weight);
        }
    }

    let mut matrix = WeightMatrix::from_row_vec(side, weights);
    let assignment =
        solve_assignment(&mut matrix).map_err(|e| AlignError::Matching(format!("{:?}", e)))?;

    let mut sum = 0.0;
    let mut matched = 0usize;
    for position in assignment {
        if position.row < u_neighbors.len() && position.column < v_neighbors.len() {
            sum += pair.get(u_neighbors[position.row], v_neighbors[position.column]);
            matched += 1;
        }
    }
    debug_assert_eq!(matched, u_neighbors.len().min(v_neighbors.len()));

    Ok(sum / matched as f64)
}
