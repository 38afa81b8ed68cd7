//! Immutable record of one alignment run.

use std::collections::BTreeMap;

use petgraph::graph::NodeIndex;

use crate::cost::{CostMatrix, FilteredCosts};

/// A vertex of the original graph paired with one of the suspect graph.
pub type VertexPair = (NodeIndex, NodeIndex);

/// Ordered list of vertex pairs, seed first, both projections injective.
pub type Alignment = Vec<VertexPair>;

/// Everything one `execute` call produced: both cost maps and every
/// alignment grown from every seed.
#[derive(Debug, Clone, PartialEq)]
pub struct GraalResult {
    pair_costs: CostMatrix,
    pdg_costs: FilteredCosts,
    alignments: BTreeMap<VertexPair, Vec<Alignment>>,
}

impl GraalResult {
    pub(crate) fn new(
        pair_costs: CostMatrix,
        pdg_costs: FilteredCosts,
        alignments: BTreeMap<VertexPair, Vec<Alignment>>,
    ) -> GraalResult {
        GraalResult {
            pair_costs,
            pdg_costs,
            alignments,
        }
    }

    /// The unfiltered pair-cost map over `V₁ × V₂`.
    pub fn pair_costs(&self) -> &CostMatrix {
        &self.pair_costs
    }

    /// The blended and filtered PDG-cost map.
    pub fn pdg_costs(&self) -> &FilteredCosts {
        &self.pdg_costs
    }

    /// Alignments grown from each seed, keyed by the seed pair.
    pub fn alignments(&self) -> &BTreeMap<VertexPair, Vec<Alignment>> {
        &self.alignments
    }

    pub fn seeds(&self) -> impl Iterator<Item = VertexPair> + '_ {
        self.alignments.keys().copied()
    }

    pub fn seed_count(&self) -> usize {
        self.alignments.len()
    }

    /// True when no pair survived the filter, so nothing was aligned.
    pub fn is_empty(&self) -> bool {
        self.alignments.is_empty()
    }
}
