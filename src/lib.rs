//! Alignment of program dependence graphs following the seed-and-expand
//! scheme of [GRAAL][1], adapted to clone detection: instead of one
//! greedy alignment, every minimum-cost alignment reachable by the
//! expansion rule is enumerated.
//!
//! The cost of aligning two vertices combines a type penalty
//! ([`vertex_penalty`]) with a normalized signature distance
//! ([`signature_distance`]); the PDG-wide cost additionally folds in the
//! cost of the best one-to-one matching of the two neighborhoods. Seeds
//! are the pairs of minimum blended cost, and each seed grows outward in
//! concentric spheres, branching on cost ties.
//!
//! [1]: https://doi.org/10.1098/rsif.2010.0063 "2010, Kuchaiev et al.,
//!      Topological network alignment uncovers biological function and
//!      phylogeny"

use std::collections::BTreeMap;

use petgraph::graph::NodeIndex;
use tracing::{debug, trace};

pub mod cost;
pub mod error;
pub mod graph;
pub mod result;
pub mod signature;
pub mod sphere;
pub mod vertex;

pub use cost::{CostMatrix, FilteredCosts};
pub use error::AlignError;
pub use graph::{DependenceKind, PdGraph, PdGraphBuilder, PdgEdge, PdgVertex};
pub use result::{Alignment, GraalResult, VertexPair};
pub use signature::{
    signature_distance, DegreeSignatures, Signature, SignatureProvider, UniformSignatures,
};
pub use sphere::sphere;
pub use vertex::{vertex_penalty, VertexSubtype, VertexType, MAX_PENALTY, PENALTY_CONSTANT};

/// Default weight of the signature distance in the pair cost (σ).
pub const DEFAULT_SIGNATURE_CONTRIBUTION: f64 = 0.8;

/// Default weight of the pair cost in the blended PDG cost (α).
pub const DEFAULT_ORIGINAL_CONTRIBUTION: f64 = 0.6;

/// Default limit on recorded alignments per seed. Tied buckets branch
/// multiplicatively; the cap bounds the enumeration without changing
/// which costs are considered minimal.
pub const DEFAULT_ALIGNMENT_CAP: usize = 1024;

/// One bucket of the sphere map: candidate pairs sharing the same
/// original-side vertex and the same aligning cost.
type Bucket = Vec<VertexPair>;

/// The configured alignment engine.
///
/// Pure per invocation: [`GraalAligner::execute`] is a function of the
/// two graphs and the configuration, with no state kept across calls.
#[derive(Debug)]
pub struct GraalAligner<S> {
    provider: S,
    signature_contribution: f64,
    original_contribution: f64,
    alignment_cap: usize,
}

impl<S: SignatureProvider> GraalAligner<S> {
    /// An aligner with the default contributions σ = 0.8 and α = 0.6.
    pub fn new(provider: S) -> GraalAligner<S> {
        GraalAligner {
            provider,
            signature_contribution: DEFAULT_SIGNATURE_CONTRIBUTION,
            original_contribution: DEFAULT_ORIGINAL_CONTRIBUTION,
            alignment_cap: DEFAULT_ALIGNMENT_CAP,
        }
    }

    /// An aligner with explicit contributions, both in `[0, 1]`.
    pub fn with_contributions(
        provider: S,
        signature_contribution: f64,
        original_contribution: f64,
    ) -> Result<GraalAligner<S>, AlignError> {
        if !(0.0..=1.0).contains(&signature_contribution) {
            return Err(AlignError::ContributionOutOfRange {
                name: "signature",
                value: signature_contribution,
            });
        }
        if !(0.0..=1.0).contains(&original_contribution) {
            return Err(AlignError::ContributionOutOfRange {
                name: "original cost",
                value: original_contribution,
            });
        }
        Ok(GraalAligner {
            provider,
            signature_contribution,
            original_contribution,
            alignment_cap: DEFAULT_ALIGNMENT_CAP,
        })
    }

    /// Replaces the per-seed branching cap. A cap of zero is treated
    /// as one: the expansion always keeps at least one alignment.
    pub fn with_alignment_cap(mut self, cap: usize) -> GraalAligner<S> {
        self.alignment_cap = cap.max(1);
        self
    }

    /// Runs the alignment of `suspect` against `original`.
    ///
    /// Inputs are validated before any cost is computed; afterwards the
    /// algorithm is total. The result is deterministic for a
    /// deterministic provider: seeds expand in ascending index order.
    pub fn execute(
        &self,
        original: &PdGraph,
        suspect: &PdGraph,
    ) -> Result<GraalResult, AlignError> {
        if original.vertex_count() == 0 {
            return Err(AlignError::EmptyGraph { side: "original" });
        }
        if suspect.vertex_count() == 0 {
            return Err(AlignError::EmptyGraph { side: "suspect" });
        }

        let original_signatures = self.provider.signatures(original);
        let suspect_signatures = self.provider.signatures(suspect);
        let length = validate_signatures("original", original, &original_signatures, None)?;
        validate_signatures("suspect", suspect, &suspect_signatures, Some(length))?;

        let orbit_weights = self.provider.orbit_weights();
        if let Some(weights) = &orbit_weights {
            validate_orbit_weights(weights, length)?;
        }

        let pair_costs = cost::pair_costs(
            original,
            suspect,
            &original_signatures,
            &suspect_signatures,
            orbit_weights.as_deref(),
            self.signature_contribution,
        );
        let pdg_costs = cost::pdg_costs(original, suspect, &pair_costs, self.original_contribution)?;
        debug!(
            original_vertices = original.vertex_count(),
            suspect_vertices = suspect.vertex_count(),
            surviving_pairs = pdg_costs.len(),
            threshold = pdg_costs.threshold(),
            "aligning costs computed"
        );

        let seeds = find_seeds(&pdg_costs);
        debug!(seeds = seeds.len(), "seeds selected");

        let mut alignments = BTreeMap::new();
        for seed in seeds {
            let grown = self.expand_seed(seed, original, suspect, &pdg_costs);
            debug!(seed = ?seed, alignments = grown.len(), "seed expanded");
            alignments.insert(seed, grown);
        }

        Ok(GraalResult::new(pair_costs, pdg_costs, alignments))
    }

    /// Grows the spheres around one seed level by level, replacing every
    /// partial alignment by all of its minimum-cost extensions, until a
    /// sphere on either side comes up empty.
    fn expand_seed(
        &self,
        seed: VertexPair,
        original: &PdGraph,
        suspect: &PdGraph,
        pdg_costs: &FilteredCosts,
    ) -> Vec<Alignment> {
        let mut alignments: Vec<Alignment> = vec![vec![seed]];
        let mut radius = 1;

        loop {
            let u_sphere = sphere(original, seed.0, radius);
            let v_sphere = sphere(suspect, seed.1, radius);
            trace!(
                radius,
                u_sphere = u_sphere.len(),
                v_sphere = v_sphere.len(),
                "sphere sizes"
            );
            if u_sphere.is_empty() || v_sphere.is_empty() {
                break;
            }

            let sphere_map = map_spheres_and_sort_by_cost(&u_sphere, &v_sphere, pdg_costs);
            let mut extended = Vec::new();
            for alignment in &alignments {
                align_spheres(&sphere_map, alignment, &mut extended, self.alignment_cap);
            }
            alignments = extended;
            radius += 1;
        }

        alignments
    }
}

/// Aligns with the default configuration and no structural signal, so
/// costs are driven by vertex penalties alone.
pub fn align(original: &PdGraph, suspect: &PdGraph) -> Result<GraalResult, AlignError> {
    GraalAligner::new(UniformSignatures).execute(original, suspect)
}

fn validate_signatures(
    side: &'static str,
    graph: &PdGraph,
    signatures: &[Signature],
    expected_length: Option<usize>,
) -> Result<usize, AlignError> {
    if signatures.len() != graph.vertex_count() {
        return Err(AlignError::SignatureCountMismatch {
            side,
            expected: graph.vertex_count(),
            actual: signatures.len(),
        });
    }
    // The graph is non-empty by the time signatures are validated.
    let expected = expected_length.unwrap_or_else(|| signatures[0].len());
    for (vertex, signature) in signatures.iter().enumerate() {
        if signature.len() != expected {
            return Err(AlignError::SignatureLengthMismatch {
                side,
                vertex,
                expected,
                actual: signature.len(),
            });
        }
    }
    Ok(expected)
}

fn validate_orbit_weights(weights: &[f64], length: usize) -> Result<(), AlignError> {
    if weights.len() < length {
        return Err(AlignError::OrbitWeightCountMismatch {
            expected: length,
            actual: weights.len(),
        });
    }
    for (orbit, &value) in weights.iter().enumerate() {
        if !value.is_finite() || value < 0.0 {
            return Err(AlignError::InvalidOrbitWeight { orbit, value });
        }
    }
    Ok(())
}

/// Every pair whose cost equals the minimum of the filtered map. The
/// map iterates row-major, so seeds come out in ascending index order.
fn find_seeds(pdg_costs: &FilteredCosts) -> Vec<VertexPair> {
    let mut minimum = f64::INFINITY;
    let mut seeds = Vec::new();
    for (pair, cost) in pdg_costs.iter() {
        if cost < minimum {
            minimum = cost;
            seeds.clear();
            seeds.push(pair);
        } else if cost == minimum {
            seeds.push(pair);
        }
    }
    seeds
}

/// Crosses the two spheres, keeps the pairs that survived the filter,
/// sorts them ascending by `(cost, u, v)` and groups runs with equal
/// `(u, cost)` into buckets. Bucket order is the expansion order.
fn map_spheres_and_sort_by_cost(
    u_sphere: &[NodeIndex],
    v_sphere: &[NodeIndex],
    pdg_costs: &FilteredCosts,
) -> Vec<Bucket> {
    let mut pairs: Vec<(VertexPair, f64)> = Vec::new();
    for &u in u_sphere {
        for &v in v_sphere {
            if let Some(cost) = pdg_costs.get(u, v) {
                pairs.push(((u, v), cost));
            }
        }
    }
    pairs.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));

    let mut buckets: Vec<Bucket> = Vec::new();
    let mut current_key: Option<(NodeIndex, f64)> = None;
    for ((u, v), cost) in pairs {
        if current_key != Some((u, cost)) {
            buckets.push(Vec::new());
            current_key = Some((u, cost));
        }
        buckets
            .last_mut()
            .expect("bucket pushed for fresh key")
            .push((u, v));
    }
    buckets
}

/// Collects every extension of `current` over the bucket sequence.
fn align_spheres(
    sphere_map: &[Bucket],
    current: &Alignment,
    alignments: &mut Vec<Alignment>,
    cap: usize,
) {
    find_alignments(sphere_map, 0, current.clone(), alignments, cap);
}

/// Depth-first enumeration over buckets. A bucket contributes at most
/// one pair per alignment; ties within a bucket branch, buckets whose
/// candidates are all taken are skipped. Completed alignments are
/// deduplicated by ordered equality.
fn find_alignments(
    sphere_map: &[Bucket],
    depth: usize,
    current: Alignment,
    alignments: &mut Vec<Alignment>,
    cap: usize,
) {
    if alignments.len() >= cap {
        return;
    }
    if depth == sphere_map.len() {
        if !alignments.contains(&current) {
            alignments.push(current);
        }
        return;
    }

    let candidates: Vec<VertexPair> = sphere_map[depth]
        .iter()
        .copied()
        .filter(|&(u, v)| !current.iter().any(|&(a, b)| a == u || b == v))
        .collect();

    if candidates.is_empty() {
        find_alignments(sphere_map, depth + 1, current, alignments, cap);
    } else {
        for pair in candidates {
            let mut extended = current.clone();
            extended.push(pair);
            find_alignments(sphere_map, depth + 1, extended, alignments, cap);
        }
    }
}
