use std::collections::HashSet;

use pdg_align::{
    align, vertex_penalty, DependenceKind, PdGraph, PdGraphBuilder, PdgVertex, VertexSubtype,
    VertexType, MAX_PENALTY,
};
use proptest::prelude::*;

const TYPES: [VertexType; 8] = [
    VertexType::Decl,
    VertexType::Assign,
    VertexType::Ctrl,
    VertexType::Call,
    VertexType::Return,
    VertexType::Break,
    VertexType::Continue,
    VertexType::Conn,
];

const SUBTYPES: [VertexSubtype; 8] = [
    VertexSubtype::HasCondition,
    VertexSubtype::HasElseBranch,
    VertexSubtype::HasInit,
    VertexSubtype::HasUpdate,
    VertexSubtype::HasArrayAccess,
    VertexSubtype::HasFieldAccess,
    VertexSubtype::HasLiteral,
    VertexSubtype::HasCompoundTarget,
];

fn vertex_strategy() -> impl Strategy<Value = PdgVertex> {
    (
        prop::sample::select(&TYPES[..]),
        prop::collection::btree_set(prop::sample::select(&SUBTYPES[..]), 0..4),
    )
        .prop_map(|(vertex_type, subtypes)| PdgVertex::with_subtypes(vertex_type, subtypes))
}

fn graph_strategy() -> impl Strategy<Value = PdGraph> {
    (1usize..5).prop_flat_map(|n| {
        (
            prop::collection::vec(vertex_strategy(), n),
            prop::collection::vec((0..n, 0..n), 0..8),
        )
            .prop_map(|(vertices, edges)| {
                let mut builder = PdGraphBuilder::new();
                let indices: Vec<_> = vertices
                    .into_iter()
                    .map(|v| {
                        builder.add_vertex_with_subtypes(
                            v.vertex_type(),
                            v.subtypes().iter().copied(),
                        )
                    })
                    .collect();
                for (a, b) in edges {
                    builder.add_edge(indices[a], indices[b], DependenceKind::Data);
                }
                builder.build()
            })
    })
}

proptest! {
    #[test]
    fn penalty_is_symmetric(v1 in vertex_strategy(), v2 in vertex_strategy()) {
        prop_assert_eq!(vertex_penalty(&v1, &v2), vertex_penalty(&v2, &v1));
    }

    #[test]
    fn penalty_of_a_vertex_with_itself_is_zero(v in vertex_strategy()) {
        prop_assert_eq!(0.0, vertex_penalty(&v, &v));
    }

    #[test]
    fn class_mismatch_dominates(v1 in vertex_strategy(), v2 in vertex_strategy()) {
        prop_assume!(v1.vertex_type().class_value() != v2.vertex_type().class_value());
        prop_assert!(vertex_penalty(&v1, &v2) >= MAX_PENALTY);
    }

    #[test]
    fn alignments_are_injective_and_seed_first(
        original in graph_strategy(),
        suspect in graph_strategy(),
    ) {
        let result = align(&original, &suspect).unwrap();
        for (seed, alignments) in result.alignments() {
            for alignment in alignments {
                prop_assert_eq!(*seed, alignment[0]);
                let mut left = HashSet::new();
                let mut right = HashSet::new();
                for &(u, v) in alignment {
                    prop_assert!(left.insert(u));
                    prop_assert!(right.insert(v));
                }
            }
        }
    }

    #[test]
    fn seeds_attain_the_filtered_minimum(
        original in graph_strategy(),
        suspect in graph_strategy(),
    ) {
        let result = align(&original, &suspect).unwrap();
        let minimum = result
            .pdg_costs()
            .iter()
            .map(|(_, cost)| cost)
            .fold(f64::INFINITY, f64::min);
        for seed in result.seeds() {
            prop_assert_eq!(Some(minimum), result.pdg_costs().get(seed.0, seed.1));
        }
        prop_assert_eq!(result.is_empty(), result.pdg_costs().is_empty());
    }

    #[test]
    fn execution_is_deterministic(
        original in graph_strategy(),
        suspect in graph_strategy(),
    ) {
        let first = align(&original, &suspect).unwrap();
        let second = align(&original, &suspect).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn costs_are_finite_and_non_negative(
        original in graph_strategy(),
        suspect in graph_strategy(),
    ) {
        let result = align(&original, &suspect).unwrap();
        for (_, cost) in result.pair_costs().iter() {
            prop_assert!(cost.is_finite() && cost >= 0.0);
        }
        for (_, cost) in result.pdg_costs().iter() {
            prop_assert!(cost.is_finite() && cost >= 0.0);
        }
    }
}
