//! Errors surfaced by input validation. Once validation passes, the
//! alignment itself is total and produces no in-band errors.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AlignError {
    /// One of the input graphs has no vertices.
    #[error("{side} graph has no vertices")]
    EmptyGraph { side: &'static str },

    /// A contribution parameter lies outside the closed unit interval.
    #[error("{name} contribution {value} is outside [0, 1]")]
    ContributionOutOfRange { name: &'static str, value: f64 },

    /// The signature provider returned the wrong number of vectors.
    #[error("signature provider returned {actual} vectors for the {side} graph, expected {expected}")]
    SignatureCountMismatch {
        side: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Signature vector lengths disagree within one call.
    #[error("signature for vertex {vertex} of the {side} graph has length {actual}, expected {expected}")]
    SignatureLengthMismatch {
        side: &'static str,
        vertex: usize,
        expected: usize,
        actual: usize,
    },

    /// An orbit weight is negative or non-finite.
    #[error("orbit weight {orbit} is invalid: {value}")]
    InvalidOrbitWeight { orbit: usize, value: f64 },

    /// The orbit weight vector does not cover the signature length.
    #[error("orbit weight vector has length {actual}, expected at least {expected}")]
    OrbitWeightCountMismatch { expected: usize, actual: usize },

    /// The assignment solver rejected a neighborhood weight matrix.
    #[error("assignment solver failed: {0}")]
    Matching(String),
}
