//! Error types raised by step producers

use super::Algorithm;
use thiserror::Error;

/// A fault inside a step producer
///
/// The built-in algorithms never raise these on well-formed input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortError {
    #[error("{algorithm}: index {index} out of range for array of length {len}")]
    IndexOutOfRange {
        algorithm: Algorithm,
        index: usize,
        len: usize,
    },

    #[error("{algorithm}: {detail}")]
    InvariantViolated {
        algorithm: Algorithm,
        detail: String,
    },
}

impl SortError {
    pub fn algorithm(&self) -> Algorithm {
        match self {
            SortError::IndexOutOfRange { algorithm, .. } => *algorithm,
            SortError::InvariantViolated { algorithm, .. } => *algorithm,
        }
    }
}

/// An algorithm name that matched none of the known algorithms
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown algorithm '{input}' (expected one of: Selection Sort, Binary Insertion Sort, Quick Sort, Pancake Sort)")]
pub struct ParseAlgorithmError {
    pub input: String,
}
