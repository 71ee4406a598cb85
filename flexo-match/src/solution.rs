//! Candidate node-to-node mappings between two Flexophore graphs.

use flexo_core::{FlexoError, Result};

/// A partial injective mapping from query node indices to base node indices.
///
/// Produced by an external search procedure and consumed read-only by the
/// scorer. Order of the pairs is preserved but has no effect on scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    pairs: Vec<(usize, usize)>,
}

impl Solution {
    /// Create a mapping from `(query_index, base_index)` pairs.
    ///
    /// # Errors
    ///
    /// Returns an error if the mapping is empty or repeats an index on
    /// either side (it must be injective).
    pub fn new(pairs: Vec<(usize, usize)>) -> Result<Self> {
        if pairs.is_empty() {
            return Err(FlexoError::InvalidInput(
                "a mapping must contain at least one pair".into(),
            ));
        }
        for (k, &(q, b)) in pairs.iter().enumerate() {
            for &(q2, b2) in &pairs[..k] {
                if q == q2 {
                    return Err(FlexoError::InvalidInput(format!(
                        "query node {q} is mapped twice"
                    )));
                }
                if b == b2 {
                    return Err(FlexoError::InvalidInput(format!(
                        "base node {b} is mapped twice"
                    )));
                }
            }
        }
        Ok(Solution { pairs })
    }

    /// Number of mapped pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether the mapping is empty (never true for a constructed value).
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The `k`-th mapped pair as `(query_index, base_index)`.
    pub fn pair(&self, k: usize) -> (usize, usize) {
        self.pairs[k]
    }

    /// All mapped pairs in insertion order.
    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    /// The mapped query node indices.
    pub fn query_indices(&self) -> Vec<usize> {
        self.pairs.iter().map(|&(q, _)| q).collect()
    }

    /// The mapped base node indices.
    pub fn base_indices(&self) -> Vec<usize> {
        self.pairs.iter().map(|&(_, b)| b).collect()
    }
}
