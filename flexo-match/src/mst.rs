//! Minimum spanning trees over dense symmetric weight matrices.
//!
//! The matching engine measures how much of a graph's "span" a mapped node
//! subset captures: the MST weight of the subset's relative-distance
//! submatrix is compared against the MST weight of the full matrix. `NaN`
//! entries mean "edge absent", which is how submatrices mask out unmapped
//! nodes.

use flexo_core::{FlexoError, Result};

/// A minimum spanning forest of a dense weighted graph.
#[derive(Debug, Clone)]
pub struct SpanningTree {
    /// Matrix dimension.
    pub dim: usize,
    /// `dim x dim` row-major matrix holding the tree edges symmetrically;
    /// non-tree entries are `None`. Membership is explicit because weight-0
    /// tree edges are legitimate in normalized relative-distance matrices.
    pub edges: Vec<Option<f64>>,
    /// Sum of the tree edge weights (upper triangle).
    pub total_weight: f64,
}

impl SpanningTree {
    /// Whether the edge `(i, j)` is part of the tree.
    pub fn contains_edge(&self, i: usize, j: usize) -> bool {
        i != j && self.edges[i * self.dim + j].is_some()
    }

    /// Number of edges in the tree.
    pub fn edge_count(&self) -> usize {
        let mut count = 0;
        for i in 0..self.dim {
            for j in (i + 1)..self.dim {
                if self.edges[i * self.dim + j].is_some() {
                    count += 1;
                }
            }
        }
        count
    }
}

/// Prim's algorithm over a dense symmetric matrix.
///
/// `weights` is `dim x dim` row-major; the diagonal is ignored and `NaN`
/// marks an absent edge. Nodes with no finite incident edge are skipped;
/// disconnected components each contribute their own tree (the result is a
/// spanning forest).
///
/// # Errors
///
/// Returns an error if `weights` is not `dim * dim` long.
pub fn minimum_spanning_tree(weights: &[f64], dim: usize) -> Result<SpanningTree> {
    if weights.len() != dim * dim {
        return Err(FlexoError::InvalidInput(format!(
            "weight matrix holds {} entries, expected {}",
            weights.len(),
            dim * dim
        )));
    }

    let edge = |i: usize, j: usize| -> Option<f64> {
        let w = weights[i * dim + j];
        if i != j && w.is_finite() {
            Some(w)
        } else {
            None
        }
    };
    let active: Vec<bool> = (0..dim)
        .map(|i| (0..dim).any(|j| edge(i, j).is_some()))
        .collect();

    let mut edges = vec![None; dim * dim];
    let mut total_weight = 0.0;
    let mut in_tree = vec![false; dim];

    for start in 0..dim {
        if !active[start] || in_tree[start] {
            continue;
        }
        // Grow one component from `start`.
        in_tree[start] = true;
        let mut best_weight = vec![f64::INFINITY; dim];
        let mut best_parent: Vec<Option<usize>> = vec![None; dim];
        for j in 0..dim {
            if let Some(w) = edge(start, j) {
                best_weight[j] = w;
                best_parent[j] = Some(start);
            }
        }
        loop {
            let mut next = None;
            for j in 0..dim {
                if in_tree[j] || !active[j] || best_parent[j].is_none() {
                    continue;
                }
                match next {
                    Some(k) if best_weight[k] <= best_weight[j] => {}
                    _ => next = Some(j),
                }
            }
            let Some(j) = next else {
                break;
            };
            let Some(parent) = best_parent[j] else {
                break;
            };
            edges[j * dim + parent] = Some(best_weight[j]);
            edges[parent * dim + j] = Some(best_weight[j]);
            total_weight += best_weight[j];
            in_tree[j] = true;
            for k in 0..dim {
                if in_tree[k] {
                    continue;
                }
                if let Some(w) = edge(j, k) {
                    if w < best_weight[k] {
                        best_weight[k] = w;
                        best_parent[k] = Some(j);
                    }
                }
            }
        }
    }

    Ok(SpanningTree {
        dim,
        edges,
        total_weight,
    })
}

/// Copy of `weights` where only edges between `indices` survive; every other
/// entry becomes `NaN` (absent).
pub fn subset_weights(weights: &[f64], dim: usize, indices: &[usize]) -> Vec<f64> {
    let mut out = vec![f64::NAN; dim * dim];
    for &i in indices {
        for &j in indices {
            if i != j {
                out[i * dim + j] = weights[i * dim + j];
            }
        }
    }
    out
}

/// Coverage of one tree weight relative to another:
/// `min(a^2, b^2) / max(a^2, b^2)`, in `[0, 1]`.
///
/// Both weights zero (single-node graphs, all-zero matrices) counts as full
/// coverage rather than 0/0.
pub fn coverage_ratio(subset_weight: f64, full_weight: f64) -> f64 {
    let a = subset_weight * subset_weight;
    let b = full_weight * full_weight;
    let max = a.max(b);
    if max <= f64::EPSILON {
        return 1.0;
    }
    a.min(b) / max
}
