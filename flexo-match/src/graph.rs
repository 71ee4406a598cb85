//! The Flexophore descriptor: a complete graph of pharmacophore points with
//! a distance histogram on every pair.
//!
//! [`MolDistHist`] is read-only once built. [`MolDistHistBuilder`] aggregates
//! the inter-point distances of a conformer ensemble into the per-pair
//! histograms.

use flexo_core::{FlexoError, Result, Summarizable};

use crate::node::PharmacophoreNode;

/// Number of bins in every pair histogram.
pub const BINS_HISTOGRAM: usize = 40;

/// Maximum number of nodes a descriptor can hold.
pub const MAX_NODES: usize = 64;

/// Width of one histogram bin in Angstrom.
pub const BIN_WIDTH: f64 = 0.5;

/// Canonical index of the unordered pair `(i, j)` with `i < j` in a graph of
/// `n` nodes: upper-triangle, row-major.
pub fn pair_index(i: usize, j: usize, n: usize) -> usize {
    debug_assert!(i < j && j < n);
    i * n - i * (i + 1) / 2 + (j - i - 1)
}

/// Number of unordered node pairs in a graph of `n` nodes.
pub fn pair_count(n: usize) -> usize {
    n * (n - 1) / 2
}

/// A complete, labeled pharmacophore graph with a fixed-length distance
/// histogram on every node pair.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MolDistHist {
    nodes: Vec<PharmacophoreNode>,
    /// Concatenated pair histograms, `pair_count(n) * BINS_HISTOGRAM` bytes.
    histograms: Vec<u8>,
}

impl MolDistHist {
    /// Assemble a descriptor from nodes and pre-binned pair histograms.
    ///
    /// `histograms` holds one [`BINS_HISTOGRAM`]-byte slice per unordered
    /// pair in canonical [`pair_index`] order.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no nodes, more than [`MAX_NODES`]
    /// nodes, or the histogram buffer has the wrong length.
    pub fn new(nodes: Vec<PharmacophoreNode>, histograms: Vec<u8>) -> Result<Self> {
        if nodes.is_empty() {
            return Err(FlexoError::InvalidInput(
                "descriptor must hold at least one pharmacophore point".into(),
            ));
        }
        if nodes.len() > MAX_NODES {
            return Err(FlexoError::InvalidInput(format!(
                "descriptor holds {} points, maximum is {MAX_NODES}",
                nodes.len()
            )));
        }
        let expected = pair_count(nodes.len()) * BINS_HISTOGRAM;
        if histograms.len() != expected {
            return Err(FlexoError::InvalidInput(format!(
                "histogram buffer holds {} bytes, expected {expected}",
                histograms.len()
            )));
        }
        Ok(MolDistHist { nodes, histograms })
    }

    /// Number of pharmacophore points.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The point at `index`. Panics if out of range.
    pub fn node(&self, index: usize) -> &PharmacophoreNode {
        &self.nodes[index]
    }

    /// All points in index order.
    pub fn nodes(&self) -> &[PharmacophoreNode] {
        &self.nodes
    }

    /// Number of points flagged mandatory.
    pub fn mandatory_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_mandatory()).count()
    }

    /// The distance histogram of the unordered pair `(i, j)`.
    /// Panics if `i == j` or either index is out of range.
    pub fn histogram(&self, i: usize, j: usize) -> &[u8] {
        assert!(i != j, "a point has no distance histogram to itself");
        let n = self.nodes.len();
        assert!(
            i < n && j < n,
            "pair ({i}, {j}) out of range for graph of {n} points"
        );
        let (lo, hi) = if i < j { (i, j) } else { (j, i) };
        let idx = pair_index(lo, hi, n);
        &self.histograms[idx * BINS_HISTOGRAM..(idx + 1) * BINS_HISTOGRAM]
    }

    /// Symmetric `n x n` matrix (row-major) of per-pair center-of-gravity
    /// distance bins, normalized by the largest such value in the graph.
    ///
    /// Entries lie in `[0, 1]`, the diagonal is 0. When every histogram is
    /// empty the matrix is all zeros rather than NaN.
    pub fn relative_distance_matrix(&self) -> Vec<f64> {
        let n = self.nodes.len();
        let mut matrix = vec![0.0; n * n];
        let mut max = 0.0f64;
        for i in 0..n {
            for j in (i + 1)..n {
                let h = self.histogram(i, j);
                let total: u32 = h.iter().map(|&c| c as u32).sum();
                let cog = if total == 0 {
                    0.0
                } else {
                    let weighted: u32 = h
                        .iter()
                        .enumerate()
                        .map(|(bin, &c)| bin as u32 * c as u32)
                        .sum();
                    weighted as f64 / total as f64
                };
                matrix[i * n + j] = cog;
                matrix[j * n + i] = cog;
                max = max.max(cog);
            }
        }
        // Degenerate graph (all mass in bin 0): keep zeros instead of 0/0.
        if max > 0.0 {
            for v in &mut matrix {
                *v /= max;
            }
        }
        matrix
    }
}

impl Summarizable for MolDistHist {
    fn summary(&self) -> String {
        format!(
            "flexophore: {} points, {} pair histograms, {} mandatory",
            self.nodes.len(),
            pair_count(self.nodes.len()),
            self.mandatory_count(),
        )
    }
}

/// Aggregates conformer geometries into a [`MolDistHist`].
///
/// Feed one coordinate set per conformer; every pairwise distance is binned
/// at [`BIN_WIDTH`] resolution and counted into the pair's histogram.
#[derive(Debug, Clone)]
pub struct MolDistHistBuilder {
    nodes: Vec<PharmacophoreNode>,
    histograms: Vec<u8>,
    conformers: usize,
}

impl MolDistHistBuilder {
    /// Start a descriptor over the given points.
    ///
    /// # Errors
    ///
    /// Same node-count limits as [`MolDistHist::new`].
    pub fn new(nodes: Vec<PharmacophoreNode>) -> Result<Self> {
        if nodes.is_empty() {
            return Err(FlexoError::InvalidInput(
                "descriptor must hold at least one pharmacophore point".into(),
            ));
        }
        if nodes.len() > MAX_NODES {
            return Err(FlexoError::InvalidInput(format!(
                "descriptor holds {} points, maximum is {MAX_NODES}",
                nodes.len()
            )));
        }
        let histograms = vec![0; pair_count(nodes.len()) * BINS_HISTOGRAM];
        Ok(MolDistHistBuilder {
            nodes,
            histograms,
            conformers: 0,
        })
    }

    /// Bin the pairwise distances of one conformer, one `[x, y, z]` per point.
    ///
    /// Distances beyond the histogram range land in the last bin; counts
    /// saturate at 255.
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinate count differs from the node count.
    pub fn add_conformer(&mut self, coords: &[[f64; 3]]) -> Result<()> {
        let n = self.nodes.len();
        if coords.len() != n {
            return Err(FlexoError::InvalidInput(format!(
                "conformer has {} coordinates for {n} points",
                coords.len()
            )));
        }
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = coords[i][0] - coords[j][0];
                let dy = coords[i][1] - coords[j][1];
                let dz = coords[i][2] - coords[j][2];
                let dist = (dx * dx + dy * dy + dz * dz).sqrt();
                let bin = ((dist / BIN_WIDTH) as usize).min(BINS_HISTOGRAM - 1);
                let slot = pair_index(i, j, n) * BINS_HISTOGRAM + bin;
                self.histograms[slot] = self.histograms[slot].saturating_add(1);
            }
        }
        self.conformers += 1;
        Ok(())
    }

    /// Number of conformers aggregated so far.
    pub fn conformer_count(&self) -> usize {
        self.conformers
    }

    /// Finish the descriptor.
    pub fn build(self) -> MolDistHist {
        MolDistHist {
            nodes: self.nodes,
            histograms: self.histograms,
        }
    }
}
