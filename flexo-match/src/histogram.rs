//! Similarity between pair distance histograms.
//!
//! Histograms are compared after a light blur that bleeds a fixed fraction of
//! each bin into its immediate neighbors, so conformer distances falling just
//! either side of a bin boundary still overlap.

use flexo_core::{FlexoError, Result};

use crate::graph::BINS_HISTOGRAM;

/// Normalization constant: the number of conformers a histogram is built from.
pub const NUM_CONFORMATIONS: u32 = 100;

/// Fraction of a bin bled into each neighboring bin before comparison.
/// Empirical; changing it changes every histogram score.
pub const BLUR_FRACTION: f64 = 0.05;

/// Histogram pairs scoring below this are rejected by the hard filter.
pub const DEFAULT_HISTOGRAM_SIMILARITY_THRESHOLD: f64 = 0.75;

/// Blurred copy of a raw histogram: each bin plus the rounded
/// [`BLUR_FRACTION`] share of each immediate neighbor.
fn blur(h: &[u8]) -> [u32; BINS_HISTOGRAM] {
    let bleed = |v: u8| (v as f64 * BLUR_FRACTION + 0.5) as u32;
    let mut out = [0u32; BINS_HISTOGRAM];
    for i in 0..BINS_HISTOGRAM {
        let mut v = h[i] as u32;
        if i > 0 {
            v += bleed(h[i - 1]);
        }
        if i + 1 < BINS_HISTOGRAM {
            v += bleed(h[i + 1]);
        }
        out[i] = v;
    }
    out
}

/// Similarity of two pair distance histograms, in `[0, 1]`.
///
/// Both histograms are blurred, then the overlap `sum(min(q, b))` is
/// normalized by [`NUM_CONFORMATIONS`] and clamped to 1.0 (the blur can push
/// the self-overlap of a dense histogram past the raw count).
///
/// # Errors
///
/// Returns an error if either histogram is not [`BINS_HISTOGRAM`] bins long.
pub fn histogram_similarity(query: &[u8], base: &[u8]) -> Result<f64> {
    if query.len() != BINS_HISTOGRAM || base.len() != BINS_HISTOGRAM {
        return Err(FlexoError::InvalidInput(format!(
            "histograms must be {BINS_HISTOGRAM} bins, got {} and {}",
            query.len(),
            base.len()
        )));
    }
    let q = blur(query);
    let b = blur(base);
    let overlap: u32 = q.iter().zip(b.iter()).map(|(&x, &y)| x.min(y)).sum();
    Ok((overlap as f64 / NUM_CONFORMATIONS as f64).min(1.0))
}
