//! Monotone piecewise-linear rescaling of raw similarity values.
//!
//! The matching engine sharpens its raw similarities through breakpoint
//! tables before combining them: histogram overlap is boosted in the mid
//! range, and the final score is spread out at the low end and compressed at
//! the high end. The default breakpoints are empirical tunables, not derived
//! constants.

use flexo_core::{FlexoError, Result};

/// A monotone piecewise-linear curve through `(x, y)` breakpoints.
///
/// Inputs outside the breakpoint range clamp to the first/last `y`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScaleCurve {
    points: Vec<(f64, f64)>,
}

impl ScaleCurve {
    /// Build a curve from breakpoints.
    ///
    /// # Errors
    ///
    /// Returns an error unless there are at least two points, the `x` values
    /// strictly increase, and the `y` values never decrease.
    pub fn new(points: Vec<(f64, f64)>) -> Result<Self> {
        if points.len() < 2 {
            return Err(FlexoError::InvalidInput(
                "scale curve needs at least two breakpoints".into(),
            ));
        }
        for w in points.windows(2) {
            if w[1].0 <= w[0].0 {
                return Err(FlexoError::InvalidInput(
                    "scale curve x values must strictly increase".into(),
                ));
            }
            if w[1].1 < w[0].1 {
                return Err(FlexoError::InvalidInput(
                    "scale curve must be monotone non-decreasing".into(),
                ));
            }
        }
        Ok(ScaleCurve { points })
    }

    /// The identity mapping on `[0, 1]`.
    pub fn identity() -> Self {
        ScaleCurve {
            points: vec![(0.0, 0.0), (1.0, 1.0)],
        }
    }

    /// Default curve for histogram similarity: boosts mid-range overlap.
    pub fn histogram_default() -> Self {
        ScaleCurve {
            points: vec![(0.0, 0.0), (0.4, 0.3), (0.6, 0.75), (1.0, 1.0)],
        }
    }

    /// Default curve for the final score: spreads low similarities out and
    /// compresses high ones.
    pub fn final_default() -> Self {
        ScaleCurve {
            points: vec![(0.0, 0.0), (0.25, 0.45), (0.75, 0.9), (1.0, 1.0)],
        }
    }

    /// Evaluate the curve at `x`, clamping outside the breakpoint range.
    pub fn apply(&self, x: f64) -> f64 {
        let first = self.points[0];
        let last = self.points[self.points.len() - 1];
        if x <= first.0 {
            return first.1;
        }
        if x >= last.0 {
            return last.1;
        }
        for w in self.points.windows(2) {
            let (x0, y0) = w[0];
            let (x1, y1) = w[1];
            if x <= x1 {
                return y0 + (y1 - y0) * (x - x0) / (x1 - x0);
            }
        }
        last.1
    }
}
