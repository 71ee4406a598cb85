//! Interaction-class distance table for pharmacophore point comparison.
//!
//! Two pharmacophore points are compared through the distances between their
//! interaction classes: 0.0 means "same kind of interaction", 1.0 means
//! "nothing in common". The table is symmetric, immutable after construction,
//! and safe to share across threads. A built-in default covering the standard
//! pharmacophore classes is available through
//! [`InteractionTable::default_table`].

use std::sync::{Arc, OnceLock};

use flexo_core::{FlexoError, Result, Summarizable};

/// Identifier of an interaction class, an index into an [`InteractionTable`].
pub type InteractionId = u16;

/// Hydrogen-bond donor.
pub const DONOR: InteractionId = 0;
/// Hydrogen-bond acceptor.
pub const ACCEPTOR: InteractionId = 1;
/// Both donor and acceptor (e.g. hydroxyl).
pub const AMPHOTERIC: InteractionId = 2;
/// Aromatic ring system.
pub const AROMATIC: InteractionId = 3;
/// Positively charged or protonatable center.
pub const POSITIVE: InteractionId = 4;
/// Negatively charged or deprotonatable center.
pub const NEGATIVE: InteractionId = 5;
/// Lipophilic / hydrophobic contact point.
pub const LIPOPHILIC: InteractionId = 6;
/// Carries no specific interaction (plain carbon skeleton).
pub const UNSPECIFIC: InteractionId = 7;

/// Number of classes in the default table.
const DEFAULT_CLASSES: usize = 8;

/// Empirical off-diagonal distances of the default table.
/// Pairs not listed default to 1.0 (maximally distant).
const DEFAULT_DISTANCES: &[(InteractionId, InteractionId, f64)] = &[
    (DONOR, ACCEPTOR, 0.65),
    (DONOR, AMPHOTERIC, 0.25),
    (ACCEPTOR, AMPHOTERIC, 0.25),
    (DONOR, AROMATIC, 0.85),
    (ACCEPTOR, AROMATIC, 0.85),
    (AMPHOTERIC, AROMATIC, 0.80),
    (DONOR, POSITIVE, 0.40),
    (ACCEPTOR, NEGATIVE, 0.40),
    (AMPHOTERIC, POSITIVE, 0.55),
    (AMPHOTERIC, NEGATIVE, 0.55),
    (AROMATIC, LIPOPHILIC, 0.45),
    (AROMATIC, POSITIVE, 0.90),
    (LIPOPHILIC, UNSPECIFIC, 0.60),
];

/// Symmetric table of distances in `[0, 1]` between interaction classes.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InteractionTable {
    dim: usize,
    dist: Vec<f64>,
}

impl InteractionTable {
    /// Build a table over `dim` classes from a list of `(a, b, distance)`
    /// entries. The diagonal is fixed at 0.0; pairs not listed default to 1.0.
    ///
    /// # Errors
    ///
    /// Returns an error if `dim` is zero, an id is out of range, a distance
    /// is outside `[0, 1]`, or an entry names the diagonal with a non-zero
    /// distance.
    pub fn from_distances(
        dim: usize,
        entries: &[(InteractionId, InteractionId, f64)],
    ) -> Result<Self> {
        if dim == 0 {
            return Err(FlexoError::InvalidInput(
                "interaction table must cover at least one class".into(),
            ));
        }
        let mut dist = vec![1.0; dim * dim];
        for i in 0..dim {
            dist[i * dim + i] = 0.0;
        }
        for &(a, b, d) in entries {
            let (a, b) = (a as usize, b as usize);
            if a >= dim || b >= dim {
                return Err(FlexoError::InvalidInput(format!(
                    "interaction id {} out of range for table of {} classes",
                    a.max(b),
                    dim
                )));
            }
            if !(0.0..=1.0).contains(&d) {
                return Err(FlexoError::InvalidInput(format!(
                    "interaction distance {d} outside [0, 1]"
                )));
            }
            if a == b && d != 0.0 {
                return Err(FlexoError::InvalidInput(
                    "diagonal interaction distance must be 0".into(),
                ));
            }
            dist[a * dim + b] = d;
            dist[b * dim + a] = d;
        }
        Ok(InteractionTable { dim, dist })
    }

    /// Number of interaction classes the table covers.
    pub fn class_count(&self) -> usize {
        self.dim
    }

    /// Distance between two interaction classes, symmetric, in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns an error if either id is out of range.
    pub fn distance(&self, a: InteractionId, b: InteractionId) -> Result<f64> {
        let (a, b) = (a as usize, b as usize);
        if a >= self.dim || b >= self.dim {
            return Err(FlexoError::InvalidInput(format!(
                "interaction id {} out of range for table of {} classes",
                a.max(b),
                self.dim
            )));
        }
        Ok(self.dist[a * self.dim + b])
    }

    /// The shared default table over the standard pharmacophore classes.
    ///
    /// Built exactly once on first access and immutable afterwards, so it is
    /// safe to hand out to any number of threads.
    pub fn default_table() -> &'static InteractionTable {
        Self::default_shared().as_ref()
    }

    /// A cloneable handle to the shared default table.
    ///
    /// Every handle points at the same allocation; cloning it never copies
    /// the table itself.
    pub fn default_shared() -> &'static Arc<InteractionTable> {
        static DEFAULT: OnceLock<Arc<InteractionTable>> = OnceLock::new();
        DEFAULT.get_or_init(|| {
            Arc::new(
                InteractionTable::from_distances(DEFAULT_CLASSES, DEFAULT_DISTANCES)
                    .expect("built-in interaction table is well-formed"),
            )
        })
    }
}

impl Summarizable for InteractionTable {
    fn summary(&self) -> String {
        format!("interaction table over {} classes", self.dim)
    }
}
