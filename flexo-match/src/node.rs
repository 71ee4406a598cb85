//! Pharmacophore points: the nodes of a Flexophore graph.

use flexo_core::{FlexoError, Result};

use crate::interaction::InteractionId;

/// Maximum number of interaction classes a single point can carry.
pub const MAX_INTERACTIONS_PER_NODE: usize = 10;

/// A pharmacophore point: one or more atoms sharing a 3D position and an
/// interaction role.
///
/// A point can carry several interaction classes at once (a hydroxyl oxygen
/// is both donor and acceptor). Immutable after construction; owned by its
/// parent [`MolDistHist`](crate::graph::MolDistHist).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PharmacophoreNode {
    interactions: Vec<InteractionId>,
    hetero: bool,
    mandatory: bool,
}

impl PharmacophoreNode {
    /// Create a point carrying the given interaction classes.
    ///
    /// `hetero` marks points derived from hetero atoms (N, O, S, ...);
    /// `mandatory` marks points a valid mapping is required to cover.
    ///
    /// # Errors
    ///
    /// Returns an error if `interactions` is empty or holds more than
    /// [`MAX_INTERACTIONS_PER_NODE`] entries. A point with no interaction
    /// class has no similarity semantics and is rejected outright.
    pub fn new(interactions: Vec<InteractionId>, hetero: bool, mandatory: bool) -> Result<Self> {
        if interactions.is_empty() {
            return Err(FlexoError::InvalidInput(
                "pharmacophore point must carry at least one interaction class".into(),
            ));
        }
        if interactions.len() > MAX_INTERACTIONS_PER_NODE {
            return Err(FlexoError::InvalidInput(format!(
                "pharmacophore point carries {} interaction classes, maximum is {}",
                interactions.len(),
                MAX_INTERACTIONS_PER_NODE
            )));
        }
        Ok(PharmacophoreNode {
            interactions,
            hetero,
            mandatory,
        })
    }

    /// The interaction classes of this point.
    pub fn interactions(&self) -> &[InteractionId] {
        &self.interactions
    }

    /// Number of interaction classes.
    pub fn interaction_count(&self) -> usize {
        self.interactions.len()
    }

    /// Whether the point is derived from a hetero atom.
    pub fn is_hetero(&self) -> bool {
        self.hetero
    }

    /// Whether a valid mapping is required to cover this point.
    pub fn is_mandatory(&self) -> bool {
        self.mandatory
    }
}
