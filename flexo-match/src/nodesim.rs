//! Similarity between pharmacophore points.
//!
//! A point can carry several interaction classes, so point similarity is a
//! product over the "richer" side's classes of the best 1-to-1 class match.
//! Every extra class on the richer side multiplies the score down, which is
//! deliberate: a point that does more than its counterpart is a worse match.

use flexo_core::Result;

use crate::interaction::InteractionTable;
use crate::node::PharmacophoreNode;

/// Point pairs scoring below this are rejected by the hard filter.
pub const DEFAULT_NODE_SIMILARITY_THRESHOLD: f64 = 0.3;

/// Similarity of two pharmacophore points under `table`, in `[0, 1]`.
///
/// Builds the class-by-class similarity matrix `1 - distance`, then takes
/// the product of the per-class maxima over whichever point carries more
/// classes (the query side when the counts are equal). The rule keys on the
/// class counts, not the argument order, so the result does not change when
/// the arguments are swapped.
///
/// # Errors
///
/// Returns an error if a point carries a class id the table does not cover.
pub fn node_similarity(
    query: &PharmacophoreNode,
    base: &PharmacophoreNode,
    table: &InteractionTable,
) -> Result<f64> {
    let q = query.interactions();
    let b = base.interactions();

    let mut score = 1.0;
    if b.len() > q.len() {
        // Every base class takes its best-matching query class.
        for &bid in b {
            let mut best = 0.0f64;
            for &qid in q {
                best = best.max(1.0 - table.distance(qid, bid)?);
            }
            score *= best;
        }
    } else {
        for &qid in q {
            let mut best = 0.0f64;
            for &bid in b {
                best = best.max(1.0 - table.distance(qid, bid)?);
            }
            score *= best;
        }
    }
    Ok(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::{self, InteractionId};

    fn point(ids: &[InteractionId]) -> PharmacophoreNode {
        PharmacophoreNode::new(ids.to_vec(), false, false).unwrap()
    }

    #[test]
    fn self_similarity_is_one() {
        let table = InteractionTable::default_table();
        for ids in [
            vec![interaction::DONOR],
            vec![interaction::DONOR, interaction::ACCEPTOR],
            vec![
                interaction::AROMATIC,
                interaction::LIPOPHILIC,
                interaction::POSITIVE,
            ],
        ] {
            let node = point(&ids);
            assert_eq!(node_similarity(&node, &node, table).unwrap(), 1.0);
        }
    }

    #[test]
    fn result_is_order_independent() {
        let table = InteractionTable::default_table();
        let small = point(&[interaction::DONOR]);
        let rich = point(&[
            interaction::DONOR,
            interaction::AMPHOTERIC,
            interaction::POSITIVE,
        ]);
        let ab = node_similarity(&small, &rich, table).unwrap();
        let ba = node_similarity(&rich, &small, table).unwrap();
        // 1.0 * 0.75 * 0.60 regardless of argument order.
        assert_eq!(ab, ba);
        assert!((ab - 0.45).abs() < 1e-12);
    }

    #[test]
    fn extra_classes_penalize_multiplicatively() {
        let table = InteractionTable::default_table();
        let donor = point(&[interaction::DONOR]);
        let donor_aromatic = point(&[interaction::DONOR, interaction::AROMATIC]);
        // Donor matches exactly (1.0); the extra aromatic class matches the
        // lone donor at 1 - 0.85 = 0.15.
        let sim = node_similarity(&donor, &donor_aromatic, table).unwrap();
        assert!((sim - 0.15).abs() < 1e-12);
    }

    #[test]
    fn unrelated_classes_score_zero() {
        let table = InteractionTable::default_table();
        let positive = point(&[interaction::POSITIVE]);
        let negative = point(&[interaction::NEGATIVE]);
        assert_eq!(node_similarity(&positive, &negative, table).unwrap(), 0.0);
    }

    #[test]
    fn amphoteric_is_close_to_donor() {
        let table = InteractionTable::default_table();
        let donor = point(&[interaction::DONOR]);
        let amphoteric = point(&[interaction::AMPHOTERIC]);
        let sim = node_similarity(&donor, &amphoteric, table).unwrap();
        assert!((sim - 0.75).abs() < 1e-12);
        assert!(sim >= DEFAULT_NODE_SIMILARITY_THRESHOLD);
    }

    #[test]
    fn unknown_class_id_is_an_error() {
        let table = InteractionTable::from_distances(2, &[(0, 1, 0.5)]).unwrap();
        let node = point(&[5]);
        let other = point(&[0]);
        assert!(node_similarity(&node, &other, &table).is_err());
    }
}
