//! The Flexophore matching objective: validation and scoring of candidate
//! node mappings between a query and a base graph.
//!
//! One instance is bound to one `(query, base)` pair at a time and carries
//! all derived caches: per-pair node similarities, per-pair-of-pairs
//! histogram similarities, and each graph's relative-distance MST. Caches
//! invalidate on graph assignment and refill lazily on the next access.
//! Instances are cheap to create, one per worker; they are not meant to be
//! shared across threads.

use std::sync::Arc;

use flexo_core::{FlexoError, Result, Scored, Summarizable};

use crate::graph::{pair_count, pair_index, MolDistHist};
use crate::histogram::{histogram_similarity, DEFAULT_HISTOGRAM_SIMILARITY_THRESHOLD};
use crate::interaction::InteractionTable;
use crate::mst::{coverage_ratio, minimum_spanning_tree, subset_weights};
use crate::nodesim::{node_similarity, DEFAULT_NODE_SIMILARITY_THRESHOLD};
use crate::scale::ScaleCurve;
use crate::solution::Solution;

/// Which of the two assigned graphs a per-graph cache belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Query,
    Base,
}

/// Cached relative-distance matrix and full-graph MST weight of one graph.
#[derive(Debug, Clone)]
struct SpanCache {
    rel: Vec<f64>,
    dim: usize,
    full_weight: f64,
}

/// A validated-and-scored mapping, as returned by
/// [`FlexophoreObjective::score_solution`].
#[derive(Debug, Clone)]
pub struct ScoredSolution {
    /// The mapping that was evaluated.
    pub solution: Solution,
    /// Whether the mapping passed every hard filter.
    pub valid: bool,
    /// The soft score, approximately in `[0, 1]`.
    pub similarity: f64,
}

impl Scored for ScoredSolution {
    fn score(&self) -> f64 {
        self.similarity
    }
}

impl Summarizable for ScoredSolution {
    fn summary(&self) -> String {
        format!(
            "{} pairs, {}, similarity {:.4}",
            self.solution.len(),
            if self.valid { "valid" } else { "invalid" },
            self.similarity,
        )
    }
}

/// Scores candidate mappings between two Flexophore graphs.
#[derive(Debug, Clone)]
pub struct FlexophoreObjective {
    table: Arc<InteractionTable>,
    node_threshold: f64,
    histogram_threshold: f64,
    query_bias: bool,
    node_scale: ScaleCurve,
    histogram_scale: ScaleCurve,
    final_scale: ScaleCurve,
    query: Option<MolDistHist>,
    base: Option<MolDistHist>,
    /// `query_nodes x base_nodes`, empty until first lookup after assignment.
    node_cache: Vec<Option<f64>>,
    /// `query_pairs x base_pairs`, empty until first lookup after assignment.
    hist_cache: Vec<Option<f64>>,
    query_span: Option<SpanCache>,
    base_span: Option<SpanCache>,
}

impl Default for FlexophoreObjective {
    fn default() -> Self {
        Self::new()
    }
}

impl FlexophoreObjective {
    /// An objective over the built-in interaction table with default
    /// thresholds and scale curves.
    pub fn new() -> Self {
        Self::with_table(InteractionTable::default_shared().clone())
    }

    /// An objective over a custom interaction table.
    pub fn with_table(table: Arc<InteractionTable>) -> Self {
        FlexophoreObjective {
            table,
            node_threshold: DEFAULT_NODE_SIMILARITY_THRESHOLD,
            histogram_threshold: DEFAULT_HISTOGRAM_SIMILARITY_THRESHOLD,
            query_bias: false,
            node_scale: ScaleCurve::identity(),
            histogram_scale: ScaleCurve::histogram_default(),
            final_scale: ScaleCurve::final_default(),
            query: None,
            base: None,
            node_cache: Vec::new(),
            hist_cache: Vec::new(),
            query_span: None,
            base_span: None,
        }
    }

    /// Assign the query graph, invalidating every cache.
    pub fn set_query(&mut self, graph: MolDistHist) {
        self.query = Some(graph);
        self.invalidate();
        self.query_span = None;
    }

    /// Assign the base graph, invalidating every cache that involves it.
    pub fn set_base(&mut self, graph: MolDistHist) {
        self.base = Some(graph);
        self.invalidate();
        self.base_span = None;
    }

    /// Enable or disable query-biased scoring, where the query is expected
    /// to be a substructure of the base: coverage of the base is not
    /// demanded and graph size only penalizes a query larger than its base.
    pub fn set_query_bias(&mut self, bias: bool) {
        self.query_bias = bias;
    }

    /// Override the node-similarity hard-filter threshold (default 0.3).
    pub fn set_node_similarity_threshold(&mut self, threshold: f64) {
        self.node_threshold = threshold;
    }

    /// Override the histogram-similarity hard-filter threshold (default 0.75).
    pub fn set_histogram_similarity_threshold(&mut self, threshold: f64) {
        self.histogram_threshold = threshold;
    }

    /// Replace the rescaling curves applied during [`similarity`](Self::similarity).
    pub fn set_scales(&mut self, node: ScaleCurve, histogram: ScaleCurve, final_: ScaleCurve) {
        self.node_scale = node;
        self.histogram_scale = histogram;
        self.final_scale = final_;
    }

    fn invalidate(&mut self) {
        self.node_cache = Vec::new();
        self.hist_cache = Vec::new();
    }

    fn graphs(&self) -> Result<(&MolDistHist, &MolDistHist)> {
        let query = self
            .query
            .as_ref()
            .ok_or_else(|| FlexoError::Config("no query graph assigned".into()))?;
        let base = self
            .base
            .as_ref()
            .ok_or_else(|| FlexoError::Config("no base graph assigned".into()))?;
        Ok((query, base))
    }

    /// Bounds-check every index of a mapping against the assigned graphs.
    fn check_solution(&self, solution: &Solution) -> Result<()> {
        let (query, base) = self.graphs()?;
        for &(q, b) in solution.pairs() {
            if q >= query.node_count() {
                return Err(FlexoError::InvalidInput(format!(
                    "query node {q} out of range for graph of {} points",
                    query.node_count()
                )));
            }
            if b >= base.node_count() {
                return Err(FlexoError::InvalidInput(format!(
                    "base node {b} out of range for graph of {} points",
                    base.node_count()
                )));
            }
        }
        Ok(())
    }

    /// Node-pair similarity through the cache.
    fn node_sim(&mut self, qi: usize, bi: usize) -> Result<f64> {
        let (nq, nb) = {
            let (query, base) = self.graphs()?;
            (query.node_count(), base.node_count())
        };
        if self.node_cache.is_empty() {
            self.node_cache = vec![None; nq * nb];
        }
        let slot = qi * nb + bi;
        if let Some(value) = self.node_cache[slot] {
            return Ok(value);
        }
        let value = {
            let (query, base) = self.graphs()?;
            node_similarity(query.node(qi), base.node(bi), &self.table)?
        };
        self.node_cache[slot] = Some(value);
        Ok(value)
    }

    /// Histogram similarity of query pair `(qa, qb)` against base pair
    /// `(ba, bb)`, through the cache.
    fn hist_sim(&mut self, qa: usize, qb: usize, ba: usize, bb: usize) -> Result<f64> {
        let (nq, nb) = {
            let (query, base) = self.graphs()?;
            (query.node_count(), base.node_count())
        };
        let (pq, pb) = (pair_count(nq), pair_count(nb));
        if self.hist_cache.is_empty() {
            self.hist_cache = vec![None; pq * pb];
        }
        let qslot = pair_index(qa.min(qb), qa.max(qb), nq);
        let bslot = pair_index(ba.min(bb), ba.max(bb), nb);
        let slot = qslot * pb + bslot;
        if let Some(value) = self.hist_cache[slot] {
            return Ok(value);
        }
        let value = {
            let (query, base) = self.graphs()?;
            histogram_similarity(query.histogram(qa, qb), base.histogram(ba, bb))?
        };
        self.hist_cache[slot] = Some(value);
        Ok(value)
    }

    /// MST coverage of the mapped node subset relative to the whole graph.
    fn coverage(&mut self, side: Side, indices: &[usize]) -> Result<f64> {
        let missing = match side {
            Side::Query => self.query_span.is_none(),
            Side::Base => self.base_span.is_none(),
        };
        if missing {
            let graph = match side {
                Side::Query => self.query.as_ref(),
                Side::Base => self.base.as_ref(),
            }
            .ok_or_else(|| FlexoError::Config("no graph assigned".into()))?;
            let dim = graph.node_count();
            let rel = graph.relative_distance_matrix();
            let full_weight = minimum_spanning_tree(&rel, dim)?.total_weight;
            let cache = SpanCache {
                rel,
                dim,
                full_weight,
            };
            match side {
                Side::Query => self.query_span = Some(cache),
                Side::Base => self.base_span = Some(cache),
            }
        }
        let span = match side {
            Side::Query => self.query_span.as_ref(),
            Side::Base => self.base_span.as_ref(),
        }
        .ok_or_else(|| FlexoError::Other("span cache missing after initialization".into()))?;
        let sub = subset_weights(&span.rel, span.dim, indices);
        let subtree = minimum_spanning_tree(&sub, span.dim)?;
        Ok(coverage_ratio(subtree.total_weight, span.full_weight))
    }

    /// Hard-reject filter, short-circuiting in fixed order: mandatory-point
    /// coverage, hetero atoms on both sides, node-similarity threshold for
    /// every mapped pair, histogram-similarity threshold for every pair of
    /// mapped pairs.
    ///
    /// This is a gate, not a score; see [`similarity`](Self::similarity) for
    /// the soft score.
    ///
    /// # Errors
    ///
    /// Fails fast if either graph is unassigned or the mapping indexes
    /// outside the graphs.
    pub fn is_valid_solution(&mut self, solution: &Solution) -> Result<bool> {
        self.check_solution(solution)?;
        let pairs = solution.pairs().to_vec();

        {
            let (query, base) = self.graphs()?;
            let mandatory = query.mandatory_count();
            if mandatory > 0 {
                let mapped = pairs
                    .iter()
                    .filter(|&&(q, _)| query.node(q).is_mandatory())
                    .count();
                if mapped < pairs.len().min(mandatory) {
                    return Ok(false);
                }
            }
            // Mappings touching no hetero atom are chemically meaningless.
            let query_hetero = pairs.iter().any(|&(q, _)| query.node(q).is_hetero());
            let base_hetero = pairs.iter().any(|&(_, b)| base.node(b).is_hetero());
            if !query_hetero || !base_hetero {
                return Ok(false);
            }
        }

        for &(q, b) in &pairs {
            if self.node_sim(q, b)? < self.node_threshold {
                return Ok(false);
            }
        }
        for a in 0..pairs.len() {
            for c in (a + 1)..pairs.len() {
                let (qa, ba) = pairs[a];
                let (qc, bc) = pairs[c];
                if self.hist_sim(qa, qc, ba, bc)? < self.histogram_threshold {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    /// Soft similarity score of a mapping, approximately in `[0, 1]`.
    ///
    /// Mean over all pairs of mapped pairs of the rescaled product
    /// `node_a^2 * node_c^2 * histogram^2`, multiplied by the MST coverage
    /// ratios of both graphs (query only under query bias) and the
    /// node-count ratio penalty, then rescaled through the final curve.
    /// Independent of [`is_valid_solution`](Self::is_valid_solution) and of
    /// the iteration order of the mapping.
    ///
    /// # Errors
    ///
    /// Fails fast if either graph is unassigned or the mapping indexes
    /// outside the graphs.
    pub fn similarity(&mut self, solution: &Solution) -> Result<f64> {
        self.check_solution(solution)?;
        let pairs = solution.pairs().to_vec();

        let mut sum = 0.0;
        let mut combinations = 0u32;
        for a in 0..pairs.len() {
            for c in (a + 1)..pairs.len() {
                let (qa, ba) = pairs[a];
                let (qc, bc) = pairs[c];
                let raw_node_a = self.node_sim(qa, ba)?;
                let raw_node_c = self.node_sim(qc, bc)?;
                let raw_hist = self.hist_sim(qa, qc, ba, bc)?;
                let node_a = self.node_scale.apply(raw_node_a);
                let node_c = self.node_scale.apply(raw_node_c);
                let hist = self.histogram_scale.apply(raw_hist);
                sum += node_a * node_a * node_c * node_c * hist * hist;
                combinations += 1;
            }
        }
        let pair_score = if combinations > 0 {
            sum / combinations as f64
        } else {
            // Single mapped pair: only its node term contributes.
            let (q, b) = pairs[0];
            let raw = self.node_sim(q, b)?;
            let node = self.node_scale.apply(raw);
            node * node
        };

        let coverage_query = self.coverage(Side::Query, &solution.query_indices())?;
        let (nq, nb) = {
            let (query, base) = self.graphs()?;
            (query.node_count() as f64, base.node_count() as f64)
        };
        let (coverage, size_ratio) = if self.query_bias {
            let size_ratio = if nq > nb {
                (nb * nb) / (nq * nq)
            } else {
                1.0
            };
            (coverage_query, size_ratio)
        } else {
            let coverage_base = self.coverage(Side::Base, &solution.base_indices())?;
            let (qq, bb) = (nq * nq, nb * nb);
            (coverage_query * coverage_base, qq.min(bb) / qq.max(bb))
        };

        Ok(self.final_scale.apply(pair_score * coverage * size_ratio))
    }

    /// Validate and score a mapping in one call.
    pub fn score_solution(&mut self, solution: &Solution) -> Result<ScoredSolution> {
        let valid = self.is_valid_solution(solution)?;
        let similarity = self.similarity(solution)?;
        Ok(ScoredSolution {
            solution: solution.clone(),
            valid,
            similarity,
        })
    }

    /// Cached similarity of a query/base node pair, if it has been computed
    /// since the graphs were assigned. Diagnostics accessor.
    pub fn cached_node_similarity(&self, qi: usize, bi: usize) -> Option<f64> {
        let (query, base) = self.graphs().ok()?;
        if self.node_cache.is_empty() || qi >= query.node_count() || bi >= base.node_count() {
            return None;
        }
        self.node_cache[qi * base.node_count() + bi]
    }

    /// Cached histogram similarity of a query node pair against a base node
    /// pair, if it has been computed since the graphs were assigned.
    /// Diagnostics accessor.
    pub fn cached_histogram_similarity(
        &self,
        query_pair: (usize, usize),
        base_pair: (usize, usize),
    ) -> Option<f64> {
        let (query, base) = self.graphs().ok()?;
        let (nq, nb) = (query.node_count(), base.node_count());
        let (qa, qb) = query_pair;
        let (ba, bb) = base_pair;
        if self.hist_cache.is_empty() || qa == qb || ba == bb {
            return None;
        }
        if qa.max(qb) >= nq || ba.max(bb) >= nb {
            return None;
        }
        let qslot = pair_index(qa.min(qb), qa.max(qb), nq);
        let bslot = pair_index(ba.min(bb), ba.max(bb), nb);
        self.hist_cache[qslot * pair_count(nb) + bslot]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::MolDistHistBuilder;
    use crate::interaction::{self, InteractionId};
    use crate::node::PharmacophoreNode;

    /// Build a graph from `(interactions, hetero, mandatory)` node
    /// definitions and one geometry, replicated over 100 conformers.
    fn graph(defs: &[(&[InteractionId], bool, bool)], coords: &[[f64; 3]]) -> MolDistHist {
        let nodes = defs
            .iter()
            .map(|&(ids, hetero, mandatory)| {
                PharmacophoreNode::new(ids.to_vec(), hetero, mandatory).unwrap()
            })
            .collect();
        let mut builder = MolDistHistBuilder::new(nodes).unwrap();
        for _ in 0..100 {
            builder.add_conformer(coords).unwrap();
        }
        builder.build()
    }

    fn triangle_defs() -> Vec<(&'static [InteractionId], bool, bool)> {
        vec![
            (&[interaction::ACCEPTOR], true, false),
            (&[interaction::DONOR], true, false),
            (&[interaction::LIPOPHILIC], false, false),
        ]
    }

    const TRIANGLE: &[[f64; 3]] = &[[0.0, 0.0, 0.0], [4.0, 0.0, 0.0], [0.0, 6.0, 0.0]];

    fn triangle_objective() -> FlexophoreObjective {
        let mut objective = FlexophoreObjective::new();
        objective.set_query(graph(&triangle_defs(), TRIANGLE));
        objective.set_base(graph(&triangle_defs(), TRIANGLE));
        objective
    }

    #[test]
    fn objectives_share_the_default_table() {
        let a = FlexophoreObjective::new();
        let b = FlexophoreObjective::new();
        assert!(Arc::ptr_eq(&a.table, &b.table));
    }

    #[test]
    fn scoring_before_assignment_fails_fast() {
        let mut objective = FlexophoreObjective::new();
        let solution = Solution::new(vec![(0, 0)]).unwrap();
        assert!(matches!(
            objective.similarity(&solution),
            Err(FlexoError::Config(_))
        ));
        assert!(matches!(
            objective.is_valid_solution(&solution),
            Err(FlexoError::Config(_))
        ));

        objective.set_query(graph(&triangle_defs(), TRIANGLE));
        assert!(matches!(
            objective.similarity(&solution),
            Err(FlexoError::Config(_))
        ));
    }

    #[test]
    fn out_of_range_mapping_is_an_error() {
        let mut objective = triangle_objective();
        let solution = Solution::new(vec![(0, 7)]).unwrap();
        assert!(matches!(
            objective.similarity(&solution),
            Err(FlexoError::InvalidInput(_))
        ));
    }

    #[test]
    fn identical_graphs_identity_mapping_scores_one() {
        let mut objective = triangle_objective();
        let identity = Solution::new(vec![(0, 0), (1, 1), (2, 2)]).unwrap();
        assert!(objective.is_valid_solution(&identity).unwrap());
        let sim = objective.similarity(&identity).unwrap();
        assert!((sim - 1.0).abs() < 1e-9, "similarity = {sim}");
    }

    #[test]
    fn similarity_is_invariant_to_pair_order() {
        let mut objective = triangle_objective();
        let forward = Solution::new(vec![(0, 0), (1, 1), (2, 2)]).unwrap();
        let shuffled = Solution::new(vec![(2, 2), (0, 0), (1, 1)]).unwrap();
        let a = objective.similarity(&forward).unwrap();
        let b = objective.similarity(&shuffled).unwrap();
        assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn mismatched_node_pair_is_rejected() {
        // Base node 1 is NEGATIVE; query node 1 is DONOR -> similarity 0.0,
        // below the 0.3 threshold.
        let mut objective = FlexophoreObjective::new();
        objective.set_query(graph(&triangle_defs(), TRIANGLE));
        objective.set_base(graph(
            &[
                (&[interaction::ACCEPTOR], true, false),
                (&[interaction::NEGATIVE], true, false),
                (&[interaction::LIPOPHILIC], false, false),
            ],
            TRIANGLE,
        ));
        let identity = Solution::new(vec![(0, 0), (1, 1), (2, 2)]).unwrap();
        assert!(!objective.is_valid_solution(&identity).unwrap());
    }

    #[test]
    fn disjoint_histograms_are_rejected() {
        // Same pharmacophore, entirely different geometry: every histogram
        // pair overlaps nowhere, similarity 0.0 < 0.75.
        let mut objective = FlexophoreObjective::new();
        objective.set_query(graph(&triangle_defs(), TRIANGLE));
        objective.set_base(graph(
            &triangle_defs(),
            &[[0.0, 0.0, 0.0], [12.0, 0.0, 0.0], [0.0, 15.0, 0.0]],
        ));
        let identity = Solution::new(vec![(0, 0), (1, 1), (2, 2)]).unwrap();
        assert!(!objective.is_valid_solution(&identity).unwrap());
        assert_eq!(
            objective.cached_histogram_similarity((0, 1), (0, 1)),
            Some(0.0)
        );
    }

    #[test]
    fn pure_carbon_mapping_is_rejected() {
        let defs: Vec<(&[InteractionId], bool, bool)> = vec![
            (&[interaction::LIPOPHILIC], false, false),
            (&[interaction::LIPOPHILIC], false, false),
            (&[interaction::ACCEPTOR], true, false),
        ];
        let mut objective = FlexophoreObjective::new();
        objective.set_query(graph(&defs, TRIANGLE));
        objective.set_base(graph(&defs, TRIANGLE));
        // Maps only the two lipophilic points: no hetero atom on either side.
        let solution = Solution::new(vec![(0, 0), (1, 1)]).unwrap();
        assert!(!objective.is_valid_solution(&solution).unwrap());
        // Including the acceptor satisfies the hetero requirement.
        let solution = Solution::new(vec![(0, 0), (1, 1), (2, 2)]).unwrap();
        assert!(objective.is_valid_solution(&solution).unwrap());
    }

    #[test]
    fn unmapped_mandatory_points_are_rejected() {
        // Query: three mandatory points and two plain ones.
        let defs: Vec<(&[InteractionId], bool, bool)> = vec![
            (&[interaction::ACCEPTOR], true, true),
            (&[interaction::DONOR], true, true),
            (&[interaction::AROMATIC], false, true),
            (&[interaction::LIPOPHILIC], false, false),
            (&[interaction::LIPOPHILIC], false, false),
        ];
        let coords = [
            [0.0, 0.0, 0.0],
            [4.0, 0.0, 0.0],
            [0.0, 6.0, 0.0],
            [4.0, 6.0, 0.0],
            [8.0, 3.0, 0.0],
        ];
        let mut objective = FlexophoreObjective::new();
        objective.set_query(graph(&defs, &coords));
        objective.set_base(graph(&defs, &coords));

        // Three pairs mapped but only one of the three mandatory points.
        let partial = Solution::new(vec![(0, 0), (3, 3), (4, 4)]).unwrap();
        assert!(!objective.is_valid_solution(&partial).unwrap());

        // All mandatory points mapped.
        let full = Solution::new(vec![(0, 0), (1, 1), (2, 2)]).unwrap();
        assert!(objective.is_valid_solution(&full).unwrap());
    }

    #[test]
    fn full_mapping_has_full_coverage() {
        let mut objective = triangle_objective();
        let identity = Solution::new(vec![(0, 0), (1, 1), (2, 2)]).unwrap();
        let indices = identity.query_indices();
        assert_eq!(objective.coverage(Side::Query, &indices).unwrap(), 1.0);
        assert_eq!(objective.coverage(Side::Base, &indices).unwrap(), 1.0);
    }

    #[test]
    fn partial_mapping_scores_below_full_mapping() {
        let mut objective = triangle_objective();
        let full = Solution::new(vec![(0, 0), (1, 1), (2, 2)]).unwrap();
        let partial = Solution::new(vec![(0, 0), (1, 1)]).unwrap();
        let full_score = objective.similarity(&full).unwrap();
        let partial_score = objective.similarity(&partial).unwrap();
        assert!(partial_score < full_score);
    }

    #[test]
    fn query_bias_ignores_base_coverage() {
        // Query is the 0-1-2 triangle; base has an extra distant point, so
        // unbiased scoring pays a size and base-coverage penalty.
        let base_defs: Vec<(&[InteractionId], bool, bool)> = vec![
            (&[interaction::ACCEPTOR], true, false),
            (&[interaction::DONOR], true, false),
            (&[interaction::LIPOPHILIC], false, false),
            (&[interaction::AROMATIC], false, false),
        ];
        let base_coords = [
            [0.0, 0.0, 0.0],
            [4.0, 0.0, 0.0],
            [0.0, 6.0, 0.0],
            [10.0, 10.0, 0.0],
        ];
        let mapping = Solution::new(vec![(0, 0), (1, 1), (2, 2)]).unwrap();

        let mut unbiased = FlexophoreObjective::new();
        unbiased.set_query(graph(&triangle_defs(), TRIANGLE));
        unbiased.set_base(graph(&base_defs, &base_coords));
        let unbiased_score = unbiased.similarity(&mapping).unwrap();

        let mut biased = FlexophoreObjective::new();
        biased.set_query(graph(&triangle_defs(), TRIANGLE));
        biased.set_base(graph(&base_defs, &base_coords));
        biased.set_query_bias(true);
        let biased_score = biased.similarity(&mapping).unwrap();

        assert!(biased_score > unbiased_score);
    }

    #[test]
    fn reassignment_invalidates_caches() {
        let mut objective = triangle_objective();
        let identity = Solution::new(vec![(0, 0), (1, 1), (2, 2)]).unwrap();
        objective.similarity(&identity).unwrap();
        assert!(objective.cached_node_similarity(0, 0).is_some());

        objective.set_base(graph(&triangle_defs(), TRIANGLE));
        assert!(objective.cached_node_similarity(0, 0).is_none());
        assert!(objective
            .cached_histogram_similarity((0, 1), (0, 1))
            .is_none());

        // Scoring after reassignment refills the caches.
        objective.similarity(&identity).unwrap();
        assert_eq!(objective.cached_node_similarity(1, 1), Some(1.0));
    }

    #[test]
    fn scale_curves_are_applied_to_raw_similarities() {
        let identity = Solution::new(vec![(0, 0), (1, 1), (2, 2)]).unwrap();
        let single = Solution::new(vec![(0, 0)]).unwrap();

        let mut objective = triangle_objective();
        let default_score = objective.similarity(&identity).unwrap();

        // Halving every node similarity must pull the score down through
        // both the pairwise and the single-pair paths.
        let mut damped = triangle_objective();
        damped.set_scales(
            ScaleCurve::new(vec![(0.0, 0.0), (1.0, 0.5)]).unwrap(),
            ScaleCurve::histogram_default(),
            ScaleCurve::identity(),
        );
        let damped_score = damped.similarity(&identity).unwrap();
        assert!(damped_score < default_score);
        // node terms 0.5^2 * 0.5^2, histogram term 1.0, coverage and size 1.
        assert!((damped_score - 0.0625).abs() < 1e-9);

        let damped_single = damped.similarity(&single).unwrap();
        assert!(damped_single <= 0.25);
    }

    #[test]
    fn score_solution_combines_gate_and_score() {
        let mut objective = triangle_objective();
        let identity = Solution::new(vec![(0, 0), (1, 1), (2, 2)]).unwrap();
        let scored = objective.score_solution(&identity).unwrap();
        assert!(scored.valid);
        assert!((scored.score() - 1.0).abs() < 1e-9);
        assert!(scored.summary().contains("valid"));
    }
}
