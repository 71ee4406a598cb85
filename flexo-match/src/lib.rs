//! Flexophore pharmacophore-graph similarity scoring.
//!
//! A Flexophore descriptor is a complete graph over pharmacophore points:
//! every node carries one or more interaction classes, and every node pair
//! carries a histogram of the inter-point distances observed across an
//! ensemble of conformers. This crate scores candidate node-to-node mappings
//! between two such graphs.
//!
//! # Example
//!
//! ```
//! use flexo_match::{
//!     interaction, FlexophoreObjective, MolDistHistBuilder, PharmacophoreNode, Solution,
//! };
//!
//! // Two identical three-point descriptors built from one conformer each.
//! let nodes = vec![
//!     PharmacophoreNode::new(vec![interaction::ACCEPTOR], true, false).unwrap(),
//!     PharmacophoreNode::new(vec![interaction::DONOR], true, false).unwrap(),
//!     PharmacophoreNode::new(vec![interaction::LIPOPHILIC], false, false).unwrap(),
//! ];
//! let coords = [[0.0, 0.0, 0.0], [4.0, 0.0, 0.0], [0.0, 6.0, 0.0]];
//! let mut builder = MolDistHistBuilder::new(nodes.clone()).unwrap();
//! for _ in 0..100 {
//!     builder.add_conformer(&coords).unwrap();
//! }
//! let query = builder.build();
//! let base = query.clone();
//!
//! let mut objective = FlexophoreObjective::new();
//! objective.set_query(query);
//! objective.set_base(base);
//!
//! let identity = Solution::new(vec![(0, 0), (1, 1), (2, 2)]).unwrap();
//! assert!(objective.is_valid_solution(&identity).unwrap());
//! assert!(objective.similarity(&identity).unwrap() > 0.9);
//! ```

pub mod graph;
pub mod histogram;
pub mod interaction;
pub mod mst;
pub mod node;
pub mod nodesim;
pub mod objective;
pub mod scale;
pub mod solution;

pub use graph::{MolDistHist, MolDistHistBuilder, BINS_HISTOGRAM, MAX_NODES};
pub use histogram::{histogram_similarity, DEFAULT_HISTOGRAM_SIMILARITY_THRESHOLD};
pub use interaction::InteractionTable;
pub use mst::{coverage_ratio, minimum_spanning_tree, SpanningTree};
pub use node::PharmacophoreNode;
pub use nodesim::{node_similarity, DEFAULT_NODE_SIMILARITY_THRESHOLD};
pub use objective::{FlexophoreObjective, ScoredSolution};
pub use scale::ScaleCurve;
pub use solution::Solution;
