//! linkrank - PageRank for link graphs, two ways
//!
//! Estimates page importance in a directed link graph with a random-surfer
//! simulation and with power iteration, so the two can be compared side by
//! side.
//!
//! # Architecture
//!
//! ```text
//! Corpus Discovery → LinkGraph → Sampling / Iteration → Rendering
//!        ↓               ↓               ↓                  ↓
//!   ignore + regex    petgraph      rand + power        text / JSON
//!                     DiGraph        iteration
//! ```
//!
//! # Example
//!
//! ```
//! use linkrank::{iterate_pagerank, LinkGraph};
//!
//! let graph = LinkGraph::from_links([("1", vec!["2"]), ("2", vec!["3"]), ("3", vec!["1"])])?;
//! let ranks = iterate_pagerank(&graph, 0.85)?;
//! assert!((ranks.score("1") - 1.0 / 3.0).abs() < 0.001);
//! # Ok::<(), linkrank::RankError>(())
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod ranking;
pub mod rendering;
pub mod types;

// Re-export core types
pub use error::{ConfigError, DiscoveryError, RankError};
pub use types::{
    LinkGraph, ProbabilityDistribution, RankingConfig, CONVERGENCE_THRESHOLD, DEFAULT_DAMPING,
    DEFAULT_SAMPLES,
};

// Re-export rankers
pub use ranking::{
    iterate_pagerank, sample_pagerank, transition_model, IterationReport, IterativeRanker,
    SamplingRanker,
};
