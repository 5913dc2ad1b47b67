//! Ranking core - from a link graph to importance scores.
//!
//! Two independent estimates of the same PageRank distribution:
//! - `SamplingRanker`: random-surfer simulation over the transition model
//! - `IterativeRanker`: power iteration of the PageRank recurrence
//!
//! Both read a shared `LinkGraph` and return a fresh
//! `ProbabilityDistribution`. Nothing here does I/O or keeps state between
//! calls.

mod iterative;
mod sampling;
mod transition;

pub use iterative::{iterate_pagerank, IterationReport, IterativeRanker};
pub use sampling::{sample_pagerank, SamplingRanker};
pub use transition::transition_model;
