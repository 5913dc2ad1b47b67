//! PageRank by power iteration.
//!
//! Recurrence, applied to every page `p` of an `n`-page graph:
//!
//! ```text
//! PR'(p) = (1 - d) / n + d * ( Σ PR(q) / out_degree(q)   for q linking to p
//!                            + Σ PR(q) / n               for dangling q )
//! ```
//!
//! Dangling pages spread their rank evenly over the whole graph, so each step
//! conserves total mass. Each step maps one immutable rank snapshot to the
//! next; iteration stops once no page moved by `threshold` or more.

use tracing::{debug, warn};

use crate::error::{RankError, Result};
use crate::types::{
    check_damping, check_graph, check_max_iterations, check_threshold, LinkGraph,
    ProbabilityDistribution, RankingConfig, CONVERGENCE_THRESHOLD, DEFAULT_MAX_ITERATIONS,
};

/// Compute PageRank with the default threshold of 0.001 per page.
pub fn iterate_pagerank(graph: &LinkGraph, damping: f64) -> Result<ProbabilityDistribution> {
    IterativeRanker {
        damping,
        threshold: CONVERGENCE_THRESHOLD,
        max_iterations: DEFAULT_MAX_ITERATIONS,
    }
    .rank(graph)
    .map(|report| report.ranks)
}

/// Outcome of a converged power iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationReport {
    pub ranks: ProbabilityDistribution,
    /// Number of update steps applied.
    pub iterations: usize,
    /// Largest per-page change in the final step.
    pub delta: f64,
}

/// Deterministic power-iteration ranker.
#[derive(Debug, Clone)]
pub struct IterativeRanker {
    damping: f64,
    threshold: f64,
    max_iterations: usize,
}

impl IterativeRanker {
    pub fn new(config: &RankingConfig) -> Self {
        Self {
            damping: config.damping,
            threshold: config.convergence_threshold,
            max_iterations: config.max_iterations,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Iterate from the uniform distribution until convergence.
    pub fn rank(&self, graph: &LinkGraph) -> Result<IterationReport> {
        check_graph(graph)?;
        let n = graph.len();
        self.converge(graph, vec![1.0 / n as f64; n])
    }

    fn converge(&self, graph: &LinkGraph, initial: Vec<f64>) -> Result<IterationReport> {
        check_graph(graph)?;
        check_damping(self.damping)?;
        check_threshold(self.threshold)?;
        check_max_iterations(self.max_iterations)?;

        let mut ranks = initial;
        for iteration in 1..=self.max_iterations {
            let next = step(graph, &ranks, self.damping);
            let delta = max_delta(&ranks, &next);

            if !delta.is_finite() {
                return Err(RankError::Computation(format!(
                    "rank became non-finite at iteration {iteration}"
                )));
            }

            ranks = next;
            if delta < self.threshold {
                debug!(
                    pages = graph.len(),
                    iterations = iteration,
                    delta,
                    "pagerank converged"
                );
                return Ok(IterationReport {
                    ranks: ProbabilityDistribution::from_node_values(graph, &ranks),
                    iterations: iteration,
                    delta,
                });
            }
        }

        warn!(
            max_iterations = self.max_iterations,
            "pagerank did not converge"
        );
        Err(RankError::Computation(format!(
            "no convergence within {} iterations",
            self.max_iterations
        )))
    }
}

/// One application of the PageRank recurrence.
fn step(graph: &LinkGraph, ranks: &[f64], damping: f64) -> Vec<f64> {
    let n = graph.len() as f64;

    let dangling_share: f64 = graph
        .dangling_nodes()
        .into_iter()
        .map(|q| ranks[q.index()] / n)
        .sum();

    graph
        .nodes()
        .map(|p| {
            let incoming: f64 = graph
                .predecessors(p)
                .into_iter()
                .map(|q| ranks[q.index()] / graph.out_degree(q) as f64)
                .sum();
            (1.0 - damping) / n + damping * (incoming + dangling_share)
        })
        .collect()
}

fn max_delta(old: &[f64], new: &[f64]) -> f64 {
    old.iter()
        .zip(new)
        .map(|(a, b)| (a - b).abs())
        .fold(0.0_f64, f64::max)
}
