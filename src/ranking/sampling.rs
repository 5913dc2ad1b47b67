//! PageRank estimation by simulating a random surfer.
//!
//! The surfer starts on a uniformly random page and takes `samples - 1`
//! steps through the transition model. Each page's estimate is the share of
//! visits it received, so the result always sums to 1 and approaches the
//! stationary distribution as the walk gets longer.
//!
//! The random source is a parameter. Pass a seeded `StdRng` for repeatable
//! estimates.

use petgraph::graph::NodeIndex;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::transition::transition_weights;
use crate::error::{RankError, Result};
use crate::types::{
    check_damping, check_graph, check_samples, LinkGraph, ProbabilityDistribution, RankingConfig,
};

/// Estimate PageRank from `samples` random-surfer visits.
pub fn sample_pagerank<R: Rng + ?Sized>(
    graph: &LinkGraph,
    damping: f64,
    samples: usize,
    rng: &mut R,
) -> Result<ProbabilityDistribution> {
    SamplingRanker {
        damping,
        samples,
        seed: None,
    }
    .rank_with(graph, rng)
}

/// Random-surfer ranker.
#[derive(Debug, Clone)]
pub struct SamplingRanker {
    damping: f64,
    samples: usize,
    seed: Option<u64>,
}

impl SamplingRanker {
    pub fn new(config: &RankingConfig) -> Self {
        Self {
            damping: config.damping,
            samples: config.samples,
            seed: config.seed,
        }
    }

    /// Fix the random source so repeated runs agree.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Rank with the configured seed, or OS entropy when none is set.
    pub fn rank(&self, graph: &LinkGraph) -> Result<ProbabilityDistribution> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.rank_with(graph, &mut rng)
    }

    /// Rank drawing from the caller's random source.
    pub fn rank_with<R: Rng + ?Sized>(
        &self,
        graph: &LinkGraph,
        rng: &mut R,
    ) -> Result<ProbabilityDistribution> {
        check_graph(graph)?;
        check_damping(self.damping)?;
        check_samples(self.samples)?;

        debug!(
            pages = graph.len(),
            samples = self.samples,
            damping = self.damping,
            "sampling pagerank"
        );

        let mut counts = vec![0usize; graph.len()];
        let mut steps: Vec<Option<Step>> = vec![None; graph.len()];

        let mut current = NodeIndex::new(rng.gen_range(0..graph.len()));
        counts[current.index()] += 1;

        for _ in 1..self.samples {
            let step = match &mut steps[current.index()] {
                Some(step) => step,
                slot => slot.insert(Step::new(graph, current, self.damping)?),
            };
            current = step.next(rng);
            counts[current.index()] += 1;
        }

        let total = self.samples as f64;
        let estimates: Vec<f64> = counts.iter().map(|&c| c as f64 / total).collect();
        Ok(ProbabilityDistribution::from_node_values(graph, &estimates))
    }
}

/// Weighted choice over the pages reachable in one step from a node.
#[derive(Debug, Clone)]
struct Step {
    targets: Vec<NodeIndex>,
    choice: WeightedIndex<f64>,
}

impl Step {
    fn new(graph: &LinkGraph, node: NodeIndex, damping: f64) -> Result<Self> {
        let (targets, weights): (Vec<_>, Vec<_>) =
            transition_weights(graph, node, damping).into_iter().unzip();
        let choice = WeightedIndex::new(weights).map_err(|e| {
            RankError::Computation(format!(
                "bad transition weights for `{}`: {e}",
                graph.name(node)
            ))
        })?;
        Ok(Self { targets, choice })
    }

    fn next<R: Rng + ?Sized>(&self, rng: &mut R) -> NodeIndex {
        self.targets[self.choice.sample(rng)]
    }
}
