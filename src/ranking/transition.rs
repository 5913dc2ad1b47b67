//! Random-surfer transition model.
//!
//! From a page with links, the surfer follows one of them with probability
//! `damping` or jumps to a uniformly random page otherwise. A dead end
//! (dangling page) always jumps.
//!
//! ```text
//! linked page:   damping / out_degree + (1 - damping) / N
//! current page:  (1 - damping) / N
//! dangling:      1 / N for every page
//! ```
//!
//! The surfer can only land on the linked pages or stay on the current one,
//! so the non-dangling weights are normalized over that support before they
//! are returned.

use petgraph::graph::NodeIndex;

use crate::error::{RankError, Result};
use crate::types::{check_damping, check_graph, LinkGraph, ProbabilityDistribution};

/// Probability distribution over the page visited after `page`.
///
/// Fails if the graph is empty, `page` is not part of it, or `damping` is
/// outside (0, 1).
pub fn transition_model(
    graph: &LinkGraph,
    page: &str,
    damping: f64,
) -> Result<ProbabilityDistribution> {
    check_graph(graph)?;
    check_damping(damping)?;
    let node = graph
        .index_of(page)
        .ok_or_else(|| RankError::InvalidGraph(format!("unknown page `{page}`")))?;

    Ok(transition_weights(graph, node, damping)
        .into_iter()
        .map(|(n, p)| (graph.name(n).to_string(), p))
        .collect())
}

/// Ordered `(node, probability)` pairs for the step out of `node`.
///
/// Entries are sorted by node index so weighted draws over the list are
/// reproducible for a given random source. Callers must have validated the
/// graph and damping factor.
pub(crate) fn transition_weights(
    graph: &LinkGraph,
    node: NodeIndex,
    damping: f64,
) -> Vec<(NodeIndex, f64)> {
    let n = graph.len() as f64;

    if graph.is_dangling(node) {
        return graph.nodes().map(|p| (p, 1.0 / n)).collect();
    }

    let jump = (1.0 - damping) / n;
    let click = damping / graph.out_degree(node) as f64;

    let mut weights: Vec<(NodeIndex, f64)> = graph
        .successors(node)
        .into_iter()
        .map(|p| (p, click + jump))
        .collect();
    weights.push((node, jump));
    weights.sort_unstable_by_key(|&(p, _)| p);

    let total: f64 = weights.iter().map(|(_, w)| w).sum();
    for (_, w) in &mut weights {
        *w /= total;
    }
    weights
}
