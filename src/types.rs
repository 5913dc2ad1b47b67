//! Core types for linkrank.
//!
//! - `LinkGraph`: the read-only directed graph both rankers consume
//! - `ProbabilityDistribution`: what every ranker hands back
//! - `RankingConfig`: damping, sample count and convergence settings
//!
//! `LinkGraph` is frozen after construction. Node indices follow the sorted
//! order of node names, so any walk over the graph is reproducible no matter
//! how the caller's map happened to be ordered.

use std::collections::{BTreeMap, BTreeSet};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use serde::{Deserialize, Serialize};

use crate::error::{RankError, Result};

/// Probability of following a link rather than jumping to a random page.
pub const DEFAULT_DAMPING: f64 = 0.85;

/// Number of pages visited by the random surfer.
pub const DEFAULT_SAMPLES: usize = 10_000;

/// Per-node change below which power iteration stops.
pub const CONVERGENCE_THRESHOLD: f64 = 0.001;

/// Ceiling on power iteration rounds before giving up.
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// A directed link graph between named pages.
///
/// Every link target is itself a node of the graph and no page links to
/// itself. A page without outgoing links is *dangling*.
#[derive(Debug, Clone)]
pub struct LinkGraph {
    graph: DiGraph<String, ()>,
    index: BTreeMap<String, NodeIndex>,
    out_degree: Vec<usize>,
}

impl LinkGraph {
    /// Build a graph from `(page, links)` pairs.
    ///
    /// Repeated pages have their link sets merged. Fails with
    /// [`RankError::InvalidGraph`] if a link points at a page that is not a
    /// key, or if a page links to itself.
    pub fn from_links<I, N, L, T>(links: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, L)>,
        N: Into<String>,
        L: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut pages: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (page, targets) in links {
            pages
                .entry(page.into())
                .or_default()
                .extend(targets.into_iter().map(Into::into));
        }

        let mut graph = DiGraph::with_capacity(pages.len(), 0);
        let mut index = BTreeMap::new();
        for name in pages.keys() {
            let idx = graph.add_node(name.clone());
            index.insert(name.clone(), idx);
        }

        let mut out_degree = vec![0; pages.len()];
        for (name, targets) in &pages {
            let from = index[name];
            for target in targets {
                if target == name {
                    return Err(RankError::InvalidGraph(format!(
                        "page `{name}` links to itself"
                    )));
                }
                let to = *index.get(target).ok_or_else(|| {
                    RankError::InvalidGraph(format!(
                        "page `{name}` links to undefined page `{target}`"
                    ))
                })?;
                graph.add_edge(from, to, ());
                out_degree[from.index()] += 1;
            }
        }

        Ok(Self {
            graph,
            index,
            out_degree,
        })
    }

    /// Number of pages.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Total number of links.
    pub fn link_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, page: &str) -> bool {
        self.index.contains_key(page)
    }

    /// Node index for a page name.
    pub fn index_of(&self, page: &str) -> Option<NodeIndex> {
        self.index.get(page).copied()
    }

    /// Page name for a node index.
    pub fn name(&self, node: NodeIndex) -> &str {
        &self.graph[node]
    }

    /// All node indices, in sorted page-name order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// All page names, sorted.
    pub fn pages(&self) -> impl Iterator<Item = &str> + '_ {
        self.index.keys().map(String::as_str)
    }

    pub fn out_degree(&self, node: NodeIndex) -> usize {
        self.out_degree[node.index()]
    }

    pub fn is_dangling(&self, node: NodeIndex) -> bool {
        self.out_degree(node) == 0
    }

    /// Pages with no outgoing links.
    pub fn dangling_nodes(&self) -> Vec<NodeIndex> {
        self.nodes().filter(|&n| self.is_dangling(n)).collect()
    }

    /// Pages `node` links to, ordered by index.
    pub fn successors(&self, node: NodeIndex) -> Vec<NodeIndex> {
        self.sorted_neighbors(node, Direction::Outgoing)
    }

    /// Pages linking to `node`, ordered by index.
    pub fn predecessors(&self, node: NodeIndex) -> Vec<NodeIndex> {
        self.sorted_neighbors(node, Direction::Incoming)
    }

    /// Names of the pages `page` links to.
    pub fn links(&self, page: &str) -> Option<BTreeSet<&str>> {
        let node = self.index_of(page)?;
        Some(
            self.graph
                .neighbors_directed(node, Direction::Outgoing)
                .map(|n| self.name(n))
                .collect(),
        )
    }

    fn sorted_neighbors(&self, node: NodeIndex, dir: Direction) -> Vec<NodeIndex> {
        // petgraph yields neighbors in reverse insertion order
        let mut neighbors: Vec<_> = self.graph.neighbors_directed(node, dir).collect();
        neighbors.sort_unstable();
        neighbors
    }
}

/// A mapping from page name to probability.
///
/// Distributions produced by the rankers cover every page of the graph and
/// sum to 1 within floating-point tolerance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProbabilityDistribution {
    values: BTreeMap<String, f64>,
}

impl ProbabilityDistribution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a distribution from a value per node, indexed like `graph`.
    pub(crate) fn from_node_values(graph: &LinkGraph, values: &[f64]) -> Self {
        graph
            .nodes()
            .map(|n| (graph.name(n).to_string(), values[n.index()]))
            .collect()
    }

    pub fn insert(&mut self, page: impl Into<String>, probability: f64) {
        self.values.insert(page.into(), probability);
    }

    pub fn get(&self, page: &str) -> Option<f64> {
        self.values.get(page).copied()
    }

    /// Probability of `page`, or 0.0 if it is not part of the distribution.
    pub fn score(&self, page: &str) -> f64 {
        self.get(page).unwrap_or(0.0)
    }

    /// Entries in sorted page-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.values.iter().map(|(k, &v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sum of all probabilities.
    pub fn total(&self) -> f64 {
        self.values.values().sum()
    }

    /// Pages with strictly positive probability.
    pub fn support(&self) -> BTreeSet<&str> {
        self.values
            .iter()
            .filter(|(_, v)| **v > 0.0)
            .map(|(k, _)| k.as_str())
            .collect()
    }

    /// Entries sorted by descending probability, ties broken by name.
    pub fn ranked(&self) -> Vec<(&str, f64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// The `n` most probable pages.
    pub fn top_n(&self, n: usize) -> Vec<(&str, f64)> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }

    /// Largest absolute per-page difference against `other`.
    ///
    /// Pages missing from one side count as 0.0 there.
    pub fn max_difference(&self, other: &Self) -> f64 {
        self.values
            .keys()
            .chain(other.values.keys())
            .map(|k| (self.score(k) - other.score(k)).abs())
            .fold(0.0_f64, f64::max)
    }
}

impl FromIterator<(String, f64)> for ProbabilityDistribution {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Configuration for both rankers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct RankingConfig {
    /// Damping factor, strictly between 0 and 1.
    pub damping: f64,
    /// Pages visited by the random surfer.
    pub samples: usize,
    /// Power iteration stops once no page moves by this much.
    pub convergence_threshold: f64,
    /// Power iteration rounds allowed before reporting failure.
    pub max_iterations: usize,
    /// Seed for the random surfer. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            samples: DEFAULT_SAMPLES,
            convergence_threshold: CONVERGENCE_THRESHOLD,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            seed: None,
        }
    }
}

impl RankingConfig {
    /// Reject parameters neither ranker can work with.
    pub fn validate(&self) -> Result<()> {
        check_damping(self.damping)?;
        check_samples(self.samples)?;
        check_threshold(self.convergence_threshold)?;
        check_max_iterations(self.max_iterations)
    }
}

pub(crate) fn check_threshold(threshold: f64) -> Result<()> {
    if threshold > 0.0 && threshold.is_finite() {
        Ok(())
    } else {
        Err(RankError::parameter(
            "convergence_threshold",
            format!("must be positive and finite, got {threshold}"),
        ))
    }
}

pub(crate) fn check_max_iterations(max_iterations: usize) -> Result<()> {
    if max_iterations == 0 {
        return Err(RankError::parameter("max_iterations", "must be at least 1, got 0"));
    }
    Ok(())
}

pub(crate) fn check_damping(damping: f64) -> Result<()> {
    // NaN fails both comparisons
    if damping > 0.0 && damping < 1.0 {
        Ok(())
    } else {
        Err(RankError::parameter(
            "damping",
            format!("must be strictly between 0 and 1, got {damping}"),
        ))
    }
}

pub(crate) fn check_samples(samples: usize) -> Result<()> {
    if samples == 0 {
        return Err(RankError::parameter("samples", "must be at least 1, got 0"));
    }
    Ok(())
}

pub(crate) fn check_graph(graph: &LinkGraph) -> Result<()> {
    if graph.is_empty() {
        return Err(RankError::InvalidGraph("graph has no pages".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> LinkGraph {
        LinkGraph::from_links([
            ("1", vec!["2"]),
            ("2", vec!["1", "3"]),
            ("3", vec!["2", "4"]),
            ("4", vec!["2"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_nodes_follow_name_order() {
        let graph = LinkGraph::from_links([("c", vec!["a"]), ("a", vec![]), ("b", vec!["c"])]).unwrap();
        let names: Vec<_> = graph.nodes().map(|n| graph.name(n)).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(graph.pages().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_degrees_and_neighbors() {
        let graph = corpus();
        let two = graph.index_of("2").unwrap();

        assert_eq!(graph.len(), 4);
        assert_eq!(graph.link_count(), 6);
        assert_eq!(graph.out_degree(two), 2);

        let succ: Vec<_> = graph.successors(two).into_iter().map(|n| graph.name(n)).collect();
        assert_eq!(succ, vec!["1", "3"]);

        let pred: Vec<_> = graph.predecessors(two).into_iter().map(|n| graph.name(n)).collect();
        assert_eq!(pred, vec!["1", "3", "4"]);
    }

    #[test]
    fn test_dangling_detection() {
        let graph = LinkGraph::from_links([("1", vec!["2"]), ("2", vec![])]).unwrap();
        let dangling: Vec<_> = graph.dangling_nodes().into_iter().map(|n| graph.name(n)).collect();
        assert_eq!(dangling, vec!["2"]);
        assert!(!graph.is_dangling(graph.index_of("1").unwrap()));
    }

    #[test]
    fn test_rejects_undefined_target() {
        let err = LinkGraph::from_links([("1", vec!["2"])]).unwrap_err();
        assert!(matches!(err, RankError::InvalidGraph(_)));
    }

    #[test]
    fn test_rejects_self_loop() {
        let err = LinkGraph::from_links([("1", vec!["1"])]).unwrap_err();
        assert!(matches!(err, RankError::InvalidGraph(_)));
    }

    #[test]
    fn test_duplicate_pages_merge_links() {
        let graph =
            LinkGraph::from_links([("1", vec!["2"]), ("1", vec!["3"]), ("2", vec![]), ("3", vec![])])
                .unwrap();
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.links("1").unwrap(), BTreeSet::from(["2", "3"]));
    }

    #[test]
    fn test_distribution_ranking() {
        let dist: ProbabilityDistribution = [
            ("a".to_string(), 0.2),
            ("b".to_string(), 0.5),
            ("c".to_string(), 0.2),
            ("d".to_string(), 0.1),
        ]
        .into_iter()
        .collect();

        assert!((dist.total() - 1.0).abs() < 1e-12);
        assert_eq!(dist.top_n(3), vec![("b", 0.5), ("a", 0.2), ("c", 0.2)]);
        assert_eq!(dist.score("missing"), 0.0);
    }

    #[test]
    fn test_distribution_serializes_as_object() {
        let mut dist = ProbabilityDistribution::new();
        dist.insert("a", 0.25);
        dist.insert("b", 0.75);
        let json = serde_json::to_string(&dist).unwrap();
        assert_eq!(json, r#"{"a":0.25,"b":0.75}"#);
    }

    #[test]
    fn test_config_validation() {
        assert!(RankingConfig::default().validate().is_ok());

        for damping in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            let config = RankingConfig {
                damping,
                ..Default::default()
            };
            assert!(config.validate().is_err(), "damping {damping} accepted");
        }

        let config = RankingConfig {
            samples: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(RankError::InvalidParameter { name: "samples", .. })
        ));
    }
}
