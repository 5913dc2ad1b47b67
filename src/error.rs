//! Error types for linkrank.
//!
//! Two families of failure reach a caller of the ranking core:
//! - Bad input (`InvalidGraph`, `InvalidParameter`) - rejected before any work
//! - Internal breaches (`Computation`) - should not happen for valid input
//!
//! Corpus loading and config loading have their own error types since they
//! touch the filesystem.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias for the ranking core.
pub type Result<T> = std::result::Result<T, RankError>;

/// Failures raised by the transition model and both rankers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankError {
    /// The graph is empty, references a node it does not define, or
    /// contains a self-loop.
    #[error("invalid graph: {0}")]
    InvalidGraph(String),

    /// A parameter is outside its allowed range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// An internal invariant was broken while computing ranks.
    #[error("computation failed: {0}")]
    Computation(String),
}

impl RankError {
    /// True for errors caused by the caller's input rather than by the
    /// computation itself.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidGraph(_) | Self::InvalidParameter { .. })
    }

    pub(crate) fn parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Failures while turning a directory of pages into a link graph.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("corpus directory does not exist: {}", .0.display())]
    MissingCorpus(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk corpus: {0}")]
    Walk(#[from] ignore::Error),

    #[error(transparent)]
    Graph(#[from] RankError),
}

/// Failures while reading `linkrank.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_are_distinguished() {
        assert!(RankError::InvalidGraph("empty".into()).is_input_error());
        assert!(RankError::parameter("damping", "must be in (0, 1)").is_input_error());
        assert!(!RankError::Computation("no convergence".into()).is_input_error());
    }

    #[test]
    fn test_parameter_message() {
        let err = RankError::parameter("samples", "must be at least 1, got 0");
        assert_eq!(
            err.to_string(),
            "invalid parameter `samples`: must be at least 1, got 0"
        );
    }
}
