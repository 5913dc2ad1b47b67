//! Result reports for the CLI.
//!
//! Text mode prints one block per ranking method, pages in name order with
//! four decimals:
//!
//! ```text
//! PageRank Results from Iteration
//!   1.html: 0.2202
//!   2.html: 0.4289
//! ```
//!
//! JSON mode prints both distributions in one object so the output can be
//! piped into other tools.

use std::fmt::Write as _;

use owo_colors::OwoColorize;
use serde::Serialize;

use crate::types::ProbabilityDistribution;

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Text renderer for a single distribution.
#[derive(Debug, Clone, Default)]
pub struct TextReport {
    color: bool,
    by_rank: bool,
}

impl TextReport {
    pub fn new(color: bool) -> Self {
        Self {
            color,
            by_rank: false,
        }
    }

    /// List pages by descending score instead of by name.
    pub fn by_rank(mut self, by_rank: bool) -> Self {
        self.by_rank = by_rank;
        self
    }

    pub fn render(&self, title: &str, ranks: &ProbabilityDistribution) -> String {
        let entries = if self.by_rank {
            ranks.ranked()
        } else {
            ranks.iter().collect()
        };

        let mut out = String::new();
        if self.color {
            let _ = writeln!(out, "{}", title.bold());
        } else {
            let _ = writeln!(out, "{title}");
        }
        for (page, score) in entries {
            let score = format!("{score:.4}");
            if self.color {
                let _ = writeln!(out, "  {}: {}", page.bright_blue(), score.green());
            } else {
                let _ = writeln!(out, "  {page}: {score}");
            }
        }
        out
    }
}

/// Both rankers' results, as serialized in JSON mode.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub damping: f64,
    pub samples: usize,
    pub sampling: &'a ProbabilityDistribution,
    pub iteration: &'a ProbabilityDistribution,
    pub iterations: usize,
}

impl JsonReport<'_> {
    pub fn render(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranks() -> ProbabilityDistribution {
        [("b.html".to_string(), 0.6), ("a.html".to_string(), 0.4)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_text_in_name_order() {
        let text = TextReport::new(false).render("PageRank Results from Iteration", &ranks());
        assert_eq!(
            text,
            "PageRank Results from Iteration\n  a.html: 0.4000\n  b.html: 0.6000\n"
        );
    }

    #[test]
    fn test_text_by_rank() {
        let text = TextReport::new(false).by_rank(true).render("Ranks", &ranks());
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[1], "  b.html: 0.6000");
        assert_eq!(lines[2], "  a.html: 0.4000");
    }

    #[test]
    fn test_json_report() {
        let dist = ranks();
        let report = JsonReport {
            damping: 0.85,
            samples: 100,
            sampling: &dist,
            iteration: &dist,
            iterations: 7,
        };
        let value: serde_json::Value = serde_json::from_str(&report.render().unwrap()).unwrap();
        assert_eq!(value["samples"], 100);
        assert_eq!(value["iteration"]["b.html"], 0.6);
    }
}
