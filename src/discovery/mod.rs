//! Corpus discovery.
//!
//! Turns a directory of HTML pages into the `LinkGraph` the rankers read.
//! Uses the `ignore` crate for directory walking.

mod corpus;

pub use corpus::{crawl, extract_links};
