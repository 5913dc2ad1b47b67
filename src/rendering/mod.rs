//! Output rendering - from distributions to text or JSON.

mod report;

pub use report::{JsonReport, ReportFormat, TextReport};
