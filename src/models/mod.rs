//! Data models for documents and their analysis records.

mod analysis;
mod document;

pub use analysis::{Analysis, Metric, MetricKind, Sentiment};
pub use document::Document;
