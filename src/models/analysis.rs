//! Structured analysis records attached to documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of numeric metric captured from report text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Revenue,
    Growth,
    Users,
}

/// One numeric figure with the text window it was found in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub value: String,
    pub unit: String,
    pub context: String,
    #[serde(rename = "type")]
    pub kind: MetricKind,
}

/// Overall tone of a report, from weighted keyword counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
}

/// Heuristic analysis output for one document.
///
/// Created fresh per processing run and attached to the document wholesale;
/// never partially mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub summary: String,
    pub key_findings: Vec<String>,
    pub topics: Vec<String>,
    pub companies: Vec<String>,
    pub games: Vec<String>,
    pub platforms: Vec<String>,
    pub regions: Vec<String>,
    pub genres: Vec<String>,
    pub technologies: Vec<String>,
    pub business_models: Vec<String>,
    pub extracted_metrics: Vec<Metric>,
    pub timeframe: String,
    pub geographic_scope: String,
    pub report_type: String,
    pub target_audience: Vec<String>,
    pub sentiment: Sentiment,
    pub page_count: usize,
    pub text_length: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub processed: bool,
    pub processed_at: DateTime<Utc>,
}

impl Analysis {
    /// Sentinel record stamped when a document could not be analyzed.
    ///
    /// `processed` stays false so the default skip policy retries the
    /// document on a later run.
    pub fn error_record(summary: &str, error: &str) -> Self {
        Self {
            summary: summary.to_string(),
            key_findings: Vec::new(),
            topics: Vec::new(),
            companies: Vec::new(),
            games: Vec::new(),
            platforms: Vec::new(),
            regions: Vec::new(),
            genres: Vec::new(),
            technologies: Vec::new(),
            business_models: Vec::new(),
            extracted_metrics: Vec::new(),
            timeframe: "Not specified".to_string(),
            geographic_scope: "Not specified".to_string(),
            report_type: "Unknown".to_string(),
            target_audience: Vec::new(),
            sentiment: Sentiment::Neutral,
            page_count: 0,
            text_length: 0,
            error: Some(error.to_string()),
            processed: false,
            processed_at: Utc::now(),
        }
    }
}
