//! Document records for the shared report collection.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Analysis;

/// One catalogued PDF report plus its metadata and optional analysis.
///
/// The collection file is shared with other tooling, so only the fields this
/// pipeline reads are typed; everything else round-trips through `extra`
/// untouched. `ai_analysis` stays a raw JSON value because records written by
/// earlier pipeline generations do not all share one shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "fileName", default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(rename = "filePath", default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    /// Legacy location field written by older collection producers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(rename = "aiAnalysis", default, skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Document {
    /// Title for progress output, falling back to the filename.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.file_name.as_deref())
            .unwrap_or("Untitled")
    }

    /// Location of the PDF on disk, if any field carries one.
    pub fn location(&self) -> Option<&str> {
        self.file_path.as_deref().or(self.path.as_deref())
    }

    /// Whether a completed analysis is already attached.
    ///
    /// Error-stamped records carry `processed: false` and stay eligible, so a
    /// later run retries them.
    pub fn is_processed(&self) -> bool {
        self.ai_analysis
            .as_ref()
            .and_then(|a| a.get("processed"))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Replace the analysis record wholesale.
    pub fn set_analysis(&mut self, analysis: &Analysis) {
        // Serialization of Analysis cannot fail: it is a tree of strings,
        // numbers, and vectors.
        self.ai_analysis = serde_json::to_value(analysis).ok();
    }
}
