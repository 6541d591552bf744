//! Batch processing over the shared document collection.
//!
//! One runner pass walks an index range, decides per document whether to
//! skip, stamp an error, or analyze, and periodically rewrites the whole
//! collection back to the store.

use std::ops::Range;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::analysis::vocab::Vocabulary;
use crate::analysis::{DocumentAnalyzer, DocumentIdentity};
use crate::config::Settings;
use crate::extract::{ExtractionError, TextExtractor};
use crate::models::{Analysis, Document};
use crate::store::DocumentStore;

/// Why a document did not make it through analysis.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("document has no file path")]
    MissingPath,

    #[error("PDF file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("PDF extraction failed: {0}")]
    ExtractionFailed(#[from] ExtractionError),
}

/// Outcome of one document's pass through the state machine.
#[derive(Debug)]
pub enum Outcome {
    /// Already processed; untouched.
    Skipped,
    /// Fresh analysis attached.
    Analyzed,
    /// Counted as an error, possibly with an error record stamped.
    Failed(ProcessError),
}

/// Accumulated counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
}

/// Walks a batch range over the collection and persists the results.
pub struct BatchRunner<'a> {
    settings: &'a Settings,
    extractor: TextExtractor,
    analyzer: DocumentAnalyzer,
}

impl<'a> BatchRunner<'a> {
    pub fn new(settings: &'a Settings, vocabulary: &Vocabulary) -> anyhow::Result<Self> {
        Ok(Self {
            settings,
            extractor: TextExtractor::new(settings.max_text_chars, settings.min_text_chars),
            analyzer: DocumentAnalyzer::new(vocabulary)?,
        })
    }

    /// Process `range` over `documents`, checkpointing through `store`.
    ///
    /// `range.end` past the collection is clamped. The collection is saved
    /// after every `checkpoint_interval` attempted (non-skipped) documents
    /// and once more, unconditionally, after the loop; an interrupted run
    /// loses at most one checkpoint interval of work. `on_document` fires
    /// after each document for progress reporting.
    pub fn run(
        &self,
        documents: &mut [Document],
        store: &DocumentStore,
        range: Range<usize>,
        force: bool,
        mut on_document: impl FnMut(usize, &Document, &Outcome),
    ) -> anyhow::Result<RunStats> {
        let end = range.end.min(documents.len());
        let start = range.start.min(end);

        let mut stats = RunStats::default();
        let mut attempted = 0usize;

        for index in start..end {
            let outcome = self.process_document(&mut documents[index], force);
            match &outcome {
                Outcome::Skipped => stats.skipped += 1,
                Outcome::Analyzed => stats.processed += 1,
                Outcome::Failed(error) => {
                    stats.errors += 1;
                    tracing::warn!(index, %error, "document failed");
                }
            }

            if !matches!(outcome, Outcome::Skipped) {
                attempted += 1;
                if attempted % self.settings.checkpoint_interval == 0 {
                    store.save(documents)?;
                    tracing::info!(attempted, "checkpoint saved");
                }
            }

            on_document(index, &documents[index], &outcome);
        }

        store.save(documents)?;
        Ok(stats)
    }

    /// Evaluate the per-document states in order; first match wins.
    fn process_document(&self, document: &mut Document, force: bool) -> Outcome {
        if !force && document.is_processed() {
            return Outcome::Skipped;
        }

        let Some(location) = document.location() else {
            return Outcome::Failed(ProcessError::MissingPath);
        };
        let path = self.settings.resolve(Path::new(location));

        if !path.exists() {
            document.set_analysis(&Analysis::error_record(
                "PDF file not found at expected location.",
                "PDF file not found",
            ));
            return Outcome::Failed(ProcessError::FileNotFound(path));
        }

        let extracted = match self.extractor.extract(&path) {
            Ok(extracted) => extracted,
            Err(error) => {
                document.set_analysis(&Analysis::error_record(
                    "PDF text extraction failed.",
                    "PDF extraction failed",
                ));
                return Outcome::Failed(error.into());
            }
        };

        let identity = DocumentIdentity {
            title: document.display_title(),
            category: document.category.as_deref().unwrap_or("Gaming"),
            file_name: document.file_name.as_deref().unwrap_or(location),
        };
        let analysis = self.analyzer.analyze(identity, &extracted);
        document.set_analysis(&analysis);
        Outcome::Analyzed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn settings() -> Settings {
        Settings::default()
    }

    fn runner(settings: &Settings) -> BatchRunner<'_> {
        BatchRunner::new(settings, &Vocabulary::default()).unwrap()
    }

    fn doc(value: serde_json::Value) -> Document {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_skip_wins_over_missing_path() {
        let settings = settings();
        let runner = runner(&settings);
        // Processed but pathless: the skip state is evaluated first.
        let mut document = doc(json!({ "aiAnalysis": { "processed": true } }));
        let outcome = runner.process_document(&mut document, false);
        assert!(matches!(outcome, Outcome::Skipped));
    }

    #[test]
    fn test_missing_path_stamps_nothing() {
        let settings = settings();
        let runner = runner(&settings);
        let mut document = doc(json!({ "title": "No path" }));
        let outcome = runner.process_document(&mut document, false);
        assert!(matches!(
            outcome,
            Outcome::Failed(ProcessError::MissingPath)
        ));
        assert!(document.ai_analysis.is_none());
    }

    #[test]
    fn test_file_not_found_stamps_error_record() {
        let settings = settings();
        let runner = runner(&settings);
        let mut document = doc(json!({ "filePath": "nope/missing.pdf" }));
        let outcome = runner.process_document(&mut document, false);
        assert!(matches!(
            outcome,
            Outcome::Failed(ProcessError::FileNotFound(_))
        ));
        let analysis = document.ai_analysis.unwrap();
        assert_eq!(analysis["error"], "PDF file not found");
        assert_eq!(analysis["processed"], false);
    }

    #[test]
    fn test_force_reprocesses_missing_file() {
        let settings = settings();
        let runner = runner(&settings);
        let mut document = doc(json!({
            "filePath": "nope/missing.pdf",
            "aiAnalysis": { "processed": true }
        }));
        assert!(matches!(
            runner.process_document(&mut document, true),
            Outcome::Failed(ProcessError::FileNotFound(_))
        ));
    }
}
