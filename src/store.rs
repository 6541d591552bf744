//! JSON-file persistence for the document collection.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::Document;

/// Errors raised by collection reads and writes.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read store {}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write store {}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed store {}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to encode store {}", path.display())]
    Encode {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Document collection backed by a single JSON file.
///
/// Every save rewrites the whole file, pretty-printed. The store assumes one
/// writer at a time: two concurrent runs over the same file will clobber each
/// other's results, so runs must be serialized or scoped to disjoint index
/// ranges.
pub struct DocumentStore {
    path: PathBuf,
}

impl DocumentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full collection into memory.
    pub fn load(&self) -> Result<Vec<Document>, StoreError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Overwrite the store with the given collection.
    pub fn save(&self, documents: &[Document]) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(documents).map_err(|source| StoreError::Encode {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, raw).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("documents.json");
        fs::write(
            &path,
            serde_json::to_string_pretty(&json!([
                { "id": "a", "title": "First Report", "filePath": "reports/a.pdf" },
                { "id": "b", "title": "Second Report", "sourceUrl": "https://example.com" }
            ]))
            .unwrap(),
        )
        .unwrap();

        let store = DocumentStore::new(&path);
        let documents = store.load().unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[1].display_title(), "Second Report");

        store.save(&documents).unwrap();
        let reloaded: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(reloaded[1]["sourceUrl"], "https://example.com");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let store = DocumentStore::new(dir.path().join("missing.json"));
        assert!(matches!(store.load(), Err(StoreError::Read { .. })));
    }

    #[test]
    fn test_load_malformed_store() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("documents.json");
        fs::write(&path, "{ not json").unwrap();
        let store = DocumentStore::new(&path);
        assert!(matches!(store.load(), Err(StoreError::Parse { .. })));
    }
}
