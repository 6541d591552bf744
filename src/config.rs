//! Run configuration.
//!
//! One explicit `Settings` value travels through a run; there is no global
//! mutable state. Values come from an optional TOML file with serde defaults,
//! then CLI flags override individual fields.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default config filename, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "reportminer.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed config {}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Settings for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Repository root that relative document paths resolve against.
    pub repo_root: PathBuf,
    /// Document collection file; joined to `repo_root` when relative.
    pub store_path: PathBuf,
    /// Extraction ceiling in characters.
    pub max_text_chars: usize,
    /// Extractions under this many characters count as failed.
    pub min_text_chars: usize,
    /// Full-collection save cadence, in attempted documents.
    pub checkpoint_interval: usize,
    /// Optional vocabulary override file; joined to `repo_root` when relative.
    pub vocabulary: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            repo_root: PathBuf::from("."),
            store_path: PathBuf::from("data/documents.json"),
            max_text_chars: 30_000,
            min_text_chars: 100,
            checkpoint_interval: 20,
            vocabulary: None,
        }
    }
}

impl Settings {
    /// Load settings from `path`, or from `reportminer.toml` if present, or
    /// defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let raw = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let mut settings: Settings =
            toml::from_str(&raw).map_err(|source| ConfigError::Parse { path, source })?;
        settings.repo_root = expand(&settings.repo_root);
        settings.store_path = expand(&settings.store_path);
        settings.vocabulary = settings.vocabulary.as_deref().map(expand);
        settings.checkpoint_interval = settings.checkpoint_interval.max(1);
        Ok(settings)
    }

    /// Store path with the repo root applied to relative values.
    pub fn resolved_store_path(&self) -> PathBuf {
        self.resolve(&self.store_path)
    }

    /// Vocabulary path with the repo root applied, if configured.
    pub fn resolved_vocabulary_path(&self) -> Option<PathBuf> {
        self.vocabulary.as_deref().map(|p| self.resolve(p))
    }

    /// Join `path` to the repo root unless it is already absolute.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.repo_root.join(path)
        }
    }
}

fn expand(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(raw.as_ref()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.max_text_chars, 30_000);
        assert_eq!(settings.min_text_chars, 100);
        assert_eq!(settings.checkpoint_interval, 20);
        assert_eq!(
            settings.resolved_store_path(),
            PathBuf::from("./data/documents.json")
        );
    }

    #[test]
    fn test_load_file_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "repo_root = \"/reports\"\nmax_text_chars = 50000\ncheckpoint_interval = 0"
        )
        .unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.repo_root, PathBuf::from("/reports"));
        assert_eq!(settings.max_text_chars, 50_000);
        // Defaults survive for fields the file does not name.
        assert_eq!(settings.min_text_chars, 100);
        // Zero clamps to 1; the runner computes attempted % interval.
        assert_eq!(settings.checkpoint_interval, 1);
        assert_eq!(
            settings.resolved_store_path(),
            PathBuf::from("/reports/data/documents.json")
        );
    }

    #[test]
    fn test_absolute_store_path_untouched() {
        let settings = Settings {
            repo_root: PathBuf::from("/reports"),
            store_path: PathBuf::from("/elsewhere/documents.json"),
            ..Settings::default()
        };
        assert_eq!(
            settings.resolved_store_path(),
            PathBuf::from("/elsewhere/documents.json")
        );
    }

    #[test]
    fn test_malformed_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_text_chars = \"lots\"").unwrap();
        assert!(matches!(
            Settings::load(Some(file.path())),
            Err(ConfigError::Parse { .. })
        ));
    }
}
