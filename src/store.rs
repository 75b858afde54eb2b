//! Read-only access to the dashboard's data directory.
//!
//! The agent process owns every file here; the dashboard only reads. A missing
//! file is a normal "no data yet" state and is reported as `Ok(None)`, never as
//! an error, so callers can render it differently from a failed read.

use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const ACTIVITY_FILE: &str = "activity.jsonl";
pub const STATUS_FILE: &str = "status.json";
pub const AGENTS_FILE: &str = "agents.json";
pub const MEMORY_FILE: &str = "memory.json";
pub const SYSTEM_FILE: &str = "system.json";
pub const DAILY_DIR: &str = "daily";

/// Failure reading an existing store file.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Source of the raw activity log: the whole store as bytes, or `None` if it
/// does not exist yet. Lines are decoded individually, so one undecodable line
/// cannot fail the whole load.
pub trait ActivitySource: Send + Sync {
    fn load_activity(&self) -> Result<Option<Vec<u8>>, StoreError>;
}

/// Presence and size of one known data file.
#[derive(Debug, Clone)]
pub struct FileHealth {
    pub name: String,
    pub path: PathBuf,
    pub size_bytes: Option<u64>,
}

impl FileHealth {
    pub fn exists(&self) -> bool {
        self.size_bytes.is_some()
    }
}

/// File-backed store rooted at the configured data directory.
#[derive(Debug, Clone)]
pub struct DataStore {
    root: PathBuf,
}

impl DataStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the daily summary file for `date` (`YYYY-MM-DD`).
    pub fn daily_path(date: chrono::NaiveDate) -> String {
        format!("{DAILY_DIR}/{}.json", date.format("%Y-%m-%d"))
    }

    /// Read a UTF-8 file relative to the data directory.
    pub fn read_text(&self, relative: &str) -> Result<Option<String>, StoreError> {
        self.read_with(relative, |p| std::fs::read_to_string(p))
    }

    /// Read a file relative to the data directory without decoding it.
    pub fn read_bytes(&self, relative: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.read_with(relative, |p| std::fs::read(p))
    }

    fn read_with<T>(
        &self,
        relative: &str,
        read: impl FnOnce(&Path) -> std::io::Result<T>,
    ) -> Result<Option<T>, StoreError> {
        let path = self.root.join(relative);
        match read(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "store file not found");
                Ok(None)
            }
            Err(source) => Err(StoreError::Read { path, source }),
        }
    }

    /// Read and decode a whole JSON document relative to the data directory.
    pub fn load_json<T: DeserializeOwned>(&self, relative: &str) -> Result<Option<T>, StoreError> {
        let Some(text) = self.read_text(relative)? else {
            return Ok(None);
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| StoreError::Parse {
                path: self.root.join(relative),
                source,
            })
    }

    /// Report presence and size of every top-level data file.
    pub fn health(&self) -> Vec<FileHealth> {
        [ACTIVITY_FILE, STATUS_FILE, AGENTS_FILE, MEMORY_FILE, SYSTEM_FILE]
            .iter()
            .map(|name| {
                let path = self.root.join(name);
                let size_bytes = std::fs::metadata(&path).ok().map(|m| m.len());
                FileHealth {
                    name: (*name).to_string(),
                    path,
                    size_bytes,
                }
            })
            .collect()
    }
}

impl ActivitySource for DataStore {
    fn load_activity(&self) -> Result<Option<Vec<u8>>, StoreError> {
        self.read_bytes(ACTIVITY_FILE)
    }
}
