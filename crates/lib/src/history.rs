//! # Case History Files
//!
//! Every analysed case is written as one pretty-printed JSON document to a
//! local folder. Files are named after the second the case was recorded, e.g.
//! `case_20240305_090701.json`; two cases recorded in the same second share a
//! name and the later one replaces the earlier file. Files are write-only from
//! the application's point of view.

use crate::{errors::HistoryError, session::CaseEntry};
use std::path::{Path, PathBuf};
use tracing::info;

/// Layout of the timestamp embedded in history file names.
pub const FILE_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

#[derive(Debug, Clone)]
pub struct HistoryStore {
    dir: PathBuf,
}

impl HistoryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The path an entry is written to.
    pub fn path_for(&self, entry: &CaseEntry) -> PathBuf {
        self.dir.join(format!(
            "case_{}.json",
            entry.timestamp.format(FILE_STAMP_FORMAT)
        ))
    }

    /// Writes `entry` to its file, creating the folder if needed.
    pub async fn save(&self, entry: &CaseEntry) -> Result<PathBuf, HistoryError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(entry);
        let body = serde_json::to_string_pretty(entry)?;
        tokio::fs::write(&path, body).await?;
        info!(path = %path.display(), "Saved case history.");
        Ok(path)
    }
}
