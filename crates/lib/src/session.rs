//! # Case Sessions
//!
//! A [`CaseSession`] is the history of one user's interaction with the
//! advisor. It lives exactly as long as the owner keeps it: the server creates
//! one when a browser session starts and drops it when that session ends. It
//! is never persisted and never reloaded from the history folder.

use chrono::{DateTime, Local, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The timestamp layout used in history entries and files.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One analysed case.
///
/// Serializes as `{"timestamp": "YYYY-MM-DD HH:MM:SS", "case_description": ..., "analysis": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseEntry {
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
    pub case_description: String,
    pub analysis: String,
}

impl CaseEntry {
    /// Creates an entry stamped with the current local time, to the second.
    pub fn new(case_description: impl Into<String>, analysis: impl Into<String>) -> Self {
        let now = Local::now().naive_local();
        Self {
            timestamp: now.with_nanosecond(0).unwrap_or(now),
            case_description: case_description.into(),
            analysis: analysis.into(),
        }
    }

    /// A one-line label: the first `max_chars` characters of the description.
    pub fn preview(&self, max_chars: usize) -> String {
        let mut preview: String = self.case_description.chars().take(max_chars).collect();
        if self.case_description.chars().count() > max_chars {
            preview.push_str("...");
        }
        preview
    }
}

mod timestamp_format {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// The in-memory case history of a single user session.
#[derive(Debug, Clone, Serialize)]
pub struct CaseSession {
    id: Uuid,
    created_at: DateTime<Utc>,
    entries: Vec<CaseEntry>,
}

impl CaseSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            entries: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn push(&mut self, entry: CaseEntry) {
        self.entries.push(entry);
    }

    /// Entries in submission order.
    pub fn entries(&self) -> &[CaseEntry] {
        &self.entries
    }

    /// Zero-based lookup.
    pub fn get(&self, index: usize) -> Option<&CaseEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CaseSession {
    fn default() -> Self {
        Self::new()
    }
}
