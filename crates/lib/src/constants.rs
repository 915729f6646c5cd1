//! # Shared Constants
//!
//! Defaults shared by the server and the CLI.

/// The default path of the knowledge store database file.
pub const DEFAULT_DB_FILE: &str = "legal_vectorstore/legal.db";

/// The folder receiving one JSON file per analysed case.
pub const DEFAULT_HISTORY_DIR: &str = "case_history";

/// How many provisions are retrieved for every case.
pub const DEFAULT_TOP_K: u32 = 8;

/// Shown next to every failed analysis.
pub const RETRY_HINT: &str = "Please try again with more detailed case information.";
