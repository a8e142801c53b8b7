//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL audit trail of council requests and results
    pub conversation_log: Option<PathBuf>,
    /// Also write diagnostic logs to this file
    pub log_file: Option<PathBuf>,
}
