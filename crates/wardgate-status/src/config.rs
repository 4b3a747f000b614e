//! Status export configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default location of the client status file.
pub const DEFAULT_STATUS_PATH: &str = "/tmp/wardgate_client_status";

/// Where the status snapshot is written.
///
/// Missing fields fall back to [`Default`], so a config document may omit
/// the section entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusConfig {
    /// Destination file. Truncated and rewritten on every export.
    pub path: PathBuf,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_STATUS_PATH),
        }
    }
}
