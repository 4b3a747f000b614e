//! Error types for the status export layer.

use std::path::PathBuf;

/// Errors that can occur while writing the status file.
#[derive(Debug, thiserror::Error)]
pub enum StatusError {
    /// The destination could not be opened, truncated or written.
    #[error("cannot write status file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
