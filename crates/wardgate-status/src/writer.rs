//! Rendering and writing the client status file.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use wardgate_registry::{Client, ClientList, ClientRegistry};

use crate::{StatusConfig, StatusError};

/// Formats one client as a status line, newline included.
///
/// Field order is fixed: `ip mac fw_state token last_updated`.
pub fn status_line(client: &Client) -> String {
    format!(
        "{} {} {} {} {}\n",
        client.ip(),
        client.mac(),
        client.fw_state,
        client.token(),
        client.counters.last_updated
    )
}

/// Renders every client, oldest first.
pub fn render(clients: &ClientList) -> String {
    clients.iter().map(status_line).collect()
}

/// Streams the snapshot into `out`. Returns the number of lines written.
pub fn write_snapshot<W: Write>(clients: &ClientList, out: &mut W) -> io::Result<usize> {
    let mut lines = 0;
    for client in clients {
        out.write_all(status_line(client).as_bytes())?;
        lines += 1;
    }
    out.flush()?;
    Ok(lines)
}

/// Writes status snapshots to the configured file.
#[derive(Debug, Clone)]
pub struct StatusWriter {
    config: StatusConfig,
}

impl StatusWriter {
    pub fn new(config: StatusConfig) -> Self {
        Self { config }
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Takes a snapshot of `registry` and writes it to the status file.
    ///
    /// The registry lock is held only while rendering; the file is
    /// truncated and written after the lock is released. Returns the number
    /// of lines written.
    ///
    /// Must not be called while the current thread holds the client guard:
    /// use [`export_locked`](Self::export_locked) there.
    ///
    /// # Errors
    /// Returns [`StatusError::Io`] if the destination cannot be written.
    /// The failure is also logged; callers may ignore it and retry on the
    /// next cycle.
    pub fn export(&self, registry: &ClientRegistry) -> Result<usize, StatusError> {
        let (snapshot, lines) = {
            let clients = registry.lock();
            (render(&clients), clients.len())
        };
        self.write_file(snapshot.as_bytes(), lines)
    }

    /// Like [`export`](Self::export), for a caller already holding the
    /// guard. The file is written while the lock stays held.
    pub fn export_locked(&self, clients: &ClientList) -> Result<usize, StatusError> {
        self.write_file(render(clients).as_bytes(), clients.len())
    }

    fn write_file(&self, snapshot: &[u8], lines: usize) -> Result<usize, StatusError> {
        let path = &self.config.path;
        match fs::write(path, snapshot) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), lines, "client status written");
                Ok(lines)
            }
            Err(source) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %source,
                    "could not write client status, skipping this snapshot"
                );
                Err(StatusError::Io {
                    path: path.clone(),
                    source,
                })
            }
        }
    }
}
