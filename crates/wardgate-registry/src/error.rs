//! Error types for the registry layer.

use crate::{AllowListKind, ClientId};

/// Errors that can occur while mutating a registry.
///
/// Both variants are recoverable: another actor may already have removed
/// the entry, and callers are expected to treat that as a no-op.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// No live client carries this id.
    /// Either it was never issued by this registry or it has already
    /// been deleted.
    #[error("client {0} not found")]
    ClientNotFound(ClientId),

    /// The allow list holds no entry for this address.
    #[error("ip {ip} not found in {list} allow list")]
    IpNotFound { list: AllowListKind, ip: String },
}
