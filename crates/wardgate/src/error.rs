//! Unified error type for Wardgate.

use wardgate_registry::RegistryError;
use wardgate_status::StatusError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attributes let `?` convert sub-crate errors directly.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// A registry error (client or allow-list entry not found).
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The status file could not be written.
    #[error(transparent)]
    Status(#[from] StatusError),
}
