//! The gateway: the shared state handed to every gateway actor.
//!
//! Replaces process-wide globals with one constructed value. Each registry
//! inside keeps its own lock, so the authentication path working on
//! clients never blocks a reader of the allow lists.

use wardgate_registry::{AllowListKind, ClientRegistry, IpRegistry};
use wardgate_status::StatusWriter;

use crate::{GatewayConfig, GatewayError};

/// Client registry, allow lists and status writer for one gateway.
///
/// Share it as `Arc<Gateway>`; all methods take `&self`.
#[derive(Debug)]
pub struct Gateway {
    clients: ClientRegistry,
    trusted: IpRegistry,
    valid: IpRegistry,
    status: StatusWriter,
}

impl Gateway {
    /// Builds an empty client registry and the allow lists from `config`.
    pub fn new(config: GatewayConfig) -> Self {
        let gateway = Self {
            clients: ClientRegistry::new(),
            trusted: IpRegistry::new(AllowListKind::Trusted),
            valid: IpRegistry::new(AllowListKind::Valid),
            status: StatusWriter::new(config.status),
        };
        gateway.reload_allow_lists(config.trusted_ips, config.valid_ips);
        tracing::info!(
            status_path = %gateway.status.path().display(),
            "gateway state initialised"
        );
        gateway
    }

    pub fn clients(&self) -> &ClientRegistry {
        &self.clients
    }

    pub fn trusted(&self) -> &IpRegistry {
        &self.trusted
    }

    pub fn valid(&self) -> &IpRegistry {
        &self.valid
    }

    pub fn status(&self) -> &StatusWriter {
        &self.status
    }

    /// Replaces both allow lists wholesale.
    ///
    /// Each list is swapped under its own lock; the two swaps are not one
    /// atomic step.
    pub fn reload_allow_lists<T, V>(&self, trusted: T, valid: V)
    where
        T: IntoIterator<Item = String>,
        V: IntoIterator<Item = String>,
    {
        self.trusted.lock().replace(trusted);
        self.valid.lock().replace(valid);
    }

    /// One-shot locked lookup in the trusted list.
    pub fn is_trusted(&self, ip: &str) -> bool {
        self.trusted.lock().contains(ip)
    }

    /// One-shot locked lookup in the valid list.
    pub fn is_valid(&self, ip: &str) -> bool {
        self.valid.lock().contains(ip)
    }

    /// Writes the client status snapshot. Returns the number of clients
    /// written.
    ///
    /// Must not be called while holding the client guard.
    pub fn write_status(&self) -> Result<usize, GatewayError> {
        Ok(self.status.export(&self.clients)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GatewayConfig {
        GatewayConfig {
            trusted_ips: vec!["10.1.0.1".into(), "10.1.0.2".into()],
            valid_ips: vec!["10.2.0.1".into()],
            ..GatewayConfig::default()
        }
    }

    #[test]
    fn test_new_populates_allow_lists() {
        let gateway = Gateway::new(config());

        assert!(gateway.is_trusted("10.1.0.2"));
        assert!(!gateway.is_trusted("10.2.0.1"));
        assert!(gateway.is_valid("10.2.0.1"));
        assert!(gateway.clients().lock().is_empty());
    }

    #[test]
    fn test_reload_allow_lists_replaces_contents() {
        let gateway = Gateway::new(config());

        gateway.reload_allow_lists(vec!["10.3.0.1".to_string()], Vec::new());

        assert!(!gateway.is_trusted("10.1.0.1"));
        assert!(gateway.is_trusted("10.3.0.1"));
        assert!(gateway.valid().lock().is_empty());
    }
}
