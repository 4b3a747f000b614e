//! # Wardgate
//!
//! The client session registry of a captive-portal gateway.
//!
//! A [`Gateway`] owns the shared state every gateway actor works on: the
//! client registry, the trusted and valid IP allow lists, and the status
//! file writer. Build one at startup, wrap it in an `Arc`, and hand it to
//! the authentication, firewall-sync and status-export paths.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use wardgate::prelude::*;
//!
//! let gateway = Arc::new(Gateway::new(GatewayConfig::default()));
//!
//! // Authentication path: admit a device.
//! {
//!     let mut clients = gateway.clients().lock();
//!     if clients.find_by_ip_mac("10.0.0.5", "aa:bb:cc:dd:ee:ff").is_none() {
//!         clients.append("10.0.0.5", "aa:bb:cc:dd:ee:ff", generate_token());
//!     }
//! }
//!
//! // Status path: snapshot to disk, best effort.
//! let _ = gateway.write_status();
//! ```

mod config;
mod error;
mod gateway;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use gateway::Gateway;

/// Installs a `tracing` fmt subscriber filtered by `RUST_LOG`
/// (default `info`). Meant for binaries; libraries never call it.
///
/// Does nothing if a global subscriber is already set.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}

pub mod prelude {
    //! Everything a gateway actor usually needs.

    pub use crate::{Gateway, GatewayConfig, GatewayError};
    pub use wardgate_registry::{
        AllowListKind, Client, ClientFlag, ClientGuard, ClientId, ClientList,
        ClientRegistry, FirewallMark, IpEntry, IpGuard, IpList, IpRegistry,
        RegistryError, TrafficCounters, generate_token,
    };
    pub use wardgate_status::{StatusConfig, StatusError, StatusWriter};
}
