//! Client session and IP allow-list registries for Wardgate.
//!
//! This crate holds the gateway's shared, in-memory view of every device
//! it knows about:
//!
//! 1. **Client registry** — one [`Client`] per device, in creation order,
//!    looked up by IP, MAC, IP+MAC or access token ([`ClientRegistry`])
//! 2. **Allow lists** — bare IP entries granted trusted or pre-validated
//!    status ([`IpRegistry`])
//!
//! # Locking
//!
//! Each registry owns one exclusive lock. The only way to reach the data is
//! through the guard returned by `lock()`, so every multi-step sequence
//! (find-then-delete, find-then-update-counters) runs inside one locked
//! section and the lock is released when the guard goes out of scope.
//!
//! ```text
//! Authentication path ──┐
//! Firewall-sync path  ──┼──→ ClientRegistry::lock() ──→ ClientGuard ──→ ClientList
//! Status export       ──┘
//! ```
//!
//! Guards are not reentrant: locking a registry twice from the same thread
//! deadlocks.

mod allowlist;
mod client;
mod error;
mod list;
mod registry;
mod token;

pub use allowlist::{AllowListKind, IpEntry, IpGuard, IpList, IpRegistry};
pub use client::{Client, ClientFlag, ClientId, FirewallMark, TrafficCounters};
pub use error::RegistryError;
pub use registry::{ClientGuard, ClientList, ClientRegistry, Clients};
pub use token::generate_token;
