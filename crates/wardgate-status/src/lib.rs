//! Client status export for Wardgate.
//!
//! Produces a plain-text snapshot of the client registry for monitoring
//! tools. Each line describes one client, in creation order:
//!
//! ```text
//! <ip> <mac> <firewall mark> <token> <last_updated>
//! 10.0.0.1 aa:bb:cc:dd:ee:ff 2 3f2a...9c 1718000000
//! ```
//!
//! The snapshot is best-effort telemetry: a destination that cannot be
//! written is logged and reported, never fatal.

mod config;
mod error;
mod writer;

pub use config::StatusConfig;
pub use error::StatusError;
pub use writer::{StatusWriter, render, status_line, write_snapshot};
