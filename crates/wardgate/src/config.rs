//! Gateway configuration.

use serde::{Deserialize, Serialize};
use wardgate_status::StatusConfig;

/// Everything [`Gateway::new`](crate::Gateway::new) needs.
///
/// Loading this from a file is the embedding application's job; every
/// field has a default so partial documents deserialize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Status file settings.
    pub status: StatusConfig,

    /// Addresses that bypass admission entirely.
    pub trusted_ips: Vec<String>,

    /// Addresses already validated out of band.
    pub valid_ips: Vec<String>,
}
