//! Client types: the record the gateway keeps for each device.
//!
//! A "client" is one device the gateway has seen. It tracks:
//! - WHO the device is (IP and MAC address)
//! - WHAT credential it was issued (the access token)
//! - WHERE it stands with the firewall (mark and sync flag)
//! - HOW MUCH traffic it has moved (counters)

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Identity of a client within one [`ClientRegistry`](crate::ClientRegistry).
///
/// Ids are issued in creation order and never reused, so an id kept after
/// its client was deleted can only ever produce "not found".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientId(pub(crate) u64);

impl ClientId {
    /// Returns the raw numeric id.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Firewall state
// ---------------------------------------------------------------------------

/// The packet-filter mark the firewall applies to a client's traffic.
///
/// Written by the firewall integration, exported as a plain decimal in the
/// status file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FirewallMark(pub u32);

impl FirewallMark {
    /// No mark applied yet. Every new client starts here.
    pub const NONE: Self = Self(0);
    /// Admitted for a short validation window.
    pub const PROBATION: Self = Self(1);
    /// Fully authenticated.
    pub const KNOWN: Self = Self(2);
    /// Admitted because the auth server is unreachable.
    pub const AUTH_IS_DOWN: Self = Self(253);
    /// Blocked.
    pub const LOCKED: Self = Self(254);
}

impl fmt::Display for FirewallMark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Marker set by the firewall-sync path and consumed by
/// [`ClientList::delete_by_flag`](crate::ClientList::delete_by_flag).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ClientFlag(pub u8);

impl ClientFlag {
    /// Initial value of every client.
    pub const CLEAR: Self = Self(0);
    /// Marked for removal on the next bulk eviction.
    pub const STALE: Self = Self(1);
}

// ---------------------------------------------------------------------------
// Counters
// ---------------------------------------------------------------------------

/// Byte counters for one client.
///
/// The `*_history` fields hold the cumulative total seen before the last
/// firewall counter reset, so `incoming = incoming_history + raw counter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrafficCounters {
    pub incoming: u64,
    pub incoming_history: u64,
    pub outgoing: u64,
    pub outgoing_history: u64,
    /// Unix seconds of the last observed traffic (or of creation).
    pub last_updated: i64,
}

impl TrafficCounters {
    pub(crate) fn starting_at(now: i64) -> Self {
        Self {
            last_updated: now,
            ..Self::default()
        }
    }

    /// Applies a raw incoming byte counter read from the firewall.
    ///
    /// Returns `true` (and refreshes `last_updated`) only if the total grew.
    pub fn record_incoming(&mut self, raw: u64, now: i64) -> bool {
        let total = self.incoming_history.saturating_add(raw);
        if total > self.incoming {
            self.incoming = total;
            self.last_updated = now;
            true
        } else {
            false
        }
    }

    /// Applies a raw outgoing byte counter read from the firewall.
    ///
    /// Returns `true` (and refreshes `last_updated`) only if the total grew.
    pub fn record_outgoing(&mut self, raw: u64, now: i64) -> bool {
        let total = self.outgoing_history.saturating_add(raw);
        if total > self.outgoing {
            self.outgoing = total;
            self.last_updated = now;
            true
        } else {
            false
        }
    }

    /// Carries the current totals into history. Call this when the
    /// firewall's own counters are about to restart from zero.
    pub fn fold_history(&mut self) {
        self.incoming_history = self.incoming;
        self.outgoing_history = self.outgoing;
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// A single device known to the gateway.
///
/// Clients are created only by
/// [`ClientList::append`](crate::ClientList::append) and are owned by the
/// registry until deleted. The identifying strings are fixed at creation;
/// the firewall state and counters are mutated in place under the lock.
#[derive(Debug)]
pub struct Client {
    id: ClientId,
    ip: String,
    mac: String,
    token: String,

    /// Packet-filter mark, exported in the status file.
    pub fw_state: FirewallMark,

    /// Firewall-sync marker used for bulk eviction.
    pub flag: ClientFlag,

    /// Traffic accounting.
    pub counters: TrafficCounters,
}

impl Client {
    pub(crate) fn new(
        id: ClientId,
        ip: String,
        mac: String,
        token: String,
        now: i64,
    ) -> Self {
        Self {
            id,
            ip,
            mac,
            token,
            fw_state: FirewallMark::NONE,
            flag: ClientFlag::CLEAR,
            counters: TrafficCounters::starting_at(now),
        }
    }

    pub fn id(&self) -> ClientId {
        self.id
    }

    pub fn ip(&self) -> &str {
        &self.ip
    }

    pub fn mac(&self) -> &str {
        &self.mac
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Current wall-clock time in Unix seconds.
pub(crate) fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> Client {
        Client::new(
            ClientId(7),
            "10.0.0.1".into(),
            "aa:bb".into(),
            "tok1".into(),
            1000,
        )
    }

    #[test]
    fn test_new_client_starts_clear_with_zeroed_counters() {
        let c = client();

        assert_eq!(c.id(), ClientId(7));
        assert_eq!(c.ip(), "10.0.0.1");
        assert_eq!(c.mac(), "aa:bb");
        assert_eq!(c.token(), "tok1");
        assert_eq!(c.fw_state, FirewallMark::NONE);
        assert_eq!(c.flag, ClientFlag::CLEAR);
        assert_eq!(
            c.counters,
            TrafficCounters {
                last_updated: 1000,
                ..TrafficCounters::default()
            }
        );
    }

    #[test]
    fn test_record_incoming_growth_refreshes_timestamp() {
        let mut counters = TrafficCounters::starting_at(1000);

        assert!(counters.record_incoming(500, 1010));
        assert_eq!(counters.incoming, 500);
        assert_eq!(counters.last_updated, 1010);

        // Same raw value again: no growth, timestamp untouched.
        assert!(!counters.record_incoming(500, 1020));
        assert_eq!(counters.last_updated, 1010);
    }

    #[test]
    fn test_record_outgoing_adds_history() {
        let mut counters = TrafficCounters::starting_at(0);
        counters.record_outgoing(300, 5);
        counters.fold_history();

        // The firewall restarted from zero; totals keep climbing.
        assert!(counters.record_outgoing(50, 9));
        assert_eq!(counters.outgoing_history, 300);
        assert_eq!(counters.outgoing, 350);
        assert_eq!(counters.last_updated, 9);
    }

    #[test]
    fn test_fold_history_copies_both_directions() {
        let mut counters = TrafficCounters {
            incoming: 10,
            outgoing: 20,
            ..TrafficCounters::default()
        };

        counters.fold_history();

        assert_eq!(counters.incoming_history, 10);
        assert_eq!(counters.outgoing_history, 20);
    }

    #[test]
    fn test_display_formats() {
        assert_eq!(ClientId(3).to_string(), "C-3");
        assert_eq!(FirewallMark::KNOWN.to_string(), "2");
        assert_eq!(FirewallMark::LOCKED.to_string(), "254");
    }
}
