//! Simulated gateway: three actors sharing one `Gateway`.
//!
//! - authentication path: admits devices as they show up
//! - firewall-sync path: updates traffic counters and evicts idle clients
//! - status path: snapshots the registry to the status file
//!
//! Run with `RUST_LOG=debug` to watch every registry operation.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rand::Rng;
use wardgate::prelude::*;

const RUN_FOR: Duration = Duration::from_secs(5);
const AUTH_EVERY: Duration = Duration::from_millis(100);
const SYNC_EVERY: Duration = Duration::from_millis(300);
const STATUS_EVERY: Duration = Duration::from_secs(1);

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Actors
// ---------------------------------------------------------------------------

/// Admits the device seen on `host` unless it is trusted or already known.
fn admit(gateway: &Gateway, host: u32) {
    let ip = format!("192.168.10.{host}");
    let mac = format!("02:00:00:00:00:{host:02x}");

    if gateway.is_trusted(&ip) {
        tracing::debug!(%ip, "trusted address, no session needed");
        return;
    }

    let mut clients = gateway.clients().lock();
    if let Some(existing) = clients.find_by_ip_mac(&ip, &mac) {
        tracing::debug!(client_id = %existing.id(), "device already admitted");
        return;
    }
    let client = clients.append(ip, mac, generate_token());
    client.fw_state = if gateway.is_valid(client.ip()) {
        FirewallMark::KNOWN
    } else {
        FirewallMark::PROBATION
    };
}

/// One firewall-sync pass: read counters, flag idle clients, evict them.
fn sync_firewall(gateway: &Gateway) {
    let mut rng = rand::rng();
    let now = unix_now();

    let mut clients = gateway.clients().lock();
    for client in clients.iter_mut() {
        if rng.random_bool(0.2) {
            client.flag = ClientFlag::STALE;
        } else {
            let raw_in = client.counters.incoming + rng.random_range(0..4096);
            let raw_out = client.counters.outgoing + rng.random_range(0..1024);
            client.counters.record_incoming(raw_in, now);
            client.counters.record_outgoing(raw_out, now);
        }
    }

    for client in clients.delete_by_flag(ClientFlag::STALE) {
        tracing::debug!(
            ip = %client.ip(),
            incoming = client.counters.incoming,
            outgoing = client.counters.outgoing,
            "idle client evicted"
        );
    }
}

async fn authentication_path(gateway: Arc<Gateway>) {
    let mut ticker = tokio::time::interval(AUTH_EVERY);
    let mut seen: u32 = 0;
    loop {
        ticker.tick().await;
        seen += 1;
        // Hosts 1..=40 keep coming back, so duplicates are exercised.
        admit(&gateway, seen % 40 + 1);
    }
}

async fn firewall_sync_path(gateway: Arc<Gateway>) {
    let mut ticker = tokio::time::interval(SYNC_EVERY);
    loop {
        ticker.tick().await;
        sync_firewall(&gateway);
    }
}

async fn status_path(gateway: Arc<Gateway>) {
    let mut ticker = tokio::time::interval(STATUS_EVERY);
    loop {
        ticker.tick().await;
        match gateway.write_status() {
            Ok(lines) => tracing::info!(lines, "status snapshot written"),
            Err(e) => tracing::debug!(error = %e, "status snapshot skipped"),
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    wardgate::init_tracing();

    let status_file = std::env::var_os("WARDGATE_STATUS_FILE")
        .map(Into::into)
        .unwrap_or_else(|| std::env::temp_dir().join("wardgate_client_status"));

    let gateway = Arc::new(Gateway::new(GatewayConfig {
        status: StatusConfig { path: status_file },
        trusted_ips: vec!["192.168.10.1".into()],
        valid_ips: (2..=10).map(|h| format!("192.168.10.{h}")).collect(),
    }));

    let actors = [
        tokio::spawn(authentication_path(Arc::clone(&gateway))),
        tokio::spawn(firewall_sync_path(Arc::clone(&gateway))),
        tokio::spawn(status_path(Arc::clone(&gateway))),
    ];

    tokio::time::sleep(RUN_FOR).await;
    for actor in &actors {
        actor.abort();
    }

    let lines = gateway.write_status()?;
    tracing::info!(
        clients = lines,
        path = %gateway.status().path().display(),
        "simulation finished"
    );
    Ok(())
}
