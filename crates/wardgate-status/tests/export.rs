//! Integration tests for writing the status file to disk.

use std::fs;

use wardgate_registry::{ClientFlag, ClientRegistry, FirewallMark};
use wardgate_status::{StatusConfig, StatusError, StatusWriter};

fn writer_in(dir: &tempfile::TempDir) -> StatusWriter {
    StatusWriter::new(StatusConfig {
        path: dir.path().join("client_status"),
    })
}

#[test]
fn test_export_writes_exact_status_line() {
    let dir = tempfile::tempdir().unwrap();
    let writer = writer_in(&dir);
    let registry = ClientRegistry::new();
    {
        let mut clients = registry.lock();
        let client = clients.append("10.0.0.1", "aa:bb", "tok1");
        client.fw_state = FirewallMark::PROBATION;
        client.counters.last_updated = 1000;
    }

    let lines = writer.export(&registry).unwrap();

    assert_eq!(lines, 1);
    assert_eq!(
        fs::read_to_string(writer.path()).unwrap(),
        "10.0.0.1 aa:bb 1 tok1 1000\n"
    );
}

#[test]
fn test_export_truncates_previous_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let writer = writer_in(&dir);
    let registry = ClientRegistry::new();
    {
        let mut clients = registry.lock();
        for i in 0..5 {
            clients.append(format!("10.0.0.{i}"), "m", format!("t{i}")).flag =
                ClientFlag::STALE;
        }
    }
    writer.export(&registry).unwrap();

    registry.lock().delete_by_flag(ClientFlag::STALE);
    let lines = writer.export(&registry).unwrap();

    assert_eq!(lines, 0);
    assert_eq!(fs::read_to_string(writer.path()).unwrap(), "");
}

#[test]
fn test_export_locked_with_guard_held() {
    let dir = tempfile::tempdir().unwrap();
    let writer = writer_in(&dir);
    let registry = ClientRegistry::new();

    let mut clients = registry.lock();
    clients.append("10.0.0.7", "cc", "tok7").counters.last_updated = 42;
    let lines = writer.export_locked(&clients).unwrap();
    drop(clients);

    assert_eq!(lines, 1);
    assert_eq!(fs::read_to_string(writer.path()).unwrap(), "10.0.0.7 cc 0 tok7 42\n");
}

#[test]
fn test_export_unwritable_destination_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let writer = StatusWriter::new(StatusConfig {
        path: dir.path().join("missing-dir").join("client_status"),
    });
    let registry = ClientRegistry::new();
    registry.lock().append("10.0.0.1", "aa", "tok1");

    let result = writer.export(&registry);

    assert!(matches!(result, Err(StatusError::Io { ref path, .. }) if path == writer.path()));
    // The registry is untouched and still usable.
    assert_eq!(registry.lock().len(), 1);
}
