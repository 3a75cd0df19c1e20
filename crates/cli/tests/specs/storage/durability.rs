// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durability specs
//!
//! Verify state survives restarts, snapshots and a torn journal tail.

use crate::prelude::*;
use std::io::Write;

#[test]
fn state_survives_between_invocations() {
    let temp = Project::empty();
    let org = temp.organizer();
    let event = temp.event(&org, 5);
    let ann = temp.user("Ann", "attendee");
    let ticket = temp.register(&event, &ann);

    assert!(temp.path().join("wal.jsonl").is_file());
    temp.rc()
        .args(&["tickets", &ann])
        .passes()
        .stdout_has(&ticket);
}

#[test]
fn snapshot_then_replay_keeps_state() {
    let temp = Project::empty();
    let org = temp.organizer();
    let event = temp.event(&org, 5);
    let ann = temp.user("Ann", "attendee");
    temp.register(&event, &ann);

    temp.rc()
        .args(&["snapshot"])
        .passes()
        .stdout_has("Snapshot written");
    let bob = temp.user("Bob", "attendee");
    temp.register(&event, &bob);

    temp.rc()
        .args(&["event", "list"])
        .passes()
        .stdout_has("2/5");
}

#[test]
fn torn_journal_tail_is_discarded() {
    let temp = Project::empty();
    let org = temp.organizer();
    let event = temp.event(&org, 5);

    let mut wal = std::fs::OpenOptions::new()
        .append(true)
        .open(temp.path().join("wal.jsonl"))
        .unwrap();
    wal.write_all(b"{\"sequence\":99,\"ops\":[").unwrap();
    drop(wal);

    temp.rc()
        .args(&["event", "list"])
        .passes()
        .stdout_has(&event);
    // Appends after recovery land on a clean line
    let ann = temp.user("Ann", "attendee");
    temp.register(&event, &ann);
    temp.rc()
        .args(&["event", "list"])
        .passes()
        .stdout_has("1/5");
}

#[test]
fn snapshot_interval_from_config_writes_snapshots() {
    let temp = Project::empty();
    temp.file("rollcall.toml", "snapshot_interval = 2\n");
    let org = temp.organizer();
    temp.event(&org, 5);
    temp.user("Ann", "attendee");

    let snapshots = temp.path().join("snapshots");
    let count = std::fs::read_dir(&snapshots).map(|d| d.count()).unwrap_or(0);
    assert!(count >= 1, "expected a snapshot in {}", snapshots.display());
}
