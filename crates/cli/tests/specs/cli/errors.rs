// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error reporting specs
//!
//! Verify rejections surface their stable code and a next step.

use crate::prelude::*;

#[test]
fn unknown_event_reports_not_found_with_suggestion() {
    let temp = Project::empty();
    temp.rc()
        .args(&["event", "show", "no-such-event"])
        .fails()
        .stderr_has("error[not_found]: event not found: no-such-event")
        .stderr_has("rollcall event list");
}

#[test]
fn unknown_role_is_rejected_by_argument_parsing() {
    let temp = Project::empty();
    temp.rc()
        .args(&[
            "user", "add", "--name", "Ann", "--contact", "ann@example.com", "--credential",
            "pw", "--role", "janitor",
        ])
        .fails()
        .stderr_has("unknown role");
}

#[test]
fn duplicate_contact_is_rejected_case_insensitively() {
    let temp = Project::empty();
    temp.user("Ann", "attendee");
    temp.rc()
        .args(&[
            "user", "add", "--name", "Ann Again", "--contact", "ANN@Example.com",
            "--credential", "pw",
        ])
        .fails()
        .stderr_has("error[duplicate_identity]");
}

#[test]
fn blank_name_is_a_validation_error() {
    let temp = Project::empty();
    temp.rc()
        .args(&[
            "user", "add", "--name", "  ", "--contact", "x@example.com", "--credential", "pw",
        ])
        .fails()
        .stderr_has("error[validation_error]");
}

#[test]
fn attendee_cannot_create_events() {
    let temp = Project::empty();
    let ann = temp.user("Ann", "attendee");
    temp.rc()
        .args(&[
            "event",
            "create",
            "--organizer",
            &ann,
            "--name",
            "Party",
            "--venue",
            "Roof",
            "--capacity",
            "5",
            "--start",
            "2030-01-01T18:00:00Z",
            "--end",
            "2030-01-01T22:00:00Z",
            "--deadline",
            "2030-01-01T12:00:00Z",
        ])
        .fails()
        .stderr_has("error[role_mismatch]")
        .stderr_has("rollcall user show");
}

#[test]
fn malformed_config_is_reported() {
    let temp = Project::empty();
    temp.file("rollcall.toml", "snapshot_interval = \"often\"");
    temp.rc()
        .args(&["event", "list"])
        .fails()
        .stderr_has("invalid configuration");
}
