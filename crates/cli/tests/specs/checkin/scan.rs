// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Check-in specs
//!
//! Verify a ticket admits once, only at its own event, only before the end.

use crate::prelude::*;
use chrono::{Duration, Utc};

#[test]
fn ticket_checks_in_once() {
    let temp = Project::empty();
    let org = temp.organizer();
    let event = temp.event(&org, 5);
    let ann = temp.user("Ann", "attendee");
    let ticket = temp.register(&event, &ann);

    temp.rc()
        .args(&["check-in", &ticket, &event])
        .passes()
        .stdout_has(&format!("Checked in {ann}"));
    temp.rc()
        .args(&["check-in", &ticket, &event])
        .fails()
        .stderr_has("error[already_checked_in]");
    temp.rc()
        .args(&["tickets", &ann])
        .passes()
        .stdout_has("CheckedIn");
}

#[test]
fn ticket_is_refused_at_another_event() {
    let temp = Project::empty();
    let org = temp.organizer();
    let event = temp.event(&org, 5);
    let other = temp.event(&org, 5);
    let ann = temp.user("Ann", "attendee");
    let ticket = temp.register(&event, &ann);

    temp.rc()
        .args(&["check-in", &ticket, &other])
        .fails()
        .stderr_has("error[event_mismatch]")
        .stderr_has(&format!("present the ticket at event {event}"));
}

#[test]
fn unknown_ticket_is_not_found() {
    let temp = Project::empty();
    let org = temp.organizer();
    let event = temp.event(&org, 5);

    temp.rc()
        .args(&["check-in", "bogus", &event])
        .fails()
        .stderr_has("error[ticket_not_found]");
}

#[test]
fn check_in_after_the_end_is_expired() {
    let temp = Project::empty();
    let org = temp.organizer();
    let ann = temp.user("Ann", "attendee");
    let start = Utc::now() + Duration::seconds(2);
    let end = start + Duration::seconds(2);
    let event = temp.event_at(&org, 5, start, end, end);
    let ticket = temp.register(&event, &ann);

    std::thread::sleep(std::time::Duration::from_secs(5));
    temp.rc()
        .args(&["check-in", &ticket, &event])
        .fails()
        .stderr_has("error[event_expired]");
}

#[test]
fn stats_count_registrations_check_ins_and_revenue() {
    let temp = Project::empty();
    let org = temp.organizer();
    let event = temp.event(&org, 5);
    let ann = temp.user("Ann", "attendee");
    let bob = temp.user("Bob", "attendee");
    let ticket = temp.register(&event, &ann);
    temp.register(&event, &bob);
    temp.rc().args(&["check-in", &ticket, &event]).passes();

    temp.rc()
        .args(&["stats", "--organizer", &org])
        .passes()
        .stdout_eq("Registrations: 2\nCheck-ins: 1\nActive volunteers: 0\nRevenue: 30.00\n");
}
