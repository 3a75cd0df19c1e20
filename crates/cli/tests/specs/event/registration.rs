// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registration specs
//!
//! Verify admission rules: role, deadline, duplicates and capacity.

use crate::prelude::*;
use chrono::{Duration, Utc};

#[test]
fn register_prints_a_ticket() {
    let temp = Project::empty();
    let org = temp.organizer();
    let event = temp.event(&org, 2);
    let ann = temp.user("Ann", "attendee");

    let ticket = temp.register(&event, &ann);
    assert!(!ticket.is_empty());
    temp.rc()
        .args(&["tickets", &ann])
        .passes()
        .stdout_has(&ticket)
        .stdout_has("Registered");
}

#[test]
fn third_registration_exceeds_capacity_of_two() {
    let temp = Project::empty();
    let org = temp.organizer();
    let event = temp.event(&org, 2);
    let ann = temp.user("Ann", "attendee");
    let bob = temp.user("Bob", "attendee");
    let cat = temp.user("Cat", "attendee");

    temp.register(&event, &ann);
    temp.register(&event, &bob);
    temp.rc()
        .args(&["register", &event, &cat])
        .fails()
        .stderr_has("error[capacity_exceeded]");

    let json = temp
        .rc()
        .args(&["--format", "json", "event", "participants", &event])
        .passes()
        .json();
    assert_eq!(json.as_array().unwrap().len(), 2);
}

#[test]
fn registering_twice_is_rejected() {
    let temp = Project::empty();
    let org = temp.organizer();
    let event = temp.event(&org, 5);
    let ann = temp.user("Ann", "attendee");
    temp.register(&event, &ann);

    temp.rc()
        .args(&["register", &event, &ann])
        .fails()
        .stderr_has("error[already_registered]")
        .stderr_has(&format!("rollcall tickets {ann}"));
}

#[test]
fn registration_closes_at_the_deadline() {
    let temp = Project::empty();
    let org = temp.organizer();
    let start = Utc::now() + Duration::hours(2);
    let event = temp.event_at(
        &org,
        5,
        start,
        start + Duration::hours(2),
        Utc::now() - Duration::minutes(5),
    );
    let ann = temp.user("Ann", "attendee");

    temp.rc()
        .args(&["register", &event, &ann])
        .fails()
        .stderr_has("error[deadline_passed]");
}

#[test]
fn volunteers_cannot_register_as_attendees() {
    let temp = Project::empty();
    let org = temp.organizer();
    let event = temp.event(&org, 5);
    let vic = temp.user("Vic", "volunteer");

    temp.rc()
        .args(&["register", &event, &vic])
        .fails()
        .stderr_has("error[role_mismatch]");
}

#[test]
fn participants_list_names_and_contacts() {
    let temp = Project::empty();
    let org = temp.organizer();
    let event = temp.event(&org, 5);
    let ann = temp.user("Ann", "attendee");
    temp.register(&event, &ann);

    temp.rc()
        .args(&["event", "participants", &event])
        .passes()
        .stdout_has("Ann")
        .stdout_has("ann@example.com");
}
