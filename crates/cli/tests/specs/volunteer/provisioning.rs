// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Volunteer provisioning specs
//!
//! Verify a volunteer and their duties are created all or nothing.

use crate::prelude::*;

fn create_volunteer(temp: &Project, org: &str, contact: &str, events: &[&str]) -> Rc {
    let mut args = vec![
        "volunteer",
        "create",
        "--organizer",
        org,
        "--name",
        "Vic",
        "--contact",
        contact,
        "--credential",
        "pw",
    ];
    for event in events {
        args.push("--event");
        args.push(event);
    }
    temp.rc().args(&args)
}

#[test]
fn volunteer_is_created_with_all_duties() {
    let temp = Project::empty();
    let org = temp.organizer();
    let first = temp.event(&org, 5);
    let second = temp.event(&org, 5);

    let json = create_volunteer(&temp, &org, "vic@example.com", &[&first, &second])
        .args(&["--format", "json"])
        .passes()
        .json();
    assert_eq!(json["role"], "VOLUNTEER");
    let vic = json["id"].as_str().unwrap().to_string();

    temp.rc()
        .args(&["volunteer", "duties", &vic])
        .passes()
        .stdout_has(&first)
        .stdout_has(&second);
    temp.rc()
        .args(&["volunteer", "list", &first])
        .passes()
        .stdout_has("vic@example.com");
}

#[test]
fn unknown_event_creates_nothing() {
    let temp = Project::empty();
    let org = temp.organizer();
    let event = temp.event(&org, 5);

    create_volunteer(&temp, &org, "vic@example.com", &[&event, "missing"])
        .fails()
        .stderr_has("error[not_found]");

    // Contact is still free, so the identity was never written
    create_volunteer(&temp, &org, "vic@example.com", &[&event]).passes();
    temp.rc()
        .args(&["volunteer", "list", &event])
        .passes()
        .stdout_has("vic@example.com");
}

#[test]
fn only_organizers_provision_volunteers() {
    let temp = Project::empty();
    let org = temp.organizer();
    let event = temp.event(&org, 5);
    let ann = temp.user("Ann", "attendee");

    create_volunteer(&temp, &ann, "vic@example.com", &[&event])
        .fails()
        .stderr_has("error[role_mismatch]");
}

#[test]
fn assigning_duties_is_idempotent() {
    let temp = Project::empty();
    let org = temp.organizer();
    let first = temp.event(&org, 5);
    let second = temp.event(&org, 5);
    let vic = temp.user("Vic", "volunteer");

    temp.rc()
        .args(&["volunteer", "assign", &vic, "--event", &first])
        .passes();
    let json = temp
        .rc()
        .args(&[
            "--format", "json", "volunteer", "assign", &vic, "--event", &first, "--event",
            &second,
        ])
        .passes()
        .json();
    assert_eq!(json.as_array().unwrap().len(), 2);

    temp.rc()
        .args(&["stats"])
        .passes()
        .stdout_has("Active volunteers: 1");
}

#[test]
fn attendees_cannot_take_duties() {
    let temp = Project::empty();
    let org = temp.organizer();
    let event = temp.event(&org, 5);
    let ann = temp.user("Ann", "attendee");

    temp.rc()
        .args(&["volunteer", "assign", &ann, "--event", &event])
        .fails()
        .stderr_has("error[role_mismatch]");
}
