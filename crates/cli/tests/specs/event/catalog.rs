// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event catalog specs
//!
//! Verify creation, listing, detail views and owner-only deletion.

use crate::prelude::*;

#[test]
fn created_event_is_listed_as_upcoming() {
    let temp = Project::empty();
    let org = temp.organizer();
    let event = temp.event(&org, 10);

    temp.rc()
        .args(&["event", "list"])
        .passes()
        .stdout_has(&event)
        .stdout_has("UPCOMING")
        .stdout_has("0/10");
}

#[test]
fn empty_catalog_says_so() {
    let temp = Project::empty();
    temp.rc()
        .args(&["event", "list"])
        .passes()
        .stdout_eq("No events\n");
}

#[test]
fn event_json_carries_status_and_registration_count() {
    let temp = Project::empty();
    let org = temp.organizer();
    let event = temp.event(&org, 3);
    let ann = temp.user("Ann", "attendee");
    temp.register(&event, &ann);

    let json = temp
        .rc()
        .args(&["--format", "json", "event", "show", &event])
        .passes()
        .json();
    assert_eq!(json["status"], "UPCOMING");
    assert_eq!(json["registered"], 1);
    assert_eq!(json["capacity"], 3);
    assert_eq!(json["has_registered"], false);
}

#[test]
fn show_for_user_reports_registration() {
    let temp = Project::empty();
    let org = temp.organizer();
    let event = temp.event(&org, 3);
    let ann = temp.user("Ann", "attendee");
    temp.register(&event, &ann);

    temp.rc()
        .args(&["event", "show", &event, "--user", &ann])
        .passes()
        .stdout_has("Seats: 1/3 (2 left)")
        .stdout_has("Fee: 15.00")
        .stdout_has("You are registered");
}

#[test]
fn capacity_must_be_positive() {
    let temp = Project::empty();
    let org = temp.organizer();
    temp.rc()
        .args(&[
            "event",
            "create",
            "--organizer",
            &org,
            "--name",
            "Empty room",
            "--venue",
            "Closet",
            "--capacity",
            "0",
            "--start",
            "2030-01-01T18:00:00Z",
            "--end",
            "2030-01-01T22:00:00Z",
            "--deadline",
            "2030-01-01T12:00:00Z",
        ])
        .fails()
        .stderr_has("capacity must be positive");
}

#[test]
fn only_the_owner_can_delete() {
    let temp = Project::empty();
    let org = temp.organizer();
    let other = temp.user("Oscar", "organizer");
    let event = temp.event(&org, 5);

    temp.rc()
        .args(&["event", "delete", &event, "--organizer", &other])
        .fails()
        .stderr_has("error[role_mismatch]")
        .stderr_has("event owner");

    temp.rc()
        .args(&["event", "delete", &event, "--organizer", &org])
        .passes()
        .stdout_has("Deleted event");
    temp.rc().args(&["event", "list"]).passes().stdout_lacks(&event);
}

#[test]
fn deleting_an_event_voids_its_tickets() {
    let temp = Project::empty();
    let org = temp.organizer();
    let event = temp.event(&org, 5);
    let ann = temp.user("Ann", "attendee");
    let ticket = temp.register(&event, &ann);

    temp.rc()
        .args(&["event", "delete", &event, "--organizer", &org])
        .passes();
    temp.rc()
        .args(&["check-in", &ticket, &event])
        .fails()
        .stderr_has("error[ticket_not_found]");
    temp.rc()
        .args(&["tickets", &ann])
        .passes()
        .stdout_eq("No tickets\n");
}

#[test]
fn organizer_listing_only_shows_owned_events() {
    let temp = Project::empty();
    let org = temp.organizer();
    let other = temp.user("Oscar", "organizer");
    let mine = temp.event(&org, 5);
    let theirs = temp.event(&other, 5);

    temp.rc()
        .args(&["event", "list", "--organizer", &org])
        .passes()
        .stdout_has(&mine)
        .stdout_lacks(&theirs);
}
